use async_trait::async_trait;
use formkit::LinkQuery;

use crate::contract::error::RolesError;
use crate::contract::model::RoleCheck;

/// Authorization label gating eligibility for linkage to a Customer record.
pub const CUSTOMER_ROLE: &str = "Customer";

/// Named server-side query the `user` picker runs to list eligible accounts.
pub const GET_CUSTOMER_USERS_QUERY: &str = "get_customer_users";

/// Typed client for the remote role operations, injected via the
/// [`formkit::ClientHub`] rather than looked up by name at call time.
#[async_trait]
pub trait CustomerRolesApi: Send + Sync {
    /// Authoritative check: does an account with this email hold the
    /// Customer role? One server round trip per call; results are not
    /// cached by the contract.
    async fn check_user_role(&self, email: &str) -> Result<RoleCheck, RolesError>;

    /// Candidate filter for the `user` record picker. Pure query definition,
    /// no I/O; never a substitute for [`Self::check_user_role`].
    fn customer_users_query(&self) -> LinkQuery {
        customer_users_query()
    }
}

/// Default picker query: all implementations share the same definition.
pub fn customer_users_query() -> LinkQuery {
    LinkQuery::new(GET_CUSTOMER_USERS_QUERY).with_filter("role", CUSTOMER_ROLE)
}

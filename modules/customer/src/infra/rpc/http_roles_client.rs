use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;
use url::Url;

use crate::config::CustomerConfig;
use crate::contract::client::CustomerRolesApi;
use crate::contract::error::RolesError;
use crate::contract::model::RoleCheck;

/// HTTP adapter of [`CustomerRolesApi`] against the roles service.
///
/// `GET {base}/api/method/check_user_role?email=…` → `{"exists": bool}`.
pub struct HttpRolesClient {
    client: reqwest::Client,
    base: Url,
}

impl HttpRolesClient {
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    pub fn from_config(cfg: &CustomerConfig) -> anyhow::Result<Self> {
        let base = Url::parse(&cfg.roles_base_url)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()?;
        Ok(Self::new(client, base))
    }
}

#[async_trait]
impl CustomerRolesApi for HttpRolesClient {
    #[instrument(
        name = "customer.http.check_user_role",
        skip_all,
        fields(base = %self.base)
    )]
    async fn check_user_role(&self, email: &str) -> Result<RoleCheck, RolesError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| RolesError::transport("invalid roles base URL"))?
            .extend(&["api", "method", "check_user_role"]);
        url.query_pairs_mut().append_pair("email", email);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| RolesError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RolesError::status(status.as_u16()));
        }

        response
            .json::<RoleCheck>()
            .await
            .map_err(|e| RolesError::decode(e.to_string()))
    }
}

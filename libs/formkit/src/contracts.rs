use async_trait::async_trait;

use crate::error::FormError;
use crate::session::FormState;

/// Lifecycle hooks for one record type.
///
/// Every hook defaults to a no-op so handlers only implement the moments
/// they care about. Hooks run one at a time per session; a hook returning
/// `Err` aborts the operation that triggered it (see
/// [`crate::FormSession::save`] for the pipeline ordering).
#[async_trait]
pub trait FormHandler<R: Send>: Send + Sync {
    /// Form initialization, before the first refresh. The place to install
    /// record-picker queries via [`FormState::set_link_query`].
    async fn on_setup(&self, _form: &mut FormState<R>) -> Result<(), FormError> {
        Ok(())
    }

    /// Record (re)loaded into the form.
    async fn on_refresh(&self, _form: &mut FormState<R>) -> Result<(), FormError> {
        Ok(())
    }

    /// Pre-save validation. An `Err` here halts the save pipeline before
    /// anything is written.
    async fn on_validate(&self, _form: &mut FormState<R>) -> Result<(), FormError> {
        Ok(())
    }

    /// Last chance to mutate the record before persistence. Runs only after
    /// validation succeeded.
    async fn on_before_save(&self, _form: &mut FormState<R>) -> Result<(), FormError> {
        Ok(())
    }

    /// A single field changed in the form, identified by field name.
    async fn on_field_changed(
        &self,
        _form: &mut FormState<R>,
        _field: &str,
    ) -> Result<(), FormError> {
        Ok(())
    }

    /// The record was persisted for the first time. The write has already
    /// happened; errors here cannot un-save the record.
    async fn on_after_insert(&self, _form: &mut FormState<R>) -> Result<(), FormError> {
        Ok(())
    }
}

/// Core module contract: dependency wiring during the init phase.
#[async_trait]
pub trait Module: Send + Sync + 'static {
    async fn init(&self, ctx: &crate::context::ModuleCtx) -> anyhow::Result<()>;
}

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::contracts::FormHandler;
use crate::error::FormError;
use crate::link::LinkQuery;
use crate::store::RecordStore;

/// Host-assigned identity of the record being edited.
#[derive(Debug, Clone)]
pub struct RecordMeta {
    pub name: String,
    /// `true` until the first successful save.
    pub is_new: bool,
}

/// Mutable form state handed to lifecycle hooks: the record value plus
/// form-level concerns (picker queries).
pub struct FormState<R> {
    session_id: Uuid,
    meta: RecordMeta,
    record: R,
    link_queries: BTreeMap<String, LinkQuery>,
}

impl<R> FormState<R> {
    pub fn new(name: impl Into<String>, is_new: bool, record: R) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            meta: RecordMeta {
                name: name.into(),
                is_new,
            },
            record,
            link_queries: BTreeMap::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut R {
        &mut self.record
    }

    /// Install a candidate query on a link field's record picker.
    pub fn set_link_query(&mut self, field: impl Into<String>, query: LinkQuery) {
        self.link_queries.insert(field.into(), query);
    }

    pub fn link_query(&self, field: &str) -> Option<&LinkQuery> {
        self.link_queries.get(field)
    }
}

/// One record-edit session: a handler, a store, and the form state.
///
/// Hooks take `&mut self`, so events on a session are strictly serialized;
/// a validation can never be superseded by a later one mid-flight.
pub struct FormSession<R: Clone + Send + Sync + 'static> {
    handler: Arc<dyn FormHandler<R>>,
    store: Arc<dyn RecordStore<R>>,
    state: FormState<R>,
}

impl<R: Clone + Send + Sync + 'static> FormSession<R> {
    /// Open the form: runs `on_setup` then `on_refresh`.
    pub async fn open(
        handler: Arc<dyn FormHandler<R>>,
        store: Arc<dyn RecordStore<R>>,
        state: FormState<R>,
    ) -> Result<Self, FormError> {
        let mut session = Self {
            handler,
            store,
            state,
        };
        session.handler.on_setup(&mut session.state).await?;
        session.handler.on_refresh(&mut session.state).await?;
        Ok(session)
    }

    pub fn state(&self) -> &FormState<R> {
        &self.state
    }

    pub fn record(&self) -> &R {
        self.state.record()
    }

    pub async fn refresh(&mut self) -> Result<(), FormError> {
        self.handler.on_refresh(&mut self.state).await
    }

    /// Apply an edit to the record, then dispatch `on_field_changed` for the
    /// named field.
    pub async fn update_field<F>(&mut self, field: &str, edit: F) -> Result<(), FormError>
    where
        F: FnOnce(&mut R),
    {
        edit(self.state.record_mut());
        self.handler.on_field_changed(&mut self.state, field).await
    }

    /// Save pipeline: validate, before-save, persist, after-insert.
    ///
    /// The pipeline awaits `on_validate` and stops on the first error, so a
    /// business-rule rejection always precedes the write. `on_after_insert`
    /// runs only on the first successful save of a record.
    #[instrument(
        skip(self),
        level = "debug",
        fields(record = %self.state.meta.name, session = %self.state.session_id)
    )]
    pub async fn save(&mut self) -> Result<(), FormError> {
        self.handler.on_validate(&mut self.state).await?;
        self.handler.on_before_save(&mut self.state).await?;

        let was_new = self.state.meta.is_new;
        self.store
            .save(&self.state.meta.name, self.state.record.clone())
            .await
            .map_err(|e| FormError::store(e.to_string()))?;
        self.state.meta.is_new = false;
        debug!(was_new, "record persisted");

        if was_new {
            self.handler.on_after_insert(&mut self.state).await?;
        }
        Ok(())
    }
}

//! # FormKit - Form lifecycle seam
//!
//! A small library for building record-form handler modules against a hosted
//! form framework. The host owns rendering, storage and transport; this crate
//! models the seams the handlers need:
//!
//! - **Lifecycle contract**: [`FormHandler`] exposes the hook points (setup,
//!   refresh, validate, before-save, field-change, after-insert) as an
//!   explicit trait instead of by-name event bindings.
//! - **Save pipeline**: [`FormSession`] awaits the validate hook's `Result`
//!   before persisting, so a business-rule rejection always precedes the
//!   write.
//! - **Wiring**: [`Module`] / [`ModuleCtx`] / [`ModuleRegistry`] for phase
//!   based initialization, and a type-keyed [`ClientHub`] for injecting
//!   strongly-typed remote clients.
//! - **Host ports**: [`Notifier`] (non-blocking messages), [`Clock`]
//!   (current date-time), [`RecordStore`] (persistence).

pub use anyhow::Result;
pub use async_trait::async_trait;

pub mod client_hub;
pub mod clock;
pub mod contracts;
pub mod context;
pub mod error;
pub mod link;
pub mod notify;
pub mod registry;
pub mod session;
pub mod store;

pub use client_hub::{ClientHub, ClientHubError};
pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{ConfigProvider, ModuleCtx, ModuleCtxBuilder};
pub use contracts::{FormHandler, Module};
pub use error::FormError;
pub use link::LinkQuery;
pub use notify::{CapturingNotifier, Indicator, Notification, Notifier, TracingNotifier};
pub use registry::{ModuleRegistry, RegistryBuilder, RegistryError};
pub use session::{FormSession, FormState, RecordMeta};
pub use store::{InMemoryStore, RecordStore, StoreError};

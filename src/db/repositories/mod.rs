//! Entity repositories
//!
//! One repository trait per entity, each exposing the typed CRUD contract
//! used by the REST layer and the export pipeline. The SQLx implementations
//! here run server-side against the pool; `crate::client::RemoteStore`
//! implements the same traits over HTTP. Callers receive `Arc<dyn …>` and
//! never know which backend they hold.
//!
//! Every storage failure is logged and wrapped into a generic
//! "Failed to <verb> <entity>" error. There are no retries and no
//! transactions spanning entities.

pub mod contact_info;
pub mod contact_message;
pub mod course;
pub mod faq;
pub mod global_office;
pub mod job;
pub mod service;
pub mod settings;
pub mod user;

pub use contact_info::{ContactInfoRepository, SqlxContactInfoRepository};
pub use contact_message::{ContactMessageRepository, SqlxContactMessageRepository};
pub use course::{CourseRepository, SqlxCourseRepository};
pub use faq::{FaqRepository, SqlxFaqRepository};
pub use global_office::{GlobalOfficeRepository, SqlxGlobalOfficeRepository};
pub use job::{JobRepository, SqlxJobRepository};
pub use service::{ServiceRepository, SqlxServiceRepository};
pub use settings::{Setting, SettingsRepository, SqlxSettingsRepository};
pub use user::{SqlxUserRepository, UserRepository};

/// Log a storage failure and wrap it into a coarse-grained error.
///
/// Used as `.map_err(storage_err("Failed to create service"))?` so every
/// repository method reports the same way.
pub(crate) fn storage_err<E>(action: &'static str) -> impl FnOnce(E) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    move |e| {
        tracing::error!(error = %e, "{}", action);
        anyhow::Error::new(e).context(action)
    }
}

/// Decode a JSON-encoded string list column, tolerating legacy/blank values.
pub(crate) fn decode_string_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Encode a string list into its JSON column representation.
pub(crate) fn encode_string_list(list: &[String]) -> String {
    serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string())
}

pub mod supabase;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Application, ApplicationCreate, ApplicationUpdate};

pub use supabase::SupabaseStore;

/// Errors surfaced by the datastore client. No retry or recovery happens at
/// this layer; each failure is wrapped once per operation by the handlers.
#[derive(Debug, Error)]
pub enum DatastoreError {
    #[error("datastore request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("datastore returned {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("invalid datastore URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid datastore credentials: {0}")]
    Credentials(String),
    #[error("unexpected datastore response: {0}")]
    Decode(String),
}

/// Storage boundary for application records.
///
/// The production implementation talks to the managed datastore over REST;
/// tests substitute an in-memory implementation. Empty result sets are
/// reported as-is; "not found" policy belongs to the handlers.
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Application>, DatastoreError>;

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Application>, DatastoreError>;

    async fn get(&self, application_id: Uuid) -> Result<Option<Application>, DatastoreError>;

    async fn insert(&self, fields: &ApplicationCreate) -> Result<Application, DatastoreError>;

    /// Applies only the supplied fields. Returns `None` when no row matched.
    async fn update(
        &self,
        application_id: Uuid,
        fields: &ApplicationUpdate,
    ) -> Result<Option<Application>, DatastoreError>;

    /// Returns true when a row was actually removed.
    async fn delete(&self, application_id: Uuid) -> Result<bool, DatastoreError>;

    /// Returns the number of rows removed.
    async fn delete_by_user(&self, user_id: &str) -> Result<u64, DatastoreError>;
}

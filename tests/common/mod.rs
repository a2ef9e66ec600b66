use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use tower::ServiceExt;
use uuid::Uuid;

use job_tracker_api::config::AppConfig;
use job_tracker_api::database::{Datastore, DatastoreError};
use job_tracker_api::models::{Application, ApplicationCreate, ApplicationUpdate};
use job_tracker_api::state::AppState;

pub const TEST_API_KEY: &str = "test-secret-key";

/// In-memory Datastore standing in for the managed backend, so router tests
/// run without network access.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Application>>,
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Application>, DatastoreError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Application>, DatastoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get(&self, application_id: Uuid) -> Result<Option<Application>, DatastoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.application_id == application_id)
            .cloned())
    }

    async fn insert(&self, fields: &ApplicationCreate) -> Result<Application, DatastoreError> {
        let now = Utc::now();
        let application = Application {
            application_id: Uuid::new_v4(),
            user_id: fields.user_id.clone(),
            company_name: fields.company_name.clone(),
            recruiter: fields.recruiter.clone(),
            job_title: fields.job_title.clone(),
            job_url: fields.job_url.clone(),
            status: fields.status,
            applied_date: fields.applied_date,
            notes: fields.notes.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.rows.lock().unwrap().push(application.clone());
        Ok(application)
    }

    async fn update(
        &self,
        application_id: Uuid,
        fields: &ApplicationUpdate,
    ) -> Result<Option<Application>, DatastoreError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.application_id == application_id) else {
            return Ok(None);
        };

        if let Some(v) = &fields.user_id {
            row.user_id = v.clone();
        }
        if let Some(v) = &fields.company_name {
            row.company_name = Some(v.clone());
        }
        if let Some(v) = &fields.recruiter {
            row.recruiter = Some(v.clone());
        }
        if let Some(v) = &fields.job_title {
            row.job_title = Some(v.clone());
        }
        if let Some(v) = &fields.job_url {
            row.job_url = Some(v.clone());
        }
        if let Some(v) = fields.status {
            row.status = Some(v);
        }
        if let Some(v) = fields.applied_date {
            row.applied_date = Some(v);
        }
        if let Some(v) = &fields.notes {
            row.notes = Some(v.clone());
        }
        row.updated_at = Some(Utc::now());

        Ok(Some(row.clone()))
    }

    async fn delete(&self, application_id: Uuid) -> Result<bool, DatastoreError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.application_id != application_id);
        Ok(rows.len() < before)
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<u64, DatastoreError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.user_id != user_id);
        Ok((before - rows.len()) as u64)
    }
}

/// Datastore that fails every call, for exercising the server-error path.
pub struct FailingStore;

impl FailingStore {
    fn backend_down() -> DatastoreError {
        DatastoreError::Backend {
            status: 503,
            message: "connection refused".to_string(),
        }
    }
}

#[async_trait]
impl Datastore for FailingStore {
    async fn list_all(&self) -> Result<Vec<Application>, DatastoreError> {
        Err(Self::backend_down())
    }

    async fn list_by_user(&self, _user_id: &str) -> Result<Vec<Application>, DatastoreError> {
        Err(Self::backend_down())
    }

    async fn get(&self, _application_id: Uuid) -> Result<Option<Application>, DatastoreError> {
        Err(Self::backend_down())
    }

    async fn insert(&self, _fields: &ApplicationCreate) -> Result<Application, DatastoreError> {
        Err(Self::backend_down())
    }

    async fn update(
        &self,
        _application_id: Uuid,
        _fields: &ApplicationUpdate,
    ) -> Result<Option<Application>, DatastoreError> {
        Err(Self::backend_down())
    }

    async fn delete(&self, _application_id: Uuid) -> Result<bool, DatastoreError> {
        Err(Self::backend_down())
    }

    async fn delete_by_user(&self, _user_id: &str) -> Result<u64, DatastoreError> {
        Err(Self::backend_down())
    }
}

fn test_config(api_key: Option<&str>) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        frontend_url: None,
        api_key: api_key.map(str::to_string),
        database_url: "http://localhost:54321".parse().expect("url"),
        database_key: "test-anon-key".to_string(),
    }
}

/// Router wired to a fresh in-memory store, guarded by TEST_API_KEY.
pub fn test_app() -> Router {
    app_with_key(Some(TEST_API_KEY))
}

/// Router with an arbitrary (or absent) configured secret.
pub fn app_with_key(api_key: Option<&str>) -> Router {
    let state = AppState::new(test_config(api_key), Arc::new(MemoryStore::default()));
    job_tracker_api::app(state)
}

/// Router whose datastore fails every call, guarded by TEST_API_KEY.
pub fn failing_app() -> Router {
    let state = AppState::new(test_config(Some(TEST_API_KEY)), Arc::new(FailingStore));
    job_tracker_api::app(state)
}

/// Drive one request through the router and decode the response. Non-JSON
/// bodies (e.g. extractor rejections) come back as a JSON string.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    key: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", key));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");

    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, value)
}

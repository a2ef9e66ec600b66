use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use url::Url;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::{Application, ApplicationCreate, ApplicationUpdate};

use super::{Datastore, DatastoreError};

const TABLE: &str = "applications";

/// REST client for the managed datastore, speaking the PostgREST wire
/// protocol: `column=eq.value` filters, `Prefer: return=representation` on
/// mutations so affected rows come back in the response body.
pub struct SupabaseStore {
    http: reqwest::Client,
    table_url: Url,
}

impl SupabaseStore {
    pub fn new(config: &AppConfig) -> Result<Self, DatastoreError> {
        let invalid_key =
            || DatastoreError::Credentials("access key contains invalid header characters".into());

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.database_key).map_err(|_| invalid_key())?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.database_key))
                .map_err(|_| invalid_key())?,
        );

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        // A relative join would drop a non-slash-terminated path segment in
        // the configured URL, so normalize the base first.
        let mut base = config.database_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let table_url = base.join(&format!("rest/v1/{}", TABLE))?;

        Ok(Self { http, table_url })
    }

    /// Decode a PostgREST response into rows, turning non-2xx statuses into
    /// a backend error carrying the response body.
    async fn rows(res: reqwest::Response) -> Result<Vec<Application>, DatastoreError> {
        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(DatastoreError::Backend {
                status: status.as_u16(),
                message,
            });
        }
        Ok(res.json().await?)
    }
}

#[async_trait]
impl Datastore for SupabaseStore {
    async fn list_all(&self) -> Result<Vec<Application>, DatastoreError> {
        let res = self
            .http
            .get(self.table_url.clone())
            .query(&[("select", "*")])
            .send()
            .await?;
        Self::rows(res).await
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Application>, DatastoreError> {
        let filter = format!("eq.{}", user_id);
        let res = self
            .http
            .get(self.table_url.clone())
            .query(&[("select", "*"), ("user_id", filter.as_str())])
            .send()
            .await?;
        Self::rows(res).await
    }

    async fn get(&self, application_id: Uuid) -> Result<Option<Application>, DatastoreError> {
        let filter = format!("eq.{}", application_id);
        let res = self
            .http
            .get(self.table_url.clone())
            .query(&[("select", "*"), ("application_id", filter.as_str())])
            .send()
            .await?;
        Ok(Self::rows(res).await?.into_iter().next())
    }

    async fn insert(&self, fields: &ApplicationCreate) -> Result<Application, DatastoreError> {
        let res = self
            .http
            .post(self.table_url.clone())
            .header("Prefer", "return=representation")
            .json(fields)
            .send()
            .await?;
        Self::rows(res)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DatastoreError::Decode("insert returned no rows".to_string()))
    }

    async fn update(
        &self,
        application_id: Uuid,
        fields: &ApplicationUpdate,
    ) -> Result<Option<Application>, DatastoreError> {
        let filter = format!("eq.{}", application_id);
        let res = self
            .http
            .patch(self.table_url.clone())
            .query(&[("application_id", filter.as_str())])
            .header("Prefer", "return=representation")
            .json(fields)
            .send()
            .await?;
        Ok(Self::rows(res).await?.into_iter().next())
    }

    async fn delete(&self, application_id: Uuid) -> Result<bool, DatastoreError> {
        let filter = format!("eq.{}", application_id);
        let res = self
            .http
            .delete(self.table_url.clone())
            .query(&[("application_id", filter.as_str())])
            .header("Prefer", "return=representation")
            .send()
            .await?;
        Ok(!Self::rows(res).await?.is_empty())
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<u64, DatastoreError> {
        let filter = format!("eq.{}", user_id);
        let res = self
            .http
            .delete(self.table_url.clone())
            .query(&[("user_id", filter.as_str())])
            .header("Prefer", "return=representation")
            .send()
            .await?;
        Ok(Self::rows(res).await?.len() as u64)
    }
}

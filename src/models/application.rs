use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Valid status values for a job application. Anything outside this set is
/// rejected at the JSON boundary before it can reach the datastore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Interested,
    Applied,
    Interviewing,
    Offer,
    Rejected,
    Accepted,
}

/// A stored job application, as returned by the datastore.
///
/// `application_id` and the timestamps are assigned by the datastore and are
/// never client-supplied. `user_id` is caller-supplied and not checked
/// against an identity service by this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub application_id: Uuid,
    pub user_id: String,
    pub company_name: Option<String>,
    pub recruiter: Option<String>,
    pub job_title: Option<String>,
    pub job_url: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub applied_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields accepted when creating an application.
///
/// Unset fields are skipped on serialization so the insert only carries the
/// columns the client actually supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationCreate {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields accepted when updating an application. Everything is optional;
/// absent fields leave the stored value untouched (partial update, not
/// replace).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

//! API client for the member store REST API.
//!
//! This module provides the `ApiClient` struct for authenticating and for
//! listing, creating, fetching and deleting members.

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::SessionData;
use crate::models::{MemberId, MemberRecord};

use super::{ApiError, MemberStore};

// ============================================================================
// Constants
// ============================================================================

/// Default base URL of the member store
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// HTTP request timeout in seconds.
/// A timed-out request is reported once as a network error and never retried.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Some store versions answer a create with `{"id": ..}` or `{"member": {..}}`
/// instead of the full record.
#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: Option<MemberId>,
    member: Option<MemberRecord>,
}

/// API client for the member store.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Create a client bound to a session, sharing the connection pool.
    pub fn with_session(&self, session: &SessionData) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(session.token.clone()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build a request carrying the bearer token.
    /// Without a token the request is never sent and reported as an expired session.
    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::Unauthorized)?;
        Ok(self
            .client
            .request(method, self.url(path))
            .bearer_auth(token))
    }

    /// Authenticate and return a new session.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionData, ApiError> {
        let url = self.url("auth/login");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Login rejected");
            return Err(match ApiError::from_status(status, &body) {
                // A 401 here means bad credentials, not an expired session
                ApiError::Unauthorized => {
                    ApiError::Validation("Invalid username or password".to_string())
                }
                other => other,
            });
        }

        let login: LoginResponse = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse login response: {}", e))
        })?;

        Ok(SessionData {
            token: login.token,
            username: username.to_string(),
            api_base_url: self.base_url.clone(),
            created_at: Utc::now(),
        })
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse_json<T: DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
    }

    // ===== Member operations =====

    /// Fetch all members, in store order
    pub async fn fetch_members(&self) -> Result<Vec<MemberRecord>, ApiError> {
        let response = self.authorized(Method::GET, "members")?.send().await?;
        let response = Self::check_response(response).await?;
        let members: Vec<MemberRecord> = Self::parse_json(response, "member list").await?;
        debug!(count = members.len(), "Members fetched");
        Ok(members)
    }

    /// Fetch one member with every field
    pub async fn fetch_member(&self, id: &MemberId) -> Result<MemberRecord, ApiError> {
        let path = format!("members/{}", id);
        let response = self.authorized(Method::GET, &path)?.send().await?;
        let response = Self::check_response(response).await?;
        Self::parse_json(response, "member").await
    }

    /// Submit a new member; returns the stored record with its assigned id
    pub async fn add_member(&self, member: &MemberRecord) -> Result<MemberRecord, ApiError> {
        let response = self
            .authorized(Method::POST, "members")?
            .json(member)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let value: serde_json::Value = Self::parse_json(response, "created member").await?;
        Ok(Self::created_record(member, value))
    }

    fn created_record(submitted: &MemberRecord, value: serde_json::Value) -> MemberRecord {
        if let Ok(record) = serde_json::from_value::<MemberRecord>(value.clone()) {
            if record.id.is_some() && record.full_name.is_some() {
                return record;
            }
        }
        let mut created = submitted.clone();
        if let Ok(resp) = serde_json::from_value::<CreateResponse>(value) {
            created.id = resp.member.and_then(|m| m.id).or(resp.id);
        }
        if created.id.is_none() {
            warn!("Create response carried no member id");
        }
        created
    }

    pub async fn delete_member_by_id(&self, id: &MemberId) -> Result<(), ApiError> {
        let path = format!("members/{}", id);
        let response = self.authorized(Method::DELETE, &path)?.send().await?;
        Self::check_response(response).await?;
        debug!(id = %id, "Member deleted");
        Ok(())
    }
}

impl MemberStore for ApiClient {
    async fn list_members(&self) -> Result<Vec<MemberRecord>, ApiError> {
        self.fetch_members().await
    }

    async fn create_member(&self, member: &MemberRecord) -> Result<MemberRecord, ApiError> {
        self.add_member(member).await
    }

    async fn get_member(&self, id: &MemberId) -> Result<MemberRecord, ApiError> {
        self.fetch_member(id).await
    }

    async fn delete_member(&self, id: &MemberId) -> Result<(), ApiError> {
        self.delete_member_by_id(id).await
    }
}

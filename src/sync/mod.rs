// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Remote label service client.
//!
//! Three calls, each 1:1 with a user action: create-or-rename (POST),
//! delete (DELETE with a JSON body), and usage count (GET). The service
//! accepts `parentId` in request bodies but answers with `parent_id`; both
//! spellings are preserved here because the service predates this client.

use std::fmt;

use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use crate::model::LabelId;

pub const ENV_LABEL_ENDPOINT: &str = "DRYAD_LABEL_ENDPOINT";
pub const ENV_CASE_COUNT_ENDPOINT: &str = "DRYAD_CASE_COUNT_ENDPOINT";
pub const ENV_AUTH_TOKEN: &str = "DRYAD_AUTH_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    label_endpoint: String,
    case_count_endpoint: String,
    auth_token: String,
}

impl SyncConfig {
    pub fn new(
        label_endpoint: impl Into<String>,
        case_count_endpoint: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            label_endpoint: label_endpoint.into(),
            case_count_endpoint: case_count_endpoint.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Read the endpoints and auth token from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            label_endpoint: env_var(ENV_LABEL_ENDPOINT)?,
            case_count_endpoint: env_var(ENV_CASE_COUNT_ENDPOINT)?,
            auth_token: env_var(ENV_AUTH_TOKEN)?,
        })
    }

    pub fn label_endpoint(&self) -> &str {
        &self.label_endpoint
    }

    pub fn case_count_endpoint(&self) -> &str {
        &self.case_count_endpoint
    }
}

fn env_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar { name }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingVar { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar { name } => write!(f, "missing environment variable {name}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The persisted (created or renamed) label as the service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub id: LabelId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<LabelId>,
}

#[derive(Debug, Serialize)]
struct SaveLabelRequest<'a> {
    id: Option<&'a str>,
    name: &'a str,
    #[serde(rename = "parentId")]
    parent_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DeleteLabelRequest<'a> {
    id: &'a str,
}

#[derive(Debug, Deserialize)]
struct UsageCountResponse {
    count: u64,
}

#[derive(Debug, Default, Deserialize)]
struct FailureBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The request never produced a response (connect/timeout/etc.).
    Transport { detail: String },
    /// The service answered with a non-success status; `message` carries the
    /// failure body's message field when one was present.
    Status { status: u16, message: Option<String> },
    /// The response body did not match the expected shape.
    Decode { detail: String },
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { detail } => write!(f, "label service unreachable: {detail}"),
            Self::Status { status, message } => match message {
                Some(message) => write!(f, "label service rejected the request ({status}): {message}"),
                None => write!(f, "label service rejected the request ({status})"),
            },
            Self::Decode { detail } => write!(f, "unexpected label service response: {detail}"),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode {
                detail: err.to_string(),
            }
        } else {
            Self::Transport {
                detail: err.to_string(),
            }
        }
    }
}

/// Thin client over the remote label service.
#[derive(Debug, Clone)]
pub struct LabelSyncClient {
    http: reqwest::Client,
    config: SyncConfig,
}

impl LabelSyncClient {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Persist a label: `id == None` creates, `id == Some` renames. The
    /// service may issue a different id on rename; callers must adopt the
    /// returned record's id.
    pub async fn create_or_rename(
        &self,
        id: Option<&LabelId>,
        name: &str,
        parent_id: Option<&LabelId>,
    ) -> Result<LabelRecord, SyncError> {
        tracing::debug!(id = id.map(LabelId::as_str), name, "saving label");
        let request = SaveLabelRequest {
            id: id.map(LabelId::as_str),
            name,
            parent_id: parent_id.map(LabelId::as_str),
        };

        let response = self
            .http
            .post(&self.config.label_endpoint)
            .header(AUTHORIZATION, self.config.auth_token.as_str())
            .json(&request)
            .send()
            .await?;
        let response = error_for_status(response).await?;
        Ok(response.json::<LabelRecord>().await?)
    }

    pub async fn delete(&self, id: &LabelId) -> Result<(), SyncError> {
        tracing::debug!(id = id.as_str(), "deleting label");
        let request = DeleteLabelRequest { id: id.as_str() };

        let response = self
            .http
            .delete(&self.config.label_endpoint)
            .header(AUTHORIZATION, self.config.auth_token.as_str())
            .json(&request)
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }

    /// How many collection entries currently use the label. Deletion is
    /// vetoed while this is non-zero.
    pub async fn usage_count(&self, id: &LabelId) -> Result<u64, SyncError> {
        tracing::debug!(id = id.as_str(), "fetching label usage count");
        let response = self
            .http
            .get(&self.config.case_count_endpoint)
            .query(&[("label_id", id.as_str())])
            .header(AUTHORIZATION, self.config.auth_token.as_str())
            .send()
            .await?;
        let response = error_for_status(response).await?;
        let body = response.json::<UsageCountResponse>().await?;
        Ok(body.count)
    }
}

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, SyncError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<FailureBody>(&body).ok())
        .and_then(|body| body.message);
    tracing::debug!(status = status.as_u16(), ?message, "label service failure");
    Err(SyncError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, LabelRecord, SaveLabelRequest, SyncConfig, SyncError, ENV_AUTH_TOKEN,
        ENV_CASE_COUNT_ENDPOINT, ENV_LABEL_ENDPOINT,
    };

    #[test]
    fn config_from_env_reads_all_three_vars() {
        // One test covers both outcomes: env vars are process-global, and a
        // second test mutating them in parallel would race.
        std::env::remove_var(ENV_LABEL_ENDPOINT);
        std::env::remove_var(ENV_CASE_COUNT_ENDPOINT);
        std::env::remove_var(ENV_AUTH_TOKEN);

        assert_eq!(
            SyncConfig::from_env(),
            Err(ConfigError::MissingVar {
                name: ENV_LABEL_ENDPOINT
            })
        );

        std::env::set_var(ENV_LABEL_ENDPOINT, "http://localhost/labels");
        std::env::set_var(ENV_CASE_COUNT_ENDPOINT, "http://localhost/case-count");
        std::env::set_var(ENV_AUTH_TOKEN, "token");

        let config = SyncConfig::from_env().expect("config");
        assert_eq!(config.label_endpoint(), "http://localhost/labels");
        assert_eq!(config.case_count_endpoint(), "http://localhost/case-count");

        std::env::remove_var(ENV_LABEL_ENDPOINT);
        std::env::remove_var(ENV_CASE_COUNT_ENDPOINT);
        std::env::remove_var(ENV_AUTH_TOKEN);
    }

    #[test]
    fn save_request_uses_the_service_casing() {
        let request = SaveLabelRequest {
            id: None,
            name: "default",
            parent_id: Some("7"),
        };
        let json = serde_json::to_string(&request).expect("serialize");
        assert_eq!(json, r#"{"id":null,"name":"default","parentId":"7"}"#);
    }

    #[test]
    fn label_record_accepts_numeric_ids_and_missing_parent() {
        let record: LabelRecord =
            serde_json::from_str(r#"{"id": 12, "name": "default", "extra": true}"#)
                .expect("deserialize");
        assert_eq!(record.id.as_str(), "12");
        assert_eq!(record.name, "default");
        assert_eq!(record.parent_id, None);

        let record: LabelRecord =
            serde_json::from_str(r#"{"id": "12", "name": "default", "parent_id": 7}"#)
                .expect("deserialize");
        assert_eq!(record.parent_id.map(|id| id.into_string()), Some("7".to_owned()));
    }

    #[test]
    fn sync_error_display_carries_the_service_message() {
        let err = SyncError::Status {
            status: 409,
            message: Some("label name already taken".to_owned()),
        };
        assert_eq!(
            err.to_string(),
            "label service rejected the request (409): label name already taken"
        );
    }
}

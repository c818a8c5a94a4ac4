//! Per-target dispatch outcome.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use relay_core::types::ApplicationId;

/// Outcome of sending one notification payload to one application.
///
/// `success` reflects the HTTP status of the response when the transport
/// succeeded; transport failures carry `error` and no status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    /// Target application.
    pub application_id: ApplicationId,
    /// Target application name at send time.
    pub application_name: String,
    /// Whether the target acknowledged with a success status.
    pub success: bool,
    /// HTTP status returned by the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Number of users included in the payload.
    pub user_count: usize,
    /// Response body (JSON when parseable, else a string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_data: Option<Value>,
    /// Transport error description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    /// Result for a request that reached the target.
    pub fn responded(
        application_id: ApplicationId,
        application_name: impl Into<String>,
        status_code: u16,
        user_count: usize,
        response_data: Value,
    ) -> Self {
        Self {
            application_id,
            application_name: application_name.into(),
            success: (200..300).contains(&status_code),
            status_code: Some(status_code),
            user_count,
            response_data: Some(response_data),
            error: None,
        }
    }

    /// Result for a request that never produced a response.
    pub fn failed(
        application_id: ApplicationId,
        application_name: impl Into<String>,
        user_count: usize,
        error: impl Into<String>,
    ) -> Self {
        Self {
            application_id,
            application_name: application_name.into(),
            success: false,
            status_code: None,
            user_count,
            response_data: None,
            error: Some(error.into()),
        }
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Step of the support chat widget
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum SupportState {
    #[default]
    Browsing,
    ReportingIssue,
    CollectingEmail { issue: String },
    Sent {
        #[serde(rename = "ticketId")]
        ticket_id: String,
    },
}

/// One line of the chat transcript attached to a ticket
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranscriptEntry {
    pub role: String,
    pub text: String,
}

/// Request body for reporting an issue directly
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportIssueRequest {
    pub email: String,
    pub message: String,
    pub category: Option<String>,
    #[serde(default)]
    pub transcript: Vec<TranscriptEntry>,
}

/// Response for a submitted issue
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportIssueResponse {
    pub success: bool,
    #[serde(rename = "ticketId")]
    pub ticket_id: String,
    #[serde(rename = "emailId")]
    pub email_id: String,
}

/// Request body for one chat widget turn
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SupportChatRequest {
    /// `{"step": "browsing" | "reporting-issue" | "collecting-email" | "sent", ...}`
    #[serde(default)]
    #[schema(value_type = Object)]
    pub state: SupportState,
    pub message: String,
}

/// Response for one chat widget turn
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SupportChatResponse {
    #[schema(value_type = Object)]
    pub state: SupportState,
    pub reply: String,
    #[serde(rename = "ticketId", skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
}

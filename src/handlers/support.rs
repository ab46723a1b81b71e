use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use tracing::{error, info};

use crate::{
    models::{
        error_response, json_rejection, ApiError, ReportIssueRequest, ReportIssueResponse, SupportChatRequest,
        SupportChatResponse, SupportState,
    },
    services::{
        support_chat::{advance, new_ticket_id, sent_reply, ticket_email, ChatAction, Ticket},
        validation::is_valid_email,
    },
    state::AppState,
};

/// Email an issue report to the support inbox
pub async fn report_issue(
    State(state): State<AppState>,
    payload: Result<Json<ReportIssueRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReportIssueResponse>), ApiError> {

    let Json(request) = payload.map_err(json_rejection)?;
    if request.message.trim().is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "Please describe the issue."));
    }
    if !is_valid_email(&request.email) {
        return Err(error_response(StatusCode::BAD_REQUEST, "Please provide a valid email address."));
    }

    let ticket_id = new_ticket_id();
    let message = ticket_email(
        &Ticket {
            ticket_id: &ticket_id,
            email: &request.email,
            message: &request.message,
            category: request.category.as_deref(),
            transcript: &request.transcript,
        },
        &state.config.email_from,
        &state.config.support_email_to,
    );
    let email_id = state.email.send(&message).await?;

    info!("Issue report {} submitted", ticket_id);
    Ok((
        StatusCode::OK,
        Json(ReportIssueResponse { success: true, ticket_id, email_id }),
    ))
}

/// One turn of the support chat widget
pub async fn support_chat(
    State(state): State<AppState>,
    payload: Result<Json<SupportChatRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SupportChatResponse>), ApiError> {

    let Json(request) = payload.map_err(json_rejection)?;
    let transition = advance(&request.state, &request.message);

    let Some(ChatAction::SendTicket { issue, email }) = transition.action else {
        return Ok((
            StatusCode::OK,
            Json(SupportChatResponse { state: transition.next, reply: transition.reply, ticket_id: None }),
        ));
    };

    let ticket_id = new_ticket_id();
    let message = ticket_email(
        &Ticket {
            ticket_id: &ticket_id,
            email: &email,
            message: &issue,
            category: Some("chat"),
            transcript: &[],
        },
        &state.config.email_from,
        &state.config.support_email_to,
    );

    // The state stays at CollectingEmail when sending fails so the client can retry
    if let Err(e) = state.email.send(&message).await {
        error!("Failed to send chat ticket {}: {}", ticket_id, e);
        return Err(e.into());
    }

    info!("Chat ticket {} submitted", ticket_id);
    Ok((
        StatusCode::OK,
        Json(SupportChatResponse {
            reply: sent_reply(&ticket_id),
            state: SupportState::Sent { ticket_id: ticket_id.clone() },
            ticket_id: Some(ticket_id),
        }),
    ))
}

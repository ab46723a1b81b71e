use uuid::Uuid;

use super::validation::is_valid_email;
use crate::clients::email_client::EmailMessage;
use crate::models::{SupportState, TranscriptEntry};

const REPORT_KEYWORDS: [&str; 6] = ["report", "issue", "problem", "bug", "not working", "error"];
const CANCEL_KEYWORDS: [&str; 3] = ["cancel", "stop", "never mind"];

pub const GREETING: &str = "Hi! I'm the MediBot assistant. You can analyze a skin photo, identify a medicine, \
    or find a dermatologist near you. Type \"report an issue\" if something isn't working.";
pub const ASK_ISSUE: &str = "Sorry to hear that. Please describe the issue you ran into.";
pub const ASK_EMAIL: &str = "Thanks. What email address can our support team reach you at?";
pub const INVALID_EMAIL: &str = "That doesn't look like a valid email address. Please try again, or type \"cancel\".";
pub const EMPTY_ISSUE: &str = "Please type a short description of the issue, or type \"cancel\".";
pub const CANCELLED: &str = "No problem, the report was cancelled. Anything else I can help with?";

/// Side effect the handler must perform for a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    SendTicket { issue: String, email: String },
}

/// Outcome of feeding one message to the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: SupportState,
    pub reply: String,
    pub action: Option<ChatAction>,
}

impl Transition {
    fn to(next: SupportState, reply: &str) -> Self {
        Self { next, reply: reply.to_string(), action: None }
    }
}

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    let text = text.to_lowercase();
    keywords.iter().any(|k| text.contains(k))
}

/// Only a message that is nothing but a cancel keyword backs out of a report
fn is_cancel(text: &str) -> bool {
    let text = text.trim().trim_end_matches(['.', '!']).trim();
    CANCEL_KEYWORDS.iter().any(|k| text.eq_ignore_ascii_case(k))
}

/// Advance the widget by one user message.
///
/// `SendTicket` leaves the state at `CollectingEmail`; the caller moves to
/// `Sent` once the ticket email has gone out.
pub fn advance(state: &SupportState, input: &str) -> Transition {
    let input = input.trim();
    match state {
        SupportState::Browsing | SupportState::Sent { .. } => {
            if mentions_any(input, &REPORT_KEYWORDS) {
                Transition::to(SupportState::ReportingIssue, ASK_ISSUE)
            } else {
                Transition::to(SupportState::Browsing, GREETING)
            }
        }
        SupportState::ReportingIssue => {
            if is_cancel(input) {
                Transition::to(SupportState::Browsing, CANCELLED)
            } else if input.is_empty() {
                Transition::to(SupportState::ReportingIssue, EMPTY_ISSUE)
            } else {
                Transition::to(SupportState::CollectingEmail { issue: input.to_string() }, ASK_EMAIL)
            }
        }
        SupportState::CollectingEmail { issue } => {
            if is_valid_email(input) {
                Transition {
                    next: state.clone(),
                    reply: String::new(),
                    action: Some(ChatAction::SendTicket { issue: issue.clone(), email: input.to_string() }),
                }
            } else if is_cancel(input) {
                Transition::to(SupportState::Browsing, CANCELLED)
            } else {
                Transition::to(state.clone(), INVALID_EMAIL)
            }
        }
    }
}

pub fn sent_reply(ticket_id: &str) -> String {
    format!("Your report has been sent (ticket {}). We'll get back to you by email.", ticket_id)
}

/// Short reference quoted back to the user, e.g. "MB-1A2B3C4D"
pub fn new_ticket_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("MB-{}", id[..8].to_uppercase())
}

/// Fields of a support ticket email
pub struct Ticket<'a> {
    pub ticket_id: &'a str,
    pub email: &'a str,
    pub message: &'a str,
    pub category: Option<&'a str>,
    pub transcript: &'a [TranscriptEntry],
}

/// Compose the email delivered to the support inbox
pub fn ticket_email(ticket: &Ticket<'_>, from: &str, to: &str) -> EmailMessage {
    let category = ticket.category.map(str::trim).filter(|c| !c.is_empty()).unwrap_or("general");
    let mut text = format!(
        "Ticket: {}\nFrom: {}\nCategory: {}\n\n{}\n",
        ticket.ticket_id, ticket.email.trim(), category, ticket.message.trim()
    );
    if !ticket.transcript.is_empty() {
        text.push_str("\n--- Chat transcript ---\n");
        for entry in ticket.transcript {
            text.push_str(&format!("{}: {}\n", entry.role, entry.text));
        }
    }

    EmailMessage {
        from: from.to_string(),
        to: vec![to.to_string()],
        subject: format!("[MediBot] Issue report {} ({})", ticket.ticket_id, category),
        text,
        reply_to: Some(ticket.email.trim().to_string()),
    }
}

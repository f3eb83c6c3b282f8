//! Slack Web API surface used by the notifier.

pub mod client;
pub mod message;

pub use client::{DEFAULT_API_BASE, MessagePoster, PostedMessage, SlackClient, SlackError};
pub use message::{
    APPROVAL_CALLBACK_ID, APPROVE_ACTION, ActionButton, ActionKind, ApprovalDecision, Attachment,
    ButtonStyle, MessageError, PostMessageRequest, REJECT_ACTION, approval_text,
};

//! Outbound `chat.postMessage` request bodies.
//!
//! Approval requests use legacy interactive attachments: a single attachment
//! carrying an approve and a reject button under one callback id. Whatever
//! handles the button click has to agree on [`APPROVAL_CALLBACK_ID`],
//! [`APPROVE_ACTION`] and [`REJECT_ACTION`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Callback id shared by both approval buttons.
pub const APPROVAL_CALLBACK_ID: &str = "approval_action";
/// Button name and value sent back when a reviewer approves.
pub const APPROVE_ACTION: &str = "approve";
/// Button name and value sent back when a reviewer rejects.
pub const REJECT_ACTION: &str = "reject";

const APPROVAL_PROMPT: &str = "Approve or Reject this deployment";
const APPROVAL_FALLBACK: &str = "Unable to approve";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMessageRequest {
    pub channel: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl PostMessageRequest {
    /// Plain text notification.
    pub fn text(channel: &str, message: &str) -> Result<Self, MessageError> {
        Ok(Self {
            channel: non_empty("channel", channel)?,
            text: non_empty("message", message)?,
            attachments: Vec::new(),
        })
    }

    /// Deployment approval request for a built image tag.
    pub fn approval(channel: &str, image_tag: &str) -> Result<Self, MessageError> {
        let channel = non_empty("channel", channel)?;
        let image_tag = non_empty("image tag", image_tag)?;
        Ok(Self {
            channel,
            text: approval_text(&image_tag),
            attachments: vec![Attachment::approval()],
        })
    }
}

pub fn approval_text(image_tag: &str) -> String {
    format!("Docker image *{image_tag}* is ready for production push.")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub text: String,
    pub fallback: String,
    pub callback_id: String,
    pub actions: Vec<ActionButton>,
}

impl Attachment {
    fn approval() -> Self {
        Self {
            text: APPROVAL_PROMPT.into(),
            fallback: APPROVAL_FALLBACK.into(),
            callback_id: APPROVAL_CALLBACK_ID.into(),
            actions: vec![
                ApprovalDecision::Approve.button(),
                ApprovalDecision::Reject.button(),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    pub name: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub value: String,
    pub style: ButtonStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Button,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
    Danger,
}

/// The two answers a reviewer can give to an approval request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approve,
    Reject,
}

impl ApprovalDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalDecision::Approve => APPROVE_ACTION,
            ApprovalDecision::Reject => REJECT_ACTION,
        }
    }

    fn button(self) -> ActionButton {
        let (label, style) = match self {
            ApprovalDecision::Approve => ("Approve ✅", ButtonStyle::Primary),
            ApprovalDecision::Reject => ("Reject ❌", ButtonStyle::Danger),
        };
        ActionButton {
            name: self.as_str().into(),
            text: label.into(),
            kind: ActionKind::Button,
            value: self.as_str().into(),
            style,
        }
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<String, MessageError> {
    if value.trim().is_empty() {
        Err(MessageError::Empty(field))
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn text_request_has_no_attachments_key() {
        let req = PostMessageRequest::text("C123", "hello").unwrap();
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, json!({"channel": "C123", "text": "hello"}));
    }

    #[test]
    fn approval_request_embeds_tag_and_two_buttons() {
        let req = PostMessageRequest::approval("C123", "v1.2.3").unwrap();
        assert!(req.text.contains("v1.2.3"));

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["attachments"].as_array().unwrap().len(), 1);
        let attachment = &body["attachments"][0];
        assert_eq!(attachment["callback_id"], APPROVAL_CALLBACK_ID);
        let values: Vec<&str> = attachment["actions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["value"].as_str().unwrap())
            .collect();
        assert_eq!(values, vec!["approve", "reject"]);
    }

    #[test]
    fn approval_buttons_match_slack_shape() {
        let req = PostMessageRequest::approval("C123", "sha-abc").unwrap();
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body["attachments"][0]["actions"][0],
            json!({
                "name": "approve",
                "text": "Approve ✅",
                "type": "button",
                "value": "approve",
                "style": "primary"
            })
        );
        assert_eq!(body["attachments"][0]["actions"][1]["style"], "danger");
        assert_eq!(
            body["attachments"][0]["fallback"],
            Value::String("Unable to approve".into())
        );
        assert_eq!(
            body["text"],
            "Docker image *sha-abc* is ready for production push."
        );
    }

    #[test]
    fn rejects_blank_fields() {
        assert_eq!(
            PostMessageRequest::text("", "hi").unwrap_err(),
            MessageError::Empty("channel")
        );
        assert_eq!(
            PostMessageRequest::text("C1", "  ").unwrap_err(),
            MessageError::Empty("message")
        );
        assert_eq!(
            PostMessageRequest::approval("C1", "").unwrap_err().to_string(),
            "image tag must not be empty"
        );
    }
}

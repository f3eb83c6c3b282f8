//! Posts one Slack message per invocation and reports the result to the
//! runner. Send failures never escape: both modes turn them into a failed
//! step.

use crate::actions::Reporter;
use crate::slack::{MessagePoster, PostMessageRequest, PostedMessage};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Approval,
    Simple,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Approval => "approval",
            Mode::Simple => "simple",
        }
    }

    fn sent_line(&self, ts: &str) -> String {
        match self {
            Mode::Approval => format!("✅ Approval request sent to Slack (ts: {ts})"),
            Mode::Simple => format!("✅ Message sent to Slack (ts: {ts})"),
        }
    }

    fn failed_line(&self, reason: &dyn std::fmt::Display) -> String {
        match self {
            Mode::Approval => format!("❌ Slack approval request failed: {reason}"),
            Mode::Simple => format!("❌ Slack message failed: {reason}"),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Outcome {
    Sent(PostedMessage),
    Failed { message: String },
}

impl Outcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Outcome::Sent(_))
    }

    pub fn ts(&self) -> Option<&str> {
        match self {
            Outcome::Sent(posted) => Some(posted.ts.as_str()),
            Outcome::Failed { .. } => None,
        }
    }
}

pub struct Notifier<P, R> {
    poster: P,
    reporter: R,
}

impl<P, R> Notifier<P, R>
where
    P: MessagePoster,
    R: Reporter,
{
    pub fn new(poster: P, reporter: R) -> Self {
        Self { poster, reporter }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Asks for approval to push `image_tag` to production.
    pub async fn send_approval(&mut self, channel: &str, image_tag: &str) -> Outcome {
        let request = PostMessageRequest::approval(channel, image_tag);
        self.dispatch(Mode::Approval, request).await
    }

    pub async fn send_simple(&mut self, channel: &str, message: &str) -> Outcome {
        let request = PostMessageRequest::text(channel, message);
        self.dispatch(Mode::Simple, request).await
    }

    async fn dispatch<E>(&mut self, mode: Mode, request: Result<PostMessageRequest, E>) -> Outcome
    where
        E: std::fmt::Display,
    {
        let request = match request {
            Ok(request) => request,
            Err(err) => return self.fail(mode, &err),
        };

        match self.poster.post_message(&request).await {
            Ok(posted) => {
                tracing::debug!(mode = mode.as_str(), ts = %posted.ts, "slack message posted");
                self.reporter.info(&mode.sent_line(&posted.ts));
                self.reporter.set_output("ts", &posted.ts);
                let channel = posted.channel.as_deref().unwrap_or(&request.channel);
                self.reporter.set_output("channel", channel);
                Outcome::Sent(posted)
            }
            Err(err) => {
                tracing::warn!(mode = mode.as_str(), error = %err, "slack send failed");
                self.fail(mode, &err)
            }
        }
    }

    fn fail(&mut self, mode: Mode, reason: &dyn std::fmt::Display) -> Outcome {
        let message = mode.failed_line(reason);
        self.reporter.set_failed(&message);
        Outcome::Failed { message }
    }
}

//! Mailbox summarization via sampling.
//!
//! The one delegating tool in the set: it bundles a fixed pair of
//! sample emails into a sampling request and asks the original caller
//! to produce the summary. Requires the caller to have advertised
//! sampling support.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use host::sampling::{Content, SamplingMessage, SamplingRequest};
use host::{InvocationArgs, InvocationContext, ToolDescriptor, ToolError, ToolHandler};
use serde_json::Value;
use tracing::{debug, info};

const SUMMARY_SYSTEM_PROMPT: &str = "You are a helpful assistant. You will be provided with a \
    list of emails. Please summarize them. Each email is followed by its attachments.";

/// A sample email with binary attachments.
struct Email {
    sender: &'static str,
    subject: &'static str,
    body: &'static str,
    attachments: &'static [&'static [u8]],
}

// Stand-ins for the embedded report images a real mailbox would carry.
const SALES_REPORT: &[u8] = b"\x89PNG\r\n\x1a\nCarretera sales figures, Jan-Jun 2014";
const BIRTHDAY_LIST: &[u8] = b"\x89PNG\r\n\x1a\nEmployee birthdays and positions";

const SAMPLE_EMAILS: &[Email] = &[
    Email {
        sender: "sales.report@example.com",
        subject: "Carretera Sales Report - Jan & Jun 2014",
        body: "Hi there, I hope this email finds you well! Please find attached the sales \
               report for the first half of 2014. Please review the report and provide your \
               feedback today, if possible. By the way, we're having a BBQ this Saturday at \
               my place, and you're welcome to join. Let me know if you can make it!",
        attachments: &[SALES_REPORT],
    },
    Email {
        sender: "hr.department@example.com",
        subject: "Employee Birthdays and Positions",
        body: "Attached is the list of employee birthdays and their positions. Please check \
               it and let me know of any updates by tomorrow. Also, we're planning a hike \
               this Sunday morning. It would be great if you could join us. Let me know if \
               you're interested!",
        attachments: &[BIRTHDAY_LIST],
    },
];

/// Summarizes unread emails by delegating to the caller.
pub struct SummarizeUnreadEmailsTool;

impl SummarizeUnreadEmailsTool {
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "summarize_unread_emails",
            "Summarizes unread emails in the mailbox, delegating the summary to the caller.",
        )
    }
}

/// Build the sampling request: each email's text first, then its
/// attachments, in mailbox order.
fn build_request(emails: &[Email]) -> SamplingRequest {
    let mut request = SamplingRequest::new()
        .with_system_prompt(SUMMARY_SYSTEM_PROMPT)
        .with_temperature(0.0);

    for email in emails {
        let text = format!(
            "Email from {} with subject {}. Body: {}",
            email.sender, email.subject, email.body
        );
        request = request.with_message(SamplingMessage::user(Content::text(text)));

        for attachment in email.attachments {
            request = request.with_message(SamplingMessage::user(Content::image(
                BASE64.encode(attachment),
                "image/png",
            )));
        }
    }

    request
}

#[async_trait]
impl ToolHandler for SummarizeUnreadEmailsTool {
    async fn call(&self, _args: InvocationArgs, cx: &InvocationContext) -> anyhow::Result<Value> {
        if !cx.supports_sampling() {
            return Err(ToolError::CapabilityUnavailable(
                "caller does not support sampling".to_string(),
            )
            .into());
        }

        info!("summarizing unread emails");
        let request = build_request(SAMPLE_EMAILS);
        debug!(messages = request.messages.len(), "sending sampling request");

        let response = cx.request_sampling(request).await?;

        let Some(summary) = response.as_text() else {
            anyhow::bail!("caller returned non-text sampling content");
        };
        if summary.trim().is_empty() {
            anyhow::bail!("caller returned an empty summary");
        }

        info!("email summarization completed");
        Ok(Value::String(summary.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use host::{CallbackChannel, SamplingResponse};
    use tokio_util::sync::CancellationToken;

    #[test]
    fn request_orders_each_email_before_its_attachments() {
        let request = build_request(SAMPLE_EMAILS);
        assert_eq!(request.system_prompt.as_deref(), Some(SUMMARY_SYSTEM_PROMPT));
        assert_eq!(request.messages.len(), 4);

        assert!(request.messages[0].content.as_text().unwrap().contains("sales.report@example.com"));
        assert!(matches!(request.messages[1].content, Content::Image { .. }));
        assert!(request.messages[2].content.as_text().unwrap().contains("hr.department@example.com"));
        assert!(matches!(request.messages[3].content, Content::Image { .. }));
    }

    #[tokio::test]
    async fn fails_without_sampling_support() {
        let cx = InvocationContext::new(CancellationToken::new());
        let err = SummarizeUnreadEmailsTool
            .call(InvocationArgs::new(), &cx)
            .await
            .unwrap_err();

        let tool_err = err.downcast::<ToolError>().unwrap();
        assert!(matches!(tool_err, ToolError::CapabilityUnavailable(_)));
    }

    #[tokio::test]
    async fn incorporates_the_caller_reply() {
        let (channel, mut rx) = CallbackChannel::pair();
        let cx = InvocationContext::with_callback(CancellationToken::new(), channel);

        let caller = tokio::spawn(async move {
            let envelope = rx.recv().await.expect("envelope");
            assert_eq!(envelope.request.messages.len(), 4);
            envelope
                .reply
                .send(SamplingResponse::text("Two emails: a sales report and an HR list."))
                .ok();
        });

        let result = SummarizeUnreadEmailsTool
            .call(InvocationArgs::new(), &cx)
            .await
            .unwrap();
        assert_eq!(
            result,
            Value::String("Two emails: a sales report and an HR list.".to_string())
        );
        caller.await.unwrap();
    }

    #[tokio::test]
    async fn blank_caller_reply_is_an_error() {
        let (channel, mut rx) = CallbackChannel::pair();
        let cx = InvocationContext::with_callback(CancellationToken::new(), channel);

        let caller = tokio::spawn(async move {
            let envelope = rx.recv().await.expect("envelope");
            envelope.reply.send(SamplingResponse::text("   ")).ok();
        });

        let err = SummarizeUnreadEmailsTool
            .call(InvocationArgs::new(), &cx)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("empty summary"));
        caller.await.unwrap();
    }
}

//! Delivery backends.
//!
//! [`SmtpBackend`] is the production transport; [`ConsoleBackend`] and
//! [`MemoryBackend`] exist for development and tests. All of them speak the
//! same [`EmailBackend`] trait, so the send operations can be exercised
//! without a live relay.

mod smtp;

pub use smtp::SmtpBackend;

use std::sync::Mutex;

use async_trait::async_trait;

use crate::MailResult;
use crate::message::EmailMessage;

/// A message sink: takes built messages, returns how many were delivered.
#[async_trait]
pub trait EmailBackend: Send + Sync {
	async fn send_messages(&self, messages: &[EmailMessage]) -> MailResult<usize>;
}

/// Development backend that prints a redacted summary to stdout.
///
/// Body content is not printed; stdout is often captured by log shippers
/// and message bodies may carry tokens or personal data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleBackend;

#[async_trait]
impl EmailBackend for ConsoleBackend {
	async fn send_messages(&self, messages: &[EmailMessage]) -> MailResult<usize> {
		for message in messages {
			println!("[MAIL] ----------------------------------------");
			println!("[MAIL] From:    {}", message.from_email());
			println!("[MAIL] To:      {} recipient(s)", message.to().len());
			if !message.cc().is_empty() {
				println!("[MAIL] Cc:      {} recipient(s)", message.cc().len());
			}
			if !message.bcc().is_empty() {
				println!("[MAIL] Bcc:     {} recipient(s)", message.bcc().len());
			}
			println!("[MAIL] Subject: {}", message.subject());
			println!(
				"[MAIL] Body:    {} bytes ({:?}) [redacted]",
				message.body().len(),
				message.body_kind()
			);
			for attachment in message.attachments() {
				println!(
					"[MAIL] Attach:  {} ({}, {} bytes)",
					attachment.filename(),
					attachment.mime_type(),
					attachment.content().len()
				);
			}
			println!("[MAIL] ----------------------------------------");
		}
		Ok(messages.len())
	}
}

/// Test backend that records every message instead of delivering it.
///
/// # Examples
///
/// ```
/// # #[tokio::main]
/// # async fn main() {
/// use mailroom::{EmailBackend, EmailMessage, MemoryBackend};
///
/// let backend = MemoryBackend::new();
/// let message = EmailMessage::builder()
///     .from("sender@example.com")
///     .to(vec!["user@example.com".to_string()])
///     .subject("Hi")
///     .body("Hello")
///     .build()
///     .unwrap();
///
/// backend.send_messages(&[message]).await.unwrap();
/// assert_eq!(backend.sent_messages().len(), 1);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
	sent: Mutex<Vec<EmailMessage>>,
}

impl MemoryBackend {
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of everything sent so far, in send order.
	pub fn sent_messages(&self) -> Vec<EmailMessage> {
		self.sent.lock().expect("memory backend lock poisoned").clone()
	}
}

#[async_trait]
impl EmailBackend for MemoryBackend {
	async fn send_messages(&self, messages: &[EmailMessage]) -> MailResult<usize> {
		let mut sent = self.sent.lock().expect("memory backend lock poisoned");
		sent.extend_from_slice(messages);
		Ok(messages.len())
	}
}

//! # mailroom
//!
//! A thin async facade over SMTP: validate caller input, assemble MIME
//! messages and hand them to a configured relay.
//!
//! ## Features
//!
//! - **EmailMessage**: fluent builder for plain-text or HTML messages with
//!   CC/BCC recipients and file attachments (MIME type auto-detected)
//! - **Fixed templates**: four ready-made HTML layouts (notification,
//!   welcome, alert, report) filled from dynamic data, with all
//!   caller-supplied text HTML-escaped
//! - **SMTP backend**: STARTTLS or implicit-TLS delivery via `lettre`,
//!   with console and in-memory backends for development and tests
//! - **Uniform results**: every operation returns a serializable report
//!   carrying either the delivery summary or a stable error code;
//!   transport-layer errors never escape raw
//!
//! ## Examples
//!
//! ### Simple send
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() {
//! use mailroom::{SendRequest, SmtpConfig, send_email};
//!
//! let config = SmtpConfig::from_env().unwrap();
//! let request = SendRequest::new("user@example.com", "Welcome!", "Thanks for signing up.");
//!
//! let report = send_email(&config, &request).await;
//! assert!(report.success);
//! # }
//! ```
//!
//! ### Templated send
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() {
//! use mailroom::{TemplateRequest, SmtpConfig, send_templated_email};
//! use serde_json::json;
//!
//! let config = SmtpConfig::from_env().unwrap();
//! let request = TemplateRequest::new("user@example.com", "Hello", "welcome")
//!     .with_data("title", json!("Welcome aboard"))
//!     .with_data("message", json!("Your account is ready."))
//!     .with_data("features", json!(["Fast setup", "Friendly support"]));
//!
//! let report = send_templated_email(&config, &request).await;
//! assert!(report.success);
//! # }
//! ```

pub mod address;
pub mod backends;
pub mod config;
pub mod message;
pub mod send;
pub mod templates;
pub mod validation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use address::parse_address_list;
pub use backends::{ConsoleBackend, EmailBackend, MemoryBackend, SmtpBackend};
pub use config::SmtpConfig;
pub use message::{Attachment, EmailMessage, EmailMessageBuilder};
pub use send::{
	BulkReport, BulkSendRequest, RecipientOutcome, SendReport, SendRequest, TemplateRequest,
	send_bulk_email, send_bulk_email_with_backend, send_email, send_email_with_backend,
	send_templated_email, send_templated_email_with_backend,
};
pub use templates::{TemplateContext, TemplateData, TemplateKind};
pub use validation::BodyKind;

/// Stable error codes surfaced in [`SendReport`] and [`BulkReport`].
///
/// Each code corresponds to exactly one failure condition; codes serialize
/// as their variant name (e.g. `"InvalidRecipient"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
	MissingSmtpConfig,
	InvalidRecipient,
	InvalidSubject,
	InvalidBody,
	InvalidBodyType,
	AttachmentNotFound,
	AttachmentError,
	InvalidPort,
	SmtpAuthError,
	SmtpError,
	SmtpConnectionError,
	InvalidTemplateType,
	InvalidTemplateData,
	MissingTemplateField,
	UnexpectedError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::MissingSmtpConfig => "MissingSmtpConfig",
			Self::InvalidRecipient => "InvalidRecipient",
			Self::InvalidSubject => "InvalidSubject",
			Self::InvalidBody => "InvalidBody",
			Self::InvalidBodyType => "InvalidBodyType",
			Self::AttachmentNotFound => "AttachmentNotFound",
			Self::AttachmentError => "AttachmentError",
			Self::InvalidPort => "InvalidPort",
			Self::SmtpAuthError => "SmtpAuthError",
			Self::SmtpError => "SmtpError",
			Self::SmtpConnectionError => "SmtpConnectionError",
			Self::InvalidTemplateType => "InvalidTemplateType",
			Self::InvalidTemplateData => "InvalidTemplateData",
			Self::MissingTemplateField => "MissingTemplateField",
			Self::UnexpectedError => "UnexpectedError",
		};
		f.write_str(name)
	}
}

/// Crate-level error type; one variant per [`ErrorCode`].
#[derive(Debug, Clone, Error)]
pub enum MailError {
	#[error("missing SMTP configuration: {0}")]
	MissingSmtpConfig(String),

	#[error("invalid recipient: {0}")]
	InvalidRecipient(String),

	#[error("invalid subject: {0}")]
	InvalidSubject(String),

	#[error("invalid body: {0}")]
	InvalidBody(String),

	#[error("invalid body type: {0}")]
	InvalidBodyType(String),

	#[error("attachment not found: {0}")]
	AttachmentNotFound(String),

	#[error("attachment error: {0}")]
	AttachmentError(String),

	#[error("invalid port: {0}")]
	InvalidPort(String),

	#[error("SMTP authentication failed: {0}")]
	SmtpAuth(String),

	#[error("SMTP error: {0}")]
	Smtp(String),

	#[error("SMTP connection failed: {0}")]
	SmtpConnection(String),

	#[error("invalid template type: {0}")]
	InvalidTemplateType(String),

	#[error("invalid template data: {0}")]
	InvalidTemplateData(String),

	#[error("missing template field: {0}")]
	MissingTemplateField(String),

	#[error("unexpected error: {0}")]
	Unexpected(String),
}

impl MailError {
	/// The stable code for this error.
	pub fn code(&self) -> ErrorCode {
		match self {
			Self::MissingSmtpConfig(_) => ErrorCode::MissingSmtpConfig,
			Self::InvalidRecipient(_) => ErrorCode::InvalidRecipient,
			Self::InvalidSubject(_) => ErrorCode::InvalidSubject,
			Self::InvalidBody(_) => ErrorCode::InvalidBody,
			Self::InvalidBodyType(_) => ErrorCode::InvalidBodyType,
			Self::AttachmentNotFound(_) => ErrorCode::AttachmentNotFound,
			Self::AttachmentError(_) => ErrorCode::AttachmentError,
			Self::InvalidPort(_) => ErrorCode::InvalidPort,
			Self::SmtpAuth(_) => ErrorCode::SmtpAuthError,
			Self::Smtp(_) => ErrorCode::SmtpError,
			Self::SmtpConnection(_) => ErrorCode::SmtpConnectionError,
			Self::InvalidTemplateType(_) => ErrorCode::InvalidTemplateType,
			Self::InvalidTemplateData(_) => ErrorCode::InvalidTemplateData,
			Self::MissingTemplateField(_) => ErrorCode::MissingTemplateField,
			Self::Unexpected(_) => ErrorCode::UnexpectedError,
		}
	}
}

pub type MailResult<T> = std::result::Result<T, MailError>;

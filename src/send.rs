//! The public send operations and their uniform result contract.
//!
//! Each operation validates everything up front, performs at most one unit
//! of work, and always terminates in a structured report; no error ever
//! propagates out of these functions. The `*_with_backend` variants accept
//! any [`EmailBackend`], which is how the whole pipeline is tested without
//! a relay.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::address::{parse_address_list, validate_address};
use crate::backends::{EmailBackend, SmtpBackend};
use crate::config::SmtpConfig;
use crate::message::{EmailMessage, load_attachments};
use crate::templates::{TemplateContext, TemplateData, TemplateKind};
use crate::validation::{BodyKind, validate_body, validate_subject};
use crate::{ErrorCode, MailError, MailResult};

/// Input for [`send_email`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequest {
	/// Comma-separated recipient addresses.
	pub to: String,
	pub subject: String,
	pub body: String,
	/// `"plain"` (default) or `"html"`.
	#[serde(default)]
	pub body_type: Option<String>,
	/// Comma-separated carbon-copy addresses.
	#[serde(default)]
	pub cc: Option<String>,
	/// Comma-separated blind-copy addresses.
	#[serde(default)]
	pub bcc: Option<String>,
	/// Paths of files to attach, in order.
	#[serde(default)]
	pub attachments: Vec<PathBuf>,
}

impl SendRequest {
	pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			subject: subject.into(),
			body: body.into(),
			body_type: None,
			cc: None,
			bcc: None,
			attachments: Vec::new(),
		}
	}

	pub fn with_body_type(mut self, body_type: impl Into<String>) -> Self {
		self.body_type = Some(body_type.into());
		self
	}

	pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
		self.cc = Some(cc.into());
		self
	}

	pub fn with_bcc(mut self, bcc: impl Into<String>) -> Self {
		self.bcc = Some(bcc.into());
		self
	}

	pub fn with_attachment(mut self, path: impl Into<PathBuf>) -> Self {
		self.attachments.push(path.into());
		self
	}
}

/// Input for [`send_bulk_email`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSendRequest {
	/// One address per entry; each gets its own independent send.
	pub recipients: Vec<String>,
	pub subject: String,
	pub body: String,
	#[serde(default)]
	pub body_type: Option<String>,
}

impl BulkSendRequest {
	pub fn new(
		recipients: Vec<String>,
		subject: impl Into<String>,
		body: impl Into<String>,
	) -> Self {
		Self {
			recipients,
			subject: subject.into(),
			body: body.into(),
			body_type: None,
		}
	}

	pub fn with_body_type(mut self, body_type: impl Into<String>) -> Self {
		self.body_type = Some(body_type.into());
		self
	}
}

/// Input for [`send_templated_email`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRequest {
	pub to: String,
	pub subject: String,
	/// One of `notification`, `welcome`, `alert`, `report`.
	pub template_type: String,
	#[serde(default)]
	pub template_data: TemplateContext,
	#[serde(default)]
	pub cc: Option<String>,
	#[serde(default)]
	pub bcc: Option<String>,
	#[serde(default)]
	pub attachments: Vec<PathBuf>,
}

impl TemplateRequest {
	pub fn new(
		to: impl Into<String>,
		subject: impl Into<String>,
		template_type: impl Into<String>,
	) -> Self {
		Self {
			to: to.into(),
			subject: subject.into(),
			template_type: template_type.into(),
			template_data: TemplateContext::new(),
			cc: None,
			bcc: None,
			attachments: Vec::new(),
		}
	}

	pub fn with_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
		self.template_data.insert(key.into(), value);
		self
	}

	pub fn with_context(mut self, context: TemplateContext) -> Self {
		self.template_data = context;
		self
	}

	pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
		self.cc = Some(cc.into());
		self
	}

	pub fn with_bcc(mut self, bcc: impl Into<String>) -> Self {
		self.bcc = Some(bcc.into());
		self
	}

	pub fn with_attachment(mut self, path: impl Into<PathBuf>) -> Self {
		self.attachments.push(path.into());
		self
	}
}

/// Outcome of a single or templated send.
///
/// On success the delivery summary fields are set; on failure `error` and
/// `error_code` are. BCC addresses are reported only as a count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendReport {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub recipients: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cc: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bcc_count: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub attachments: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub template_type: Option<TemplateKind>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_code: Option<ErrorCode>,
}

impl SendReport {
	fn failure(err: &MailError) -> Self {
		Self {
			success: false,
			message: None,
			recipients: None,
			cc: None,
			bcc_count: None,
			attachments: None,
			template_type: None,
			error: Some(err.to_string()),
			error_code: Some(err.code()),
		}
	}

	fn delivered(
		recipients: Vec<String>,
		cc: Vec<String>,
		bcc_count: usize,
		attachments: Vec<String>,
		template_type: Option<TemplateKind>,
	) -> Self {
		Self {
			success: true,
			message: Some("email sent".to_string()),
			recipients: Some(recipients),
			cc: (!cc.is_empty()).then_some(cc),
			bcc_count: Some(bcc_count),
			attachments: (!attachments.is_empty()).then_some(attachments),
			template_type,
			error: None,
			error_code: None,
		}
	}
}

/// Per-recipient entry in a [`BulkReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientOutcome {
	pub recipient: String,
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_code: Option<ErrorCode>,
}

/// Outcome of a bulk send.
///
/// When the request as a whole is invalid only `error`/`error_code` are
/// set; otherwise the counters and per-recipient outcomes are present and
/// `success` means every recipient succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkReport {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub total: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub succeeded: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub failed: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub results: Option<Vec<RecipientOutcome>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_code: Option<ErrorCode>,
}

impl BulkReport {
	fn failure(err: &MailError) -> Self {
		Self {
			success: false,
			total: None,
			succeeded: None,
			failed: None,
			results: None,
			error: Some(err.to_string()),
			error_code: Some(err.code()),
		}
	}
}

/// Send one message to one or more recipients through the configured relay.
pub async fn send_email(config: &SmtpConfig, request: &SendRequest) -> SendReport {
	match SmtpBackend::new(config) {
		Ok(backend) => send_email_with_backend(&backend, config.sender(), request).await,
		Err(err) => SendReport::failure(&err),
	}
}

/// [`send_email`] against an arbitrary backend.
pub async fn send_email_with_backend(
	backend: &dyn EmailBackend,
	sender: &str,
	request: &SendRequest,
) -> SendReport {
	match deliver_single(backend, sender, request).await {
		Ok(report) => report,
		Err(err) => {
			tracing::warn!(code = %err.code(), error = %err, "send failed");
			SendReport::failure(&err)
		}
	}
}

/// Send the same message to each recipient independently.
pub async fn send_bulk_email(config: &SmtpConfig, request: &BulkSendRequest) -> BulkReport {
	match SmtpBackend::new(config) {
		Ok(backend) => send_bulk_email_with_backend(&backend, config.sender(), request).await,
		Err(err) => BulkReport::failure(&err),
	}
}

/// [`send_bulk_email`] against an arbitrary backend.
pub async fn send_bulk_email_with_backend(
	backend: &dyn EmailBackend,
	sender: &str,
	request: &BulkSendRequest,
) -> BulkReport {
	let body_kind = match validate_bulk_request(request) {
		Ok(kind) => kind,
		Err(err) => {
			tracing::warn!(code = %err.code(), error = %err, "bulk send rejected");
			return BulkReport::failure(&err);
		}
	};

	let mut results = Vec::with_capacity(request.recipients.len());
	let mut succeeded = 0usize;

	for recipient in &request.recipients {
		match deliver_to_one(backend, sender, recipient, request, body_kind).await {
			Ok(()) => {
				succeeded += 1;
				results.push(RecipientOutcome {
					recipient: recipient.clone(),
					success: true,
					error: None,
					error_code: None,
				});
			}
			Err(err) => {
				tracing::warn!(
					recipient = %recipient,
					code = %err.code(),
					error = %err,
					"bulk recipient failed"
				);
				results.push(RecipientOutcome {
					recipient: recipient.clone(),
					success: false,
					error: Some(err.to_string()),
					error_code: Some(err.code()),
				});
			}
		}
	}

	let total = request.recipients.len();
	let failed = total - succeeded;
	tracing::info!(total, succeeded, failed, "bulk send finished");
	BulkReport {
		success: failed == 0,
		total: Some(total),
		succeeded: Some(succeeded),
		failed: Some(failed),
		results: Some(results),
		error: None,
		error_code: None,
	}
}

/// Render one of the fixed templates and send it as HTML.
pub async fn send_templated_email(config: &SmtpConfig, request: &TemplateRequest) -> SendReport {
	match SmtpBackend::new(config) {
		Ok(backend) => send_templated_email_with_backend(&backend, config.sender(), request).await,
		Err(err) => SendReport::failure(&err),
	}
}

/// [`send_templated_email`] against an arbitrary backend.
pub async fn send_templated_email_with_backend(
	backend: &dyn EmailBackend,
	sender: &str,
	request: &TemplateRequest,
) -> SendReport {
	match deliver_templated(backend, sender, request).await {
		Ok(report) => report,
		Err(err) => {
			tracing::warn!(code = %err.code(), error = %err, "templated send failed");
			SendReport::failure(&err)
		}
	}
}

struct RecipientSet {
	to: Vec<String>,
	cc: Vec<String>,
	bcc: Vec<String>,
}

fn parse_recipient_set(
	to: &str,
	cc: Option<&str>,
	bcc: Option<&str>,
) -> MailResult<RecipientSet> {
	Ok(RecipientSet {
		to: parse_address_list(to)?,
		cc: parse_optional_list(cc)?,
		bcc: parse_optional_list(bcc)?,
	})
}

/// Like [`parse_address_list`], but an absent or blank input is an empty
/// list rather than an error; cc/bcc are optional.
fn parse_optional_list(input: Option<&str>) -> MailResult<Vec<String>> {
	match input {
		None => Ok(Vec::new()),
		Some(raw) if raw.split(',').all(|token| token.trim().is_empty()) => Ok(Vec::new()),
		Some(raw) => parse_address_list(raw),
	}
}

async fn deliver_single(
	backend: &dyn EmailBackend,
	sender: &str,
	request: &SendRequest,
) -> MailResult<SendReport> {
	let recipients =
		parse_recipient_set(&request.to, request.cc.as_deref(), request.bcc.as_deref())?;
	validate_subject(&request.subject)?;
	validate_body(&request.body)?;
	let body_kind = match &request.body_type {
		Some(raw) => BodyKind::parse(raw)?,
		None => BodyKind::Plain,
	};

	let attachments = load_attachments(&request.attachments)?;
	let attachment_names: Vec<String> = attachments
		.iter()
		.map(|attachment| attachment.filename().to_string())
		.collect();

	let message = EmailMessage::builder()
		.from(sender)
		.to(recipients.to.clone())
		.cc(recipients.cc.clone())
		.bcc(recipients.bcc.clone())
		.subject(request.subject.clone())
		.body(request.body.clone())
		.body_kind(body_kind)
		.attachments(attachments)
		.build()?;

	backend.send_messages(std::slice::from_ref(&message)).await?;
	tracing::info!(recipients = recipients.to.len(), "email sent");

	Ok(SendReport::delivered(
		recipients.to,
		recipients.cc,
		recipients.bcc.len(),
		attachment_names,
		None,
	))
}

async fn deliver_templated(
	backend: &dyn EmailBackend,
	sender: &str,
	request: &TemplateRequest,
) -> MailResult<SendReport> {
	let recipients =
		parse_recipient_set(&request.to, request.cc.as_deref(), request.bcc.as_deref())?;
	validate_subject(&request.subject)?;

	let kind = TemplateKind::parse(&request.template_type)?;
	let data = TemplateData::from_context(kind, &request.template_data)?;
	let body = data.render();

	let attachments = load_attachments(&request.attachments)?;
	let attachment_names: Vec<String> = attachments
		.iter()
		.map(|attachment| attachment.filename().to_string())
		.collect();

	let message = EmailMessage::builder()
		.from(sender)
		.to(recipients.to.clone())
		.cc(recipients.cc.clone())
		.bcc(recipients.bcc.clone())
		.subject(request.subject.clone())
		.body(body)
		.body_kind(BodyKind::Html)
		.attachments(attachments)
		.build()?;

	backend.send_messages(std::slice::from_ref(&message)).await?;
	tracing::info!(template = %kind, recipients = recipients.to.len(), "templated email sent");

	Ok(SendReport::delivered(
		recipients.to,
		recipients.cc,
		recipients.bcc.len(),
		attachment_names,
		Some(kind),
	))
}

fn validate_bulk_request(request: &BulkSendRequest) -> MailResult<BodyKind> {
	if request.recipients.is_empty() {
		return Err(MailError::InvalidRecipient(
			"recipient list must not be empty".to_string(),
		));
	}
	validate_subject(&request.subject)?;
	validate_body(&request.body)?;
	match &request.body_type {
		Some(raw) => BodyKind::parse(raw),
		None => Ok(BodyKind::Plain),
	}
}

async fn deliver_to_one(
	backend: &dyn EmailBackend,
	sender: &str,
	recipient: &str,
	request: &BulkSendRequest,
	body_kind: BodyKind,
) -> MailResult<()> {
	let address = recipient.trim();
	validate_address(address)?;

	let message = EmailMessage::builder()
		.from(sender)
		.to(vec![address.to_string()])
		.subject(request.subject.clone())
		.body(request.body.clone())
		.body_kind(body_kind)
		.build()?;

	backend.send_messages(std::slice::from_ref(&message)).await?;
	Ok(())
}

//! Message assembly: attachments, the immutable [`EmailMessage`] and its
//! conversion to wire format.

use std::path::{Path, PathBuf};

use lettre::address::Envelope;
use lettre::message::header::ContentType;
use lettre::message::{Attachment as AttachmentPart, Mailbox, MultiPart, SinglePart};
use lettre::{Address, Message};

use crate::address::validate_address;
use crate::validation::{BodyKind, validate_body, validate_subject};
use crate::{MailError, MailResult};

/// A file attachment: base filename, raw content and MIME type.
///
/// # Examples
///
/// ```
/// use mailroom::Attachment;
///
/// let attachment = Attachment::new("report.pdf", b"%PDF-1.4".to_vec());
/// assert_eq!(attachment.mime_type(), "application/pdf");
/// ```
#[derive(Debug, Clone)]
pub struct Attachment {
	filename: String,
	content: Vec<u8>,
	mime_type: String,
}

impl Attachment {
	/// Create an attachment from raw bytes.
	///
	/// The MIME type is detected from the filename extension, falling back
	/// to `application/octet-stream`.
	pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Self {
		let filename = filename.into();
		let mime_type = detect_mime_type(&filename);
		Self {
			filename,
			content,
			mime_type,
		}
	}

	/// Load an attachment from disk.
	///
	/// The stored filename is the path's final component, never the full
	/// path. A missing or non-regular file yields
	/// [`MailError::AttachmentNotFound`]; a file that exists but cannot be
	/// read yields [`MailError::AttachmentError`].
	pub fn load(path: &Path) -> MailResult<Self> {
		if !path.is_file() {
			return Err(MailError::AttachmentNotFound(format!(
				"'{}' does not exist or is not a regular file",
				path.display()
			)));
		}

		let filename = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.ok_or_else(|| {
				MailError::AttachmentNotFound(format!("'{}' has no filename", path.display()))
			})?;

		let content = std::fs::read(path).map_err(|err| {
			MailError::AttachmentError(format!("failed to read '{}': {}", path.display(), err))
		})?;

		Ok(Self::new(filename, content))
	}

	pub fn filename(&self) -> &str {
		&self.filename
	}

	pub fn content(&self) -> &[u8] {
		&self.content
	}

	pub fn mime_type(&self) -> &str {
		&self.mime_type
	}
}

fn detect_mime_type(filename: &str) -> String {
	mime_guess::from_path(filename)
		.first()
		.map(|mime| mime.to_string())
		.unwrap_or_else(|| "application/octet-stream".to_string())
}

/// Load attachments from paths, all-or-nothing.
///
/// Order matches the input; the first failing path rejects the whole list.
pub fn load_attachments(paths: &[PathBuf]) -> MailResult<Vec<Attachment>> {
	paths.iter().map(|path| Attachment::load(path)).collect()
}

/// An assembled email message.
///
/// Immutable once built; construction goes through
/// [`EmailMessage::builder`], which validates every address and field so an
/// invalid message cannot exist. BCC recipients are carried as delivery
/// targets only and never appear in the wire headers produced by
/// [`EmailMessage::to_mime`].
#[derive(Debug, Clone)]
pub struct EmailMessage {
	from_email: String,
	to: Vec<String>,
	cc: Vec<String>,
	bcc: Vec<String>,
	subject: String,
	body: String,
	body_kind: BodyKind,
	attachments: Vec<Attachment>,
}

impl EmailMessage {
	pub fn builder() -> EmailMessageBuilder {
		EmailMessageBuilder::default()
	}

	pub fn from_email(&self) -> &str {
		&self.from_email
	}

	pub fn to(&self) -> &[String] {
		&self.to
	}

	pub fn cc(&self) -> &[String] {
		&self.cc
	}

	pub fn bcc(&self) -> &[String] {
		&self.bcc
	}

	pub fn subject(&self) -> &str {
		&self.subject
	}

	pub fn body(&self) -> &str {
		&self.body
	}

	pub fn body_kind(&self) -> BodyKind {
		self.body_kind
	}

	pub fn attachments(&self) -> &[Attachment] {
		&self.attachments
	}

	/// Render the message to an SMTP envelope and RFC 5322 bytes.
	///
	/// The envelope's forward path is to + cc + bcc in that order; the
	/// formatted message carries `From`, `To`, `Cc` and `Subject` headers
	/// but never a `Bcc` header. The body becomes a single `text/plain` or
	/// `text/html` part, wrapped in `multipart/mixed` together with the
	/// attachment parts (input order) when attachments are present.
	pub fn to_mime(&self) -> MailResult<(Envelope, Vec<u8>)> {
		let from: Mailbox = self.from_email.parse().map_err(|err| {
			MailError::MissingSmtpConfig(format!(
				"sender address '{}' is not a valid mailbox: {}",
				self.from_email, err
			))
		})?;

		let mut builder = Message::builder()
			.from(from.clone())
			.subject(self.subject.clone());
		for to in &self.to {
			builder = builder.to(parse_mailbox(to)?);
		}
		for cc in &self.cc {
			builder = builder.cc(parse_mailbox(cc)?);
		}

		let content_type = match self.body_kind {
			BodyKind::Plain => ContentType::TEXT_PLAIN,
			BodyKind::Html => ContentType::TEXT_HTML,
		};
		let body_part = SinglePart::builder()
			.header(content_type)
			.body(self.body.clone());

		let message = if self.attachments.is_empty() {
			builder.singlepart(body_part)
		} else {
			let mut multipart = MultiPart::mixed().singlepart(body_part);
			for attachment in &self.attachments {
				let content_type =
					ContentType::parse(attachment.mime_type()).map_err(|err| {
						MailError::AttachmentError(format!(
							"'{}' has an unusable MIME type '{}': {}",
							attachment.filename(),
							attachment.mime_type(),
							err
						))
					})?;
				multipart = multipart.singlepart(
					AttachmentPart::new(attachment.filename().to_string())
						.body(attachment.content().to_vec(), content_type),
				);
			}
			builder.multipart(multipart)
		}
		.map_err(|err| MailError::Unexpected(format!("failed to assemble message: {}", err)))?;

		let mut forward_path = Vec::new();
		for recipient in self.to.iter().chain(&self.cc).chain(&self.bcc) {
			forward_path.push(parse_envelope_address(recipient)?);
		}
		let envelope = Envelope::new(Some(from.email), forward_path).map_err(|err| {
			MailError::InvalidRecipient(format!("cannot build envelope: {}", err))
		})?;

		Ok((envelope, message.formatted()))
	}
}

fn parse_mailbox(address: &str) -> MailResult<Mailbox> {
	address.parse().map_err(|err| {
		MailError::InvalidRecipient(format!("'{}' is not a valid mailbox: {}", address, err))
	})
}

fn parse_envelope_address(address: &str) -> MailResult<Address> {
	address.parse().map_err(|err| {
		MailError::InvalidRecipient(format!("'{}' is not a valid address: {}", address, err))
	})
}

/// Fluent builder for [`EmailMessage`].
#[derive(Debug, Default)]
pub struct EmailMessageBuilder {
	from_email: String,
	to: Vec<String>,
	cc: Vec<String>,
	bcc: Vec<String>,
	subject: String,
	body: String,
	body_kind: BodyKind,
	attachments: Vec<Attachment>,
}

impl EmailMessageBuilder {
	pub fn from(mut self, from: impl Into<String>) -> Self {
		self.from_email = from.into();
		self
	}

	pub fn to(mut self, to: Vec<String>) -> Self {
		self.to = to;
		self
	}

	pub fn cc(mut self, cc: Vec<String>) -> Self {
		self.cc = cc;
		self
	}

	pub fn bcc(mut self, bcc: Vec<String>) -> Self {
		self.bcc = bcc;
		self
	}

	pub fn subject(mut self, subject: impl Into<String>) -> Self {
		self.subject = subject.into();
		self
	}

	pub fn body(mut self, body: impl Into<String>) -> Self {
		self.body = body.into();
		self
	}

	pub fn body_kind(mut self, kind: BodyKind) -> Self {
		self.body_kind = kind;
		self
	}

	pub fn attachment(mut self, attachment: Attachment) -> Self {
		self.attachments.push(attachment);
		self
	}

	pub fn attachments(mut self, attachments: Vec<Attachment>) -> Self {
		self.attachments = attachments;
		self
	}

	/// Build the message, validating every field.
	///
	/// Requires at least one `to` recipient, a shaped sender and recipient
	/// addresses, a non-empty subject without line breaks, and a non-empty
	/// body.
	pub fn build(self) -> MailResult<EmailMessage> {
		validate_address(&self.from_email).map_err(|_| {
			MailError::MissingSmtpConfig(format!(
				"sender address '{}' is not a valid mailbox",
				self.from_email
			))
		})?;

		if self.to.is_empty() {
			return Err(MailError::InvalidRecipient(
				"at least one recipient is required".to_string(),
			));
		}
		for address in self.to.iter().chain(&self.cc).chain(&self.bcc) {
			validate_address(address)?;
		}

		validate_subject(&self.subject)?;
		validate_body(&self.body)?;

		Ok(EmailMessage {
			from_email: self.from_email,
			to: self.to,
			cc: self.cc,
			bcc: self.bcc,
			subject: self.subject,
			body: self.body,
			body_kind: self.body_kind,
			attachments: self.attachments,
		})
	}
}

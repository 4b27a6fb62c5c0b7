//! SMTP delivery via lettre.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use super::EmailBackend;
use crate::config::SmtpConfig;
use crate::message::EmailMessage;
use crate::{MailError, MailResult};

/// Production backend speaking SMTP to the configured relay.
///
/// `use_tls = true` connects plain and upgrades via STARTTLS;
/// `use_tls = false` connects over implicit TLS. Each message is submitted
/// with an explicit envelope so BCC recipients are delivered without ever
/// appearing in a header. Transport failures are translated to the crate's
/// error taxonomy; lettre errors do not escape this module.
pub struct SmtpBackend {
	transport: AsyncSmtpTransport<Tokio1Executor>,
	host: String,
}

impl SmtpBackend {
	/// Open a backend for the given configuration.
	///
	/// Fails with [`MailError::MissingSmtpConfig`] / [`MailError::InvalidPort`]
	/// on an incomplete configuration, before any connection attempt.
	pub fn new(config: &SmtpConfig) -> MailResult<Self> {
		config.validate()?;

		let builder = if config.use_tls {
			AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
		} else {
			AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
		}
		.map_err(|err| map_smtp_error(&err))?;

		let transport = builder
			.port(config.port)
			.credentials(Credentials::new(
				config.username.clone(),
				config.password.clone(),
			))
			.build();

		Ok(Self {
			transport,
			host: config.host.clone(),
		})
	}
}

#[async_trait]
impl EmailBackend for SmtpBackend {
	async fn send_messages(&self, messages: &[EmailMessage]) -> MailResult<usize> {
		let mut sent = 0;
		for message in messages {
			let (envelope, raw) = message.to_mime()?;
			self.transport
				.send_raw(&envelope, &raw)
				.await
				.map_err(|err| map_smtp_error(&err))?;
			sent += 1;
			tracing::debug!(
				host = %self.host,
				recipients = envelope.to().len(),
				"message accepted by relay"
			);
		}
		Ok(sent)
	}
}

impl std::fmt::Debug for SmtpBackend {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SmtpBackend").field("host", &self.host).finish()
	}
}

/// Translate a lettre SMTP error into the crate taxonomy.
///
/// Connection establishment problems (DNS, refused, timeout, TLS) map to
/// `SmtpConnection`; an authentication rejection maps to `SmtpAuth`; any
/// other relay response maps to `Smtp`; the rest is `Unexpected`.
fn map_smtp_error(err: &lettre::transport::smtp::Error) -> MailError {
	let detail = err.to_string();
	if err.is_timeout() || err.is_connection() || err.is_network() || err.is_tls() {
		MailError::SmtpConnection(detail)
	} else if is_auth_rejection(err) {
		MailError::SmtpAuth(detail)
	} else if err.is_response() || err.is_transient() || err.is_permanent() {
		MailError::Smtp(detail)
	} else {
		MailError::Unexpected(detail)
	}
}

fn is_auth_rejection(err: &lettre::transport::smtp::Error) -> bool {
	// 530/534/535/538 are the authentication-family reply codes.
	err.status().is_some_and(|code| {
		matches!(code.to_string().as_str(), "530" | "534" | "535" | "538")
	})
}

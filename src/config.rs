//! SMTP relay configuration.
//!
//! Configuration is an explicit value constructed once by the caller
//! (typically via [`SmtpConfig::from_env`]) and passed into the send
//! operations. Nothing in this crate reads the environment at send time.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::{MailError, MailResult};

/// Connection and identity settings for the outbound relay.
///
/// # Examples
///
/// ```
/// use mailroom::SmtpConfig;
///
/// let config = SmtpConfig::new("smtp.example.com", 587)
///     .with_credentials("mailer@example.com", "app-password")
///     .with_from("noreply@example.com");
/// assert_eq!(config.sender(), "noreply@example.com");
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
	/// Relay hostname.
	pub host: String,
	/// Relay port.
	pub port: u16,
	/// Username for authentication; also the default sender identity.
	pub username: String,
	/// Password for authentication. Redacted from `Debug`, zeroized on drop.
	pub password: String,
	/// `true`: connect plain and upgrade via STARTTLS.
	/// `false`: connect over implicit TLS.
	pub use_tls: bool,
	/// Sender address overriding the username.
	pub from_email: Option<String>,
}

impl SmtpConfig {
	pub fn new(host: impl Into<String>, port: u16) -> Self {
		Self {
			host: host.into(),
			port,
			username: String::new(),
			password: String::new(),
			use_tls: true,
			from_email: None,
		}
	}

	pub fn with_credentials(
		mut self,
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Self {
		self.username = username.into();
		self.password = password.into();
		self
	}

	pub fn with_from(mut self, from_email: impl Into<String>) -> Self {
		self.from_email = Some(from_email.into());
		self
	}

	pub fn with_tls(mut self, use_tls: bool) -> Self {
		self.use_tls = use_tls;
		self
	}

	/// The sender identity: `from_email` when set, the username otherwise.
	pub fn sender(&self) -> &str {
		self.from_email.as_deref().unwrap_or(&self.username)
	}

	/// Read configuration from the process environment.
	///
	/// Reads `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`
	/// (all required), `SMTP_USE_TLS` (optional, default `true`) and
	/// `SMTP_FROM` (optional).
	pub fn from_env() -> MailResult<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Build configuration from an arbitrary key lookup.
	///
	/// All missing required keys are reported together.
	pub fn from_lookup<F>(lookup: F) -> MailResult<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

		match (
			non_empty("SMTP_HOST"),
			non_empty("SMTP_PORT"),
			non_empty("SMTP_USERNAME"),
			non_empty("SMTP_PASSWORD"),
		) {
			(Some(host), Some(port_raw), Some(username), Some(password)) => {
				let port = parse_port(&port_raw)?;
				let use_tls = lookup("SMTP_USE_TLS")
					.map(|value| {
						let value = value.trim().to_ascii_lowercase();
						value != "false" && value != "0"
					})
					.unwrap_or(true);

				Ok(Self {
					host,
					port,
					username,
					password,
					use_tls,
					from_email: non_empty("SMTP_FROM"),
				})
			}
			(host, port, username, password) => {
				let missing: Vec<&str> = [
					("SMTP_HOST", host.is_none()),
					("SMTP_PORT", port.is_none()),
					("SMTP_USERNAME", username.is_none()),
					("SMTP_PASSWORD", password.is_none()),
				]
				.into_iter()
				.filter_map(|(name, absent)| absent.then_some(name))
				.collect();
				Err(MailError::MissingSmtpConfig(missing.join(", ")))
			}
		}
	}

	/// Check completeness before opening a transport.
	///
	/// Directly constructed configurations go through this at backend
	/// creation, so an incomplete value fails with the same codes as an
	/// incomplete environment.
	pub fn validate(&self) -> MailResult<()> {
		let missing: Vec<&str> = [
			("host", self.host.trim().is_empty()),
			("username", self.username.trim().is_empty()),
			("password", self.password.trim().is_empty()),
		]
		.into_iter()
		.filter_map(|(name, absent)| absent.then_some(name))
		.collect();

		if !missing.is_empty() {
			return Err(MailError::MissingSmtpConfig(missing.join(", ")));
		}
		if self.port == 0 {
			return Err(MailError::InvalidPort(
				"port must be between 1 and 65535".to_string(),
			));
		}
		Ok(())
	}
}

fn parse_port(raw: &str) -> MailResult<u16> {
	raw.trim()
		.parse::<u16>()
		.ok()
		.filter(|port| *port > 0)
		.ok_or_else(|| {
			MailError::InvalidPort(format!(
				"SMTP_PORT must be an integer between 1 and 65535, got '{}'",
				raw
			))
		})
}

impl std::fmt::Debug for SmtpConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SmtpConfig")
			.field("host", &self.host)
			.field("port", &self.port)
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.field("use_tls", &self.use_tls)
			.field("from_email", &self.from_email)
			.finish()
	}
}

impl Drop for SmtpConfig {
	fn drop(&mut self) {
		self.password.zeroize();
	}
}

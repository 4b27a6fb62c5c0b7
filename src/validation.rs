//! Field-level validation and HTML escaping.

use serde::{Deserialize, Serialize};

use crate::{MailError, MailResult};

/// Maximum subject length, matching the RFC 5322 line-length limit so the
/// subject never needs folding.
pub const MAX_SUBJECT_LENGTH: usize = 998;

/// Content kind of a message body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
	#[default]
	Plain,
	Html,
}

impl BodyKind {
	/// Parse a caller-supplied body type, case-insensitively.
	///
	/// # Examples
	///
	/// ```
	/// use mailroom::BodyKind;
	///
	/// assert_eq!(BodyKind::parse("HTML").unwrap(), BodyKind::Html);
	/// assert!(BodyKind::parse("markdown").is_err());
	/// ```
	pub fn parse(raw: &str) -> MailResult<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"plain" => Ok(Self::Plain),
			"html" => Ok(Self::Html),
			other => Err(MailError::InvalidBodyType(format!(
				"body type must be 'plain' or 'html', got '{}'",
				other
			))),
		}
	}
}

/// Validate a message subject.
///
/// Rejects subjects that are empty after trimming, longer than
/// [`MAX_SUBJECT_LENGTH`] characters, or that contain CR/LF (header
/// injection).
pub fn validate_subject(subject: &str) -> MailResult<()> {
	if subject.trim().is_empty() {
		return Err(MailError::InvalidSubject(
			"subject must be a non-empty string".to_string(),
		));
	}
	if subject.chars().count() > MAX_SUBJECT_LENGTH {
		return Err(MailError::InvalidSubject(format!(
			"subject exceeds {} characters",
			MAX_SUBJECT_LENGTH
		)));
	}
	if subject.contains(['\r', '\n']) {
		return Err(MailError::InvalidSubject(
			"subject must not contain line breaks".to_string(),
		));
	}
	Ok(())
}

/// Validate a message body: non-empty after trimming.
pub fn validate_body(body: &str) -> MailResult<()> {
	if body.trim().is_empty() {
		return Err(MailError::InvalidBody(
			"body must be a non-empty string".to_string(),
		));
	}
	Ok(())
}

/// Escape text for embedding in HTML.
///
/// # Examples
///
/// ```
/// use mailroom::validation::escape_html;
///
/// assert_eq!(
///     escape_html("<script>alert('xss')</script>"),
///     "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;"
/// );
/// ```
pub fn escape_html(input: &str) -> String {
	let mut escaped = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			other => escaped.push(other),
		}
	}
	escaped
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorCode;
	use rstest::rstest;

	#[rstest]
	#[case("")]
	#[case("   ")]
	#[case("\t\n")]
	fn test_empty_subject_rejected(#[case] subject: &str) {
		assert_eq!(
			validate_subject(subject).unwrap_err().code(),
			ErrorCode::InvalidSubject
		);
	}

	#[rstest]
	fn test_overlong_subject_rejected() {
		// Arrange
		let subject = "x".repeat(MAX_SUBJECT_LENGTH + 1);

		// Act / Assert
		assert_eq!(
			validate_subject(&subject).unwrap_err().code(),
			ErrorCode::InvalidSubject
		);
		assert!(validate_subject(&"x".repeat(MAX_SUBJECT_LENGTH)).is_ok());
	}

	#[rstest]
	#[case("Hello\r\nBcc: attacker@evil.com")]
	#[case("Hello\nX-Injected: yes")]
	fn test_subject_header_injection_rejected(#[case] subject: &str) {
		assert_eq!(
			validate_subject(subject).unwrap_err().code(),
			ErrorCode::InvalidSubject
		);
	}

	#[rstest]
	fn test_empty_body_rejected() {
		assert_eq!(
			validate_body("  \n ").unwrap_err().code(),
			ErrorCode::InvalidBody
		);
		assert!(validate_body("hello").is_ok());
	}

	#[rstest]
	#[case("plain", BodyKind::Plain)]
	#[case("Plain", BodyKind::Plain)]
	#[case("HTML", BodyKind::Html)]
	#[case(" html ", BodyKind::Html)]
	fn test_body_kind_parse_case_insensitive(#[case] raw: &str, #[case] expected: BodyKind) {
		assert_eq!(BodyKind::parse(raw).unwrap(), expected);
	}

	#[rstest]
	fn test_body_kind_rejects_unknown() {
		assert_eq!(
			BodyKind::parse("markdown").unwrap_err().code(),
			ErrorCode::InvalidBodyType
		);
	}

	#[rstest]
	fn test_escape_html_covers_quotes() {
		assert_eq!(
			escape_html(r#"a "b" & 'c' <d>"#),
			"a &quot;b&quot; &amp; &#x27;c&#x27; &lt;d&gt;"
		);
	}
}

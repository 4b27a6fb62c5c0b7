//! Recipient address parsing and shape validation.
//!
//! Addresses are checked against a basic shape (local part `@` dotted
//! domain, no whitespace) rather than full RFC 5322 grammar; the relay
//! remains the final authority on deliverability.

use crate::{MailError, MailResult};

/// Validate a single address token against the basic shape.
///
/// Requirements: exactly one `@`, non-empty local part, domain with at
/// least one dot and no empty labels, no whitespace or control characters.
///
/// # Examples
///
/// ```
/// use mailroom::address::validate_address;
///
/// assert!(validate_address("user@example.com").is_ok());
/// assert!(validate_address("user@localhost").is_err());
/// ```
pub fn validate_address(address: &str) -> MailResult<()> {
	let invalid = |reason: &str| {
		MailError::InvalidRecipient(format!("'{}' is not a valid address ({})", address, reason))
	};

	if address.is_empty() {
		return Err(invalid("empty"));
	}
	if address
		.chars()
		.any(|c| c.is_whitespace() || c.is_control())
	{
		return Err(invalid("contains whitespace"));
	}

	let Some((local, domain)) = address.split_once('@') else {
		return Err(invalid("missing '@'"));
	};
	if local.is_empty() {
		return Err(invalid("empty local part"));
	}
	if domain.contains('@') {
		return Err(invalid("multiple '@'"));
	}
	if !domain.contains('.') {
		return Err(invalid("domain has no dot"));
	}
	if domain.split('.').any(str::is_empty) {
		return Err(invalid("empty domain label"));
	}

	Ok(())
}

/// Split a comma-separated recipient string into a validated address list.
///
/// Tokens are trimmed and empty segments dropped. Any remaining token that
/// fails shape validation rejects the whole input, as does an input that
/// yields no addresses at all. Exact duplicates are removed, first
/// occurrence wins, order otherwise preserved.
///
/// # Examples
///
/// ```
/// use mailroom::parse_address_list;
///
/// let parsed = parse_address_list("a@x.com, b@x.com,,a@x.com").unwrap();
/// assert_eq!(parsed, vec!["a@x.com", "b@x.com"]);
/// ```
pub fn parse_address_list(input: &str) -> MailResult<Vec<String>> {
	let mut addresses: Vec<String> = Vec::new();

	for token in input.split(',') {
		let token = token.trim();
		if token.is_empty() {
			continue;
		}
		validate_address(token)?;
		if !addresses.iter().any(|seen| seen == token) {
			addresses.push(token.to_string());
		}
	}

	if addresses.is_empty() {
		return Err(MailError::InvalidRecipient(
			"no valid recipient addresses given".to_string(),
		));
	}

	Ok(addresses)
}

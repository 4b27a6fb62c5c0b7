//! Fixed HTML email templates.
//!
//! Four layouts are available, selected by [`TemplateKind`]. Callers pass a
//! dynamic [`TemplateContext`]; it is converted into one typed data struct
//! per template before rendering, so shape problems surface as errors
//! instead of silently empty sections. Every caller-supplied text value is
//! HTML-escaped before substitution. Rendering is pure: identical kind and
//! data always produce byte-identical HTML.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::escape_html;
use crate::{MailError, MailResult};

/// Dynamic template data as supplied by the caller.
///
/// Mapping-valued fields keep their insertion order through rendering.
pub type TemplateContext = serde_json::Map<String, Value>;

const DEFAULT_FOOTER: &str = "This is an automated message. Please do not reply.";

/// The available template layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
	Notification,
	Welcome,
	Alert,
	Report,
}

impl TemplateKind {
	/// Parse a caller-supplied template type, case-insensitively.
	pub fn parse(raw: &str) -> MailResult<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"notification" => Ok(Self::Notification),
			"welcome" => Ok(Self::Welcome),
			"alert" => Ok(Self::Alert),
			"report" => Ok(Self::Report),
			other => Err(MailError::InvalidTemplateType(format!(
				"unknown template type '{}'; expected one of notification, welcome, alert, report",
				other
			))),
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Notification => "notification",
			Self::Welcome => "welcome",
			Self::Alert => "alert",
			Self::Report => "report",
		}
	}
}

impl std::fmt::Display for TemplateKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Call-to-action button, rendered only when both text and URL are given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
	pub text: String,
	pub url: String,
}

/// One metric on the report template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
	pub label: String,
	pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationData {
	pub title: String,
	pub heading: String,
	pub message: String,
	pub button: Option<Button>,
	pub extra_content: Option<String>,
	pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeData {
	pub title: String,
	pub message: String,
	pub features: Vec<String>,
	pub button: Option<Button>,
	pub extra_content: Option<String>,
	pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertData {
	pub title: String,
	pub alert_title: String,
	pub message: String,
	pub details: Vec<(String, String)>,
	pub button: Option<Button>,
	pub extra_content: Option<String>,
	pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportData {
	pub title: String,
	pub summary_title: String,
	pub message: String,
	pub stats: Vec<Stat>,
	pub button: Option<Button>,
	pub extra_content: Option<String>,
	pub footer: Option<String>,
}

/// Validated, typed template data, one variant per [`TemplateKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateData {
	Notification(NotificationData),
	Welcome(WelcomeData),
	Alert(AlertData),
	Report(ReportData),
}

impl TemplateData {
	pub fn kind(&self) -> TemplateKind {
		match self {
			Self::Notification(_) => TemplateKind::Notification,
			Self::Welcome(_) => TemplateKind::Welcome,
			Self::Alert(_) => TemplateKind::Alert,
			Self::Report(_) => TemplateKind::Report,
		}
	}

	/// Convert a dynamic context into typed data for the given template.
	///
	/// A required field that is absent, null or blank yields
	/// [`MailError::MissingTemplateField`] naming the field; a field of the
	/// wrong shape yields [`MailError::InvalidTemplateData`].
	pub fn from_context(kind: TemplateKind, context: &TemplateContext) -> MailResult<Self> {
		let button = button_from(context)?;
		let extra_content = optional_text(context, "extra_content")?;
		let footer = optional_text(context, "footer")?;

		match kind {
			TemplateKind::Notification => Ok(Self::Notification(NotificationData {
				title: required_text(context, "title")?,
				heading: required_text(context, "heading")?,
				message: required_text(context, "message")?,
				button,
				extra_content,
				footer,
			})),
			TemplateKind::Welcome => Ok(Self::Welcome(WelcomeData {
				title: required_text(context, "title")?,
				message: required_text(context, "message")?,
				features: features_from(context)?,
				button,
				extra_content,
				footer,
			})),
			TemplateKind::Alert => Ok(Self::Alert(AlertData {
				title: required_text(context, "title")?,
				alert_title: required_text(context, "alert_title")?,
				message: required_text(context, "message")?,
				details: details_from(context)?,
				button,
				extra_content,
				footer,
			})),
			TemplateKind::Report => Ok(Self::Report(ReportData {
				title: required_text(context, "title")?,
				summary_title: required_text(context, "summary_title")?,
				message: required_text(context, "message")?,
				stats: stats_from(context)?,
				button,
				extra_content,
				footer,
			})),
		}
	}

	/// Render the template to HTML.
	pub fn render(&self) -> String {
		match self {
			Self::Notification(data) => fill(
				NOTIFICATION_SKELETON,
				&[
					("title", escape_html(&data.title)),
					("heading", escape_html(&data.heading)),
					("message", escape_html(&data.message)),
					("button", button_html(&data.button)),
					("extra", extra_html(&data.extra_content)),
					("footer", footer_html(&data.footer)),
				],
			),
			Self::Welcome(data) => fill(
				WELCOME_SKELETON,
				&[
					("title", escape_html(&data.title)),
					("message", escape_html(&data.message)),
					("features", features_html(&data.features)),
					("button", button_html(&data.button)),
					("extra", extra_html(&data.extra_content)),
					("footer", footer_html(&data.footer)),
				],
			),
			Self::Alert(data) => fill(
				ALERT_SKELETON,
				&[
					("title", escape_html(&data.title)),
					("alert_title", escape_html(&data.alert_title)),
					("message", escape_html(&data.message)),
					("details", details_html(&data.details)),
					("button", button_html(&data.button)),
					("extra", extra_html(&data.extra_content)),
					("footer", footer_html(&data.footer)),
				],
			),
			Self::Report(data) => fill(
				REPORT_SKELETON,
				&[
					("title", escape_html(&data.title)),
					("summary_title", escape_html(&data.summary_title)),
					("message", escape_html(&data.message)),
					("stats", stats_html(&data.stats)),
					("button", button_html(&data.button)),
					("extra", extra_html(&data.extra_content)),
					("footer", footer_html(&data.footer)),
				],
			),
		}
	}
}

// --- context extraction -------------------------------------------------

fn text_value(value: &Value, field: &str) -> MailResult<String> {
	match value {
		Value::String(text) => Ok(text.clone()),
		Value::Number(number) => Ok(number.to_string()),
		Value::Bool(flag) => Ok(flag.to_string()),
		_ => Err(MailError::InvalidTemplateData(format!(
			"field '{}' must be text",
			field
		))),
	}
}

fn required_text(context: &TemplateContext, field: &str) -> MailResult<String> {
	let value = context
		.get(field)
		.filter(|value| !value.is_null())
		.ok_or_else(|| MailError::MissingTemplateField(field.to_string()))?;
	let text = text_value(value, field)?;
	if text.trim().is_empty() {
		return Err(MailError::MissingTemplateField(field.to_string()));
	}
	Ok(text)
}

fn optional_text(context: &TemplateContext, field: &str) -> MailResult<Option<String>> {
	match context.get(field) {
		None | Some(Value::Null) => Ok(None),
		Some(value) => {
			let text = text_value(value, field)?;
			Ok((!text.trim().is_empty()).then_some(text))
		}
	}
}

fn button_from(context: &TemplateContext) -> MailResult<Option<Button>> {
	let text = optional_text(context, "button_text")?;
	let url = optional_text(context, "button_url")?;
	Ok(match (text, url) {
		(Some(text), Some(url)) => Some(Button { text, url }),
		_ => None,
	})
}

fn features_from(context: &TemplateContext) -> MailResult<Vec<String>> {
	match context.get("features") {
		None | Some(Value::Null) => Ok(Vec::new()),
		Some(Value::Array(items)) => items
			.iter()
			.enumerate()
			.map(|(index, item)| text_value(item, &format!("features[{}]", index)))
			.collect(),
		Some(_) => Err(MailError::InvalidTemplateData(
			"'features' must be a list of strings".to_string(),
		)),
	}
}

fn details_from(context: &TemplateContext) -> MailResult<Vec<(String, String)>> {
	match context.get("details") {
		None | Some(Value::Null) => Ok(Vec::new()),
		Some(Value::Object(entries)) => entries
			.iter()
			.map(|(label, value)| Ok((label.clone(), text_value(value, label)?)))
			.collect(),
		Some(_) => Err(MailError::InvalidTemplateData(
			"'details' must be a mapping of label to value".to_string(),
		)),
	}
}

fn stats_from(context: &TemplateContext) -> MailResult<Vec<Stat>> {
	match context.get("stats") {
		None | Some(Value::Null) => Ok(Vec::new()),
		Some(Value::Array(items)) => items
			.iter()
			.map(|item| {
				let Value::Object(entry) = item else {
					return Err(MailError::InvalidTemplateData(
						"'stats' entries must be objects with 'label' and 'value'".to_string(),
					));
				};
				let label = entry.get("label").ok_or_else(|| {
					MailError::InvalidTemplateData("'stats' entry is missing 'label'".to_string())
				})?;
				let value = entry.get("value").ok_or_else(|| {
					MailError::InvalidTemplateData("'stats' entry is missing 'value'".to_string())
				})?;
				Ok(Stat {
					label: text_value(label, "stats.label")?,
					value: text_value(value, "stats.value")?,
				})
			})
			.collect(),
		Some(_) => Err(MailError::InvalidTemplateData(
			"'stats' must be a list of {label, value} entries".to_string(),
		)),
	}
}

// --- section rendering --------------------------------------------------

fn button_html(button: &Option<Button>) -> String {
	match button {
		Some(button) => format!(
			r#"<a href="{}" class="button">{}</a>"#,
			escape_html(&button.url),
			escape_html(&button.text)
		),
		None => String::new(),
	}
}

fn extra_html(extra_content: &Option<String>) -> String {
	extra_content
		.as_deref()
		.map(escape_html)
		.unwrap_or_default()
}

fn footer_html(footer: &Option<String>) -> String {
	match footer {
		Some(footer) => escape_html(footer),
		None => DEFAULT_FOOTER.to_string(),
	}
}

fn features_html(features: &[String]) -> String {
	if features.is_empty() {
		return String::new();
	}
	let mut html = String::from(r#"<div class="features">"#);
	for feature in features {
		html.push_str(r#"<div class="feature-item">"#);
		html.push_str(&escape_html(feature));
		html.push_str("</div>");
	}
	html.push_str("</div>");
	html
}

fn details_html(details: &[(String, String)]) -> String {
	if details.is_empty() {
		return String::new();
	}
	let mut html = String::from(r#"<div class="details">"#);
	for (label, value) in details {
		html.push_str("<div><strong>");
		html.push_str(&escape_html(label));
		html.push_str(":</strong> ");
		html.push_str(&escape_html(value));
		html.push_str("</div>");
	}
	html.push_str("</div>");
	html
}

fn stats_html(stats: &[Stat]) -> String {
	if stats.is_empty() {
		return String::new();
	}
	let mut html = String::from(r#"<div class="stats">"#);
	for stat in stats {
		html.push_str(r#"<div class="stat-card"><div class="stat-value">"#);
		html.push_str(&escape_html(&stat.value));
		html.push_str(r#"</div><div class="stat-label">"#);
		html.push_str(&escape_html(&stat.label));
		html.push_str("</div></div>");
	}
	html.push_str("</div>");
	html
}

/// Substitute `{{name}}` placeholders in a single pass.
///
/// Substituted content is never rescanned, so placeholder-like text inside
/// caller data cannot trigger a second substitution.
fn fill(skeleton: &str, values: &[(&str, String)]) -> String {
	let mut output = String::with_capacity(skeleton.len());
	let mut rest = skeleton;
	while let Some(start) = rest.find("{{") {
		output.push_str(&rest[..start]);
		let after = &rest[start + 2..];
		match after.find("}}") {
			Some(end) => {
				let key = &after[..end];
				match values.iter().find(|(name, _)| *name == key) {
					Some((_, value)) => output.push_str(value),
					None => {
						output.push_str("{{");
						output.push_str(key);
						output.push_str("}}");
					}
				}
				rest = &after[end + 2..];
			}
			None => {
				output.push_str("{{");
				rest = after;
			}
		}
	}
	output.push_str(rest);
	output
}

// --- skeletons ----------------------------------------------------------

const NOTIFICATION_SKELETON: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6;
               color: #333; margin: 0; padding: 0; background-color: #f4f4f4; }
        .container { max-width: 600px; margin: 20px auto; background: #ffffff; border-radius: 10px;
                     box-shadow: 0 2px 10px rgba(0,0,0,0.1); overflow: hidden; }
        .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white;
                  padding: 30px; text-align: center; }
        .header h1 { margin: 0; font-size: 28px; font-weight: 600; }
        .content { padding: 30px; }
        .content h2 { color: #667eea; margin-top: 0; }
        .message { background: #f8f9fa; padding: 20px; border-left: 4px solid #667eea;
                   border-radius: 5px; margin: 20px 0; }
        .footer { background: #f8f9fa; padding: 20px; text-align: center; color: #666;
                  font-size: 14px; border-top: 1px solid #e0e0e0; }
        .button { display: inline-block; padding: 12px 30px; background: #667eea; color: white;
                  text-decoration: none; border-radius: 5px; margin: 20px 0; font-weight: 600; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>&#128226; {{title}}</h1>
        </div>
        <div class="content">
            <h2>{{heading}}</h2>
            <div class="message">
                {{message}}
            </div>
            {{button}}
            {{extra}}
        </div>
        <div class="footer">
            {{footer}}
        </div>
    </div>
</body>
</html>
"#;

const WELCOME_SKELETON: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6;
               color: #333; margin: 0; padding: 0; background-color: #f4f4f4; }
        .container { max-width: 600px; margin: 20px auto; background: #ffffff; border-radius: 10px;
                     box-shadow: 0 2px 10px rgba(0,0,0,0.1); overflow: hidden; }
        .header { background: linear-gradient(135deg, #43e97b 0%, #38f9d7 100%); color: white;
                  padding: 40px; text-align: center; }
        .header h1 { margin: 0; font-size: 32px; font-weight: 600; }
        .welcome-icon { font-size: 60px; margin-bottom: 10px; }
        .content { padding: 30px; }
        .welcome-message { font-size: 18px; margin: 20px 0; color: #555; }
        .features { background: #f8f9fa; padding: 20px; border-radius: 5px; margin: 20px 0; }
        .feature-item { margin: 10px 0; padding-left: 25px; position: relative; }
        .feature-item:before { content: "\2713"; position: absolute; left: 0; color: #43e97b;
                               font-weight: bold; }
        .button { display: inline-block; padding: 15px 40px; background: #43e97b; color: white;
                  text-decoration: none; border-radius: 5px; margin: 20px 0; font-weight: 600;
                  font-size: 16px; }
        .footer { background: #f8f9fa; padding: 20px; text-align: center; color: #666;
                  font-size: 14px; border-top: 1px solid #e0e0e0; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="welcome-icon">&#127881;</div>
            <h1>{{title}}</h1>
        </div>
        <div class="content">
            <div class="welcome-message">
                {{message}}
            </div>
            {{features}}
            {{button}}
            {{extra}}
        </div>
        <div class="footer">
            {{footer}}
        </div>
    </div>
</body>
</html>
"#;

const ALERT_SKELETON: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6;
               color: #333; margin: 0; padding: 0; background-color: #f4f4f4; }
        .container { max-width: 600px; margin: 20px auto; background: #ffffff; border-radius: 10px;
                     box-shadow: 0 2px 10px rgba(0,0,0,0.1); overflow: hidden; }
        .header { background: linear-gradient(135deg, #f093fb 0%, #f5576c 100%); color: white;
                  padding: 30px; text-align: center; }
        .header h1 { margin: 0; font-size: 28px; font-weight: 600; }
        .alert-icon { font-size: 60px; margin-bottom: 10px; }
        .content { padding: 30px; }
        .alert-box { background: #fff3cd; border-left: 4px solid #f5576c; padding: 20px;
                     border-radius: 5px; margin: 20px 0; }
        .alert-title { color: #f5576c; font-weight: 600; font-size: 18px; margin-bottom: 10px; }
        .details { background: #f8f9fa; padding: 15px; border-radius: 5px; margin: 20px 0; }
        .button { display: inline-block; padding: 12px 30px; background: #f5576c; color: white;
                  text-decoration: none; border-radius: 5px; margin: 20px 0; font-weight: 600; }
        .footer { background: #f8f9fa; padding: 20px; text-align: center; color: #666;
                  font-size: 14px; border-top: 1px solid #e0e0e0; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="alert-icon">&#9888;</div>
            <h1>{{title}}</h1>
        </div>
        <div class="content">
            <div class="alert-box">
                <div class="alert-title">{{alert_title}}</div>
                <div>{{message}}</div>
            </div>
            {{details}}
            {{button}}
            {{extra}}
        </div>
        <div class="footer">
            {{footer}}
        </div>
    </div>
</body>
</html>
"#;

const REPORT_SKELETON: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6;
               color: #333; margin: 0; padding: 0; background-color: #f4f4f4; }
        .container { max-width: 600px; margin: 20px auto; background: #ffffff; border-radius: 10px;
                     box-shadow: 0 2px 10px rgba(0,0,0,0.1); overflow: hidden; }
        .header { background: linear-gradient(135deg, #4facfe 0%, #00f2fe 100%); color: white;
                  padding: 30px; text-align: center; }
        .header h1 { margin: 0; font-size: 28px; font-weight: 600; }
        .content { padding: 30px; }
        .summary { background: #f8f9fa; padding: 20px; border-radius: 5px; margin: 20px 0; }
        .summary-title { color: #4facfe; font-weight: 600; font-size: 18px; margin-bottom: 15px; }
        .stats { display: flex; flex-wrap: wrap; gap: 10px; margin: 20px 0; }
        .stat-card { flex: 1; min-width: 150px; background: white; border: 2px solid #e0e0e0;
                     border-radius: 5px; padding: 15px; text-align: center; }
        .stat-value { font-size: 32px; font-weight: 600; color: #4facfe; }
        .stat-label { color: #666; font-size: 14px; margin-top: 5px; }
        .button { display: inline-block; padding: 12px 30px; background: #4facfe; color: white;
                  text-decoration: none; border-radius: 5px; margin: 20px 0; font-weight: 600; }
        .footer { background: #f8f9fa; padding: 20px; text-align: center; color: #666;
                  font-size: 14px; border-top: 1px solid #e0e0e0; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>&#128202; {{title}}</h1>
        </div>
        <div class="content">
            <div class="summary">
                <div class="summary-title">{{summary_title}}</div>
                {{message}}
            </div>
            {{stats}}
            {{button}}
            {{extra}}
        </div>
        <div class="footer">
            {{footer}}
        </div>
    </div>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorCode;
	use rstest::rstest;
	use serde_json::json;

	fn context_from(value: Value) -> TemplateContext {
		match value {
			Value::Object(map) => map,
			_ => panic!("context fixture must be an object"),
		}
	}

	#[rstest]
	#[case("notification", TemplateKind::Notification)]
	#[case("WELCOME", TemplateKind::Welcome)]
	#[case(" Alert ", TemplateKind::Alert)]
	#[case("report", TemplateKind::Report)]
	fn test_kind_parse(#[case] raw: &str, #[case] expected: TemplateKind) {
		assert_eq!(TemplateKind::parse(raw).unwrap(), expected);
	}

	#[rstest]
	fn test_kind_parse_unknown() {
		assert_eq!(
			TemplateKind::parse("newsletter").unwrap_err().code(),
			ErrorCode::InvalidTemplateType
		);
	}

	#[rstest]
	fn test_missing_required_field_is_named() {
		// Arrange
		let context = context_from(json!({"title": "Outage", "message": "Disk full"}));

		// Act
		let err = TemplateData::from_context(TemplateKind::Alert, &context).unwrap_err();

		// Assert
		assert_eq!(err.code(), ErrorCode::MissingTemplateField);
		assert!(err.to_string().contains("alert_title"));
	}

	#[rstest]
	fn test_blank_required_field_counts_as_missing() {
		// Arrange
		let context = context_from(json!({"title": "Hi", "message": "   "}));

		// Act
		let err = TemplateData::from_context(TemplateKind::Welcome, &context).unwrap_err();

		// Assert
		assert_eq!(err.code(), ErrorCode::MissingTemplateField);
	}

	#[rstest]
	fn test_features_must_be_a_list() {
		// Arrange
		let context = context_from(json!({
			"title": "Hi", "message": "Welcome", "features": "fast"
		}));

		// Act
		let err = TemplateData::from_context(TemplateKind::Welcome, &context).unwrap_err();

		// Assert
		assert_eq!(err.code(), ErrorCode::InvalidTemplateData);
	}

	#[rstest]
	fn test_stats_entries_need_label_and_value() {
		// Arrange
		let context = context_from(json!({
			"title": "Weekly", "summary_title": "Summary", "message": "All good",
			"stats": [{"label": "Users"}]
		}));

		// Act
		let err = TemplateData::from_context(TemplateKind::Report, &context).unwrap_err();

		// Assert
		assert_eq!(err.code(), ErrorCode::InvalidTemplateData);
	}

	#[rstest]
	fn test_button_requires_both_halves() {
		// Arrange
		let context = context_from(json!({
			"title": "Hi", "heading": "Note", "message": "Body", "button_text": "Open"
		}));

		// Act
		let data = TemplateData::from_context(TemplateKind::Notification, &context).unwrap();
		let html = data.render();

		// Assert
		assert!(!html.contains("class=\"button\""));
	}

	#[rstest]
	fn test_render_is_deterministic() {
		// Arrange
		let context = context_from(json!({
			"title": "Weekly", "summary_title": "Summary", "message": "All good",
			"stats": [{"label": "Users", "value": 42}, {"label": "Errors", "value": 0}]
		}));
		let data = TemplateData::from_context(TemplateKind::Report, &context).unwrap();

		// Act / Assert
		assert_eq!(data.render(), data.render());
	}

	#[rstest]
	fn test_render_escapes_markup() {
		// Arrange
		let context = context_from(json!({
			"title": "<script>alert('xss')</script>",
			"heading": "Note",
			"message": "a & b"
		}));
		let data = TemplateData::from_context(TemplateKind::Notification, &context).unwrap();

		// Act
		let html = data.render();

		// Assert
		assert!(!html.contains("<script>"));
		assert!(html.contains("&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;"));
		assert!(html.contains("a &amp; b"));
	}

	#[rstest]
	fn test_details_preserve_insertion_order() {
		// Arrange
		let context = context_from(json!({
			"title": "Outage", "alert_title": "Disk", "message": "Full",
			"details": {"Zone": "eu-1", "Host": "db-3", "Since": "04:00"}
		}));

		// Act
		let TemplateData::Alert(data) =
			TemplateData::from_context(TemplateKind::Alert, &context).unwrap()
		else {
			panic!("expected alert data");
		};

		// Assert
		let labels: Vec<&str> = data.details.iter().map(|(label, _)| label.as_str()).collect();
		assert_eq!(labels, vec!["Zone", "Host", "Since"]);
	}

	#[rstest]
	fn test_placeholder_like_user_text_is_not_substituted() {
		// Arrange
		let context = context_from(json!({
			"title": "Hi", "heading": "Note", "message": "literal {{footer}} stays"
		}));
		let data = TemplateData::from_context(TemplateKind::Notification, &context).unwrap();

		// Act
		let html = data.render();

		// Assert
		assert!(html.contains("literal {{footer}} stays"));
	}

	#[rstest]
	fn test_default_footer_applied() {
		// Arrange
		let context = context_from(json!({
			"title": "Hi", "heading": "Note", "message": "Body"
		}));
		let data = TemplateData::from_context(TemplateKind::Notification, &context).unwrap();

		// Act / Assert
		assert!(data.render().contains(DEFAULT_FOOTER));
	}
}

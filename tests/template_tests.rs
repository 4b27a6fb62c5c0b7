//! Rendering tests for the four fixed templates.

use mailroom::{TemplateContext, TemplateData, TemplateKind};
use rstest::rstest;
use serde_json::{Value, json};

fn context(value: Value) -> TemplateContext {
	match value {
		Value::Object(map) => map,
		_ => panic!("context fixture must be a JSON object"),
	}
}

fn render(kind: TemplateKind, value: Value) -> String {
	TemplateData::from_context(kind, &context(value))
		.unwrap()
		.render()
}

/// Test: notification template renders title, heading, message and button
#[rstest]
fn test_notification_full() {
	// Act
	let html = render(
		TemplateKind::Notification,
		json!({
			"title": "Account activated",
			"heading": "You're in",
			"message": "Your account is ready to use.",
			"button_text": "Open dashboard",
			"button_url": "https://example.com/dashboard",
			"extra_content": "Questions? Just reply.",
			"footer": "The Example team"
		}),
	);

	// Assert
	assert!(html.contains("Account activated"));
	assert!(html.contains("You&#x27;re in") || html.contains("You're in"));
	assert!(html.contains("Your account is ready to use."));
	assert!(html.contains(r#"href="https://example.com/dashboard""#));
	assert!(html.contains("Open dashboard"));
	assert!(html.contains("The Example team"));
}

/// Test: welcome template renders a feature list in order
#[rstest]
fn test_welcome_features_in_order() {
	// Act
	let html = render(
		TemplateKind::Welcome,
		json!({
			"title": "Welcome aboard",
			"message": "Glad to have you.",
			"features": ["Fast setup", "Realtime sync", "Friendly support"]
		}),
	);

	// Assert
	assert!(html.contains("class=\"features\""));
	let fast = html.find("Fast setup").unwrap();
	let sync = html.find("Realtime sync").unwrap();
	let support = html.find("Friendly support").unwrap();
	assert!(fast < sync && sync < support);
}

/// Test: welcome template with no features has an empty features section
#[rstest]
fn test_welcome_without_features() {
	// Act
	let html = render(
		TemplateKind::Welcome,
		json!({"title": "Hi", "message": "Welcome"}),
	);

	// Assert
	assert!(!html.contains("class=\"features\""));
	assert!(html.contains("Welcome"));
}

/// Test: alert template renders details as label/value rows
#[rstest]
fn test_alert_details() {
	// Act
	let html = render(
		TemplateKind::Alert,
		json!({
			"title": "Service alert",
			"alert_title": "Disk almost full",
			"message": "Volume /data is at 92% capacity.",
			"details": {"Host": "db-3", "Volume": "/data", "Usage": "92%"}
		}),
	);

	// Assert
	assert!(html.contains("Disk almost full"));
	assert!(html.contains("<strong>Host:</strong> db-3"));
	assert!(html.contains("<strong>Usage:</strong> 92%"));
	let host = html.find("Host").unwrap();
	let usage = html.find("Usage").unwrap();
	assert!(host < usage);
}

/// Test: report template renders stat cards with numeric values
#[rstest]
fn test_report_stats() {
	// Act
	let html = render(
		TemplateKind::Report,
		json!({
			"title": "Weekly report",
			"summary_title": "Highlights",
			"message": "Strong week across the board.",
			"stats": [
				{"label": "Signups", "value": 128},
				{"label": "Churn", "value": "0.8%"}
			]
		}),
	);

	// Assert
	assert!(html.contains("class=\"stats\""));
	assert!(html.contains("128"));
	assert!(html.contains("Signups"));
	assert!(html.contains("0.8%"));
}

/// Test: rendering the same data twice yields byte-identical HTML
#[rstest]
#[case(TemplateKind::Notification, json!({"title": "T", "heading": "H", "message": "M"}))]
#[case(TemplateKind::Welcome, json!({"title": "T", "message": "M", "features": ["a", "b"]}))]
#[case(TemplateKind::Alert, json!({"title": "T", "alert_title": "A", "message": "M"}))]
#[case(TemplateKind::Report, json!({"title": "T", "summary_title": "S", "message": "M"}))]
fn test_rendering_is_deterministic(#[case] kind: TemplateKind, #[case] data: Value) {
	// Arrange
	let first = TemplateData::from_context(kind, &context(data.clone())).unwrap();
	let second = TemplateData::from_context(kind, &context(data)).unwrap();

	// Act / Assert
	assert_eq!(first.render(), second.render());
	assert_eq!(first.render(), first.render());
}

/// Test: markup in any user-supplied field is escaped
#[rstest]
fn test_markup_injection_is_escaped() {
	// Act
	let html = render(
		TemplateKind::Welcome,
		json!({
			"title": "Hi <b>there</b>",
			"message": "<script>alert('xss')</script>",
			"features": ["<img src=x onerror=alert(1)>"],
			"button_text": "Click\"me",
			"button_url": "https://example.com/?q=\"><script>",
			"extra_content": "<iframe></iframe>"
		}),
	);

	// Assert
	assert!(!html.contains("<script>"));
	assert!(!html.contains("<img src=x"));
	assert!(!html.contains("<iframe>"));
	assert!(html.contains("&lt;script&gt;"));
	assert!(html.contains("Hi &lt;b&gt;there&lt;/b&gt;"));
}

/// Test: every template applies the default footer when none is given
#[rstest]
#[case(TemplateKind::Notification, json!({"title": "T", "heading": "H", "message": "M"}))]
#[case(TemplateKind::Welcome, json!({"title": "T", "message": "M"}))]
#[case(TemplateKind::Alert, json!({"title": "T", "alert_title": "A", "message": "M"}))]
#[case(TemplateKind::Report, json!({"title": "T", "summary_title": "S", "message": "M"}))]
fn test_default_footer(#[case] kind: TemplateKind, #[case] data: Value) {
	// Act
	let html = render(kind, data);

	// Assert
	assert!(html.contains("This is an automated message. Please do not reply."));
}

/// Test: template kind round-trips through serde as its lowercase name
#[rstest]
fn test_template_kind_serialization() {
	// Act / Assert
	assert_eq!(
		serde_json::to_string(&TemplateKind::Welcome).unwrap(),
		"\"welcome\""
	);
	assert_eq!(
		serde_json::from_str::<TemplateKind>("\"report\"").unwrap(),
		TemplateKind::Report
	);
}

// Tests for report formatting

use ms15034_core::batch::{BatchSummary, SkippedLine};
use ms15034_core::report::{
    CheckEvent, ReportFormat, format_event, format_json, format_text, skipped_line_warning,
    summarize,
};
use ms15034_scanner::{ProbeResult, Verdict};

fn probed(url: &str, verdict: Verdict) -> CheckEvent {
    CheckEvent::Probed(ProbeResult::new(url.to_string(), verdict, 416))
}

// ============================================================================
// Text format
// ============================================================================

#[test]
fn test_text_target_started() {
    let event = CheckEvent::TargetStarted {
        origin: "https://example.com/".to_string(),
    };
    assert_eq!(format_text(&event), "[+] Checking https://example.com/");
}

#[test]
fn test_text_probed_lines() {
    assert_eq!(
        format_text(&probed("https://example.com/app.js", Verdict::Vulnerable)),
        " | https://example.com/app.js - vulnerable"
    );
    assert_eq!(
        format_text(&probed("https://example.com/site.css", Verdict::Safe)),
        " | https://example.com/site.css - safe"
    );
    assert_eq!(
        format_text(&probed("https://example.com/welcome.png", Verdict::Unknown)),
        " | https://example.com/welcome.png - unknown"
    );
}

#[test]
fn test_text_failure_and_interrupt() {
    let failed = CheckEvent::TargetFailed {
        origin: "https://example.com/".to_string(),
        message: "HTTP request failed: connection refused".to_string(),
    };
    assert_eq!(
        format_text(&failed),
        "[Error] - HTTP request failed: connection refused"
    );

    let interrupted = CheckEvent::Interrupted {
        origin: "https://example.com/".to_string(),
    };
    assert_eq!(
        format_text(&interrupted),
        "Interrupted by user, jumping to next target"
    );
}

#[test]
fn test_skipped_line_warning() {
    let skipped = SkippedLine {
        line_number: 3,
        line: "example.com".to_string(),
        reason: "is not a valid URL - Ignored".to_string(),
    };

    assert_eq!(
        format_text(&skipped_line_warning(&skipped)),
        "[Warning] - example.com is not a valid URL - Ignored"
    );
}

// ============================================================================
// JSON format
// ============================================================================

#[test]
fn test_json_probed_event() {
    let json = format_json(&probed("https://example.com/app.js", Verdict::Vulnerable));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["event"], "probed");
    assert_eq!(value["url"], "https://example.com/app.js");
    assert_eq!(value["verdict"], "vulnerable");
    assert_eq!(value["status_code"], 416);
    assert!(value.get("error").is_none());
}

#[test]
fn test_json_failure_event() {
    let event = CheckEvent::TargetFailed {
        origin: "https://example.com/".to_string(),
        message: "timed out".to_string(),
    };
    let value: serde_json::Value = serde_json::from_str(&format_json(&event)).unwrap();

    assert_eq!(value["event"], "target_failed");
    assert_eq!(value["origin"], "https://example.com/");
    assert_eq!(value["message"], "timed out");
}

#[test]
fn test_json_is_single_line() {
    let event = CheckEvent::Warning {
        message: "line one\nline two".to_string(),
    };
    assert!(!format_json(&event).contains('\n'));
}

#[test]
fn test_format_event_dispatch() {
    let event = probed("https://example.com/a.js", Verdict::Safe);

    assert_eq!(format_event(&event, ReportFormat::Text), format_text(&event));
    assert_eq!(format_event(&event, ReportFormat::Json), format_json(&event));
}

#[test]
fn test_report_format_from_str() {
    assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json));
    assert_eq!(ReportFormat::from_str("csv"), None);
}

// ============================================================================
// Summary
// ============================================================================

#[test]
fn test_summarize() {
    let summary = BatchSummary {
        outcomes: Vec::new(),
        vulnerable: 0,
        safe: 0,
        unknown: 0,
        failed: 2,
        interrupted: 1,
    };

    assert_eq!(
        summarize(&summary),
        "3 target(s): 0 vulnerable, 0 safe, 0 unknown, 2 failed, 1 interrupted"
    );
}

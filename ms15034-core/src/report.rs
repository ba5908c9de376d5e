// Line-oriented report output

use crate::batch::{BatchSummary, SkippedLine};
use ms15034_scanner::ProbeResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Something worth reporting while a batch runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CheckEvent {
    TargetStarted { origin: String },
    Probed(ProbeResult),
    TargetFailed { origin: String, message: String },
    Interrupted { origin: String },
    Warning { message: String },
}

/// Callback for reporting events as they happen
pub type CheckEventCallback = Arc<dyn Fn(CheckEvent) + Send + Sync>;

pub fn format_text(event: &CheckEvent) -> String {
    match event {
        CheckEvent::TargetStarted { origin } => format!("[+] Checking {}", origin),
        CheckEvent::Probed(result) => format!(" | {} - {}", result.url, result.verdict),
        CheckEvent::TargetFailed { message, .. } => format!("[Error] - {}", message),
        CheckEvent::Interrupted { .. } => "Interrupted by user, jumping to next target".to_string(),
        CheckEvent::Warning { message } => format!("[Warning] - {}", message),
    }
}

pub fn format_json(event: &CheckEvent) -> String {
    serde_json::to_string(event).unwrap_or_else(|e| {
        format!(r#"{{"event":"warning","message":"unserializable event: {}"}}"#, e)
    })
}

pub fn format_event(event: &CheckEvent, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => format_text(event),
        ReportFormat::Json => format_json(event),
    }
}

pub fn skipped_line_warning(skipped: &SkippedLine) -> CheckEvent {
    CheckEvent::Warning {
        message: format!("{} {}", skipped.line, skipped.reason),
    }
}

pub fn summarize(summary: &BatchSummary) -> String {
    format!(
        "{} target(s): {} vulnerable, {} safe, {} unknown, {} failed, {} interrupted",
        summary.outcomes.len() + summary.failed + summary.interrupted,
        summary.vulnerable,
        summary.safe,
        summary.unknown,
        summary.failed,
        summary.interrupted
    )
}

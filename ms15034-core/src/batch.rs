// Turns the command line argument into targets and checks each one in turn

use crate::check::{TargetOutcome, check_target};
use crate::report::{CheckEvent, CheckEventCallback};
use futures::future::{BoxFuture, FutureExt};
use ms15034_scanner::error::{Result, ScanError};
use ms15034_scanner::{Prober, Target, Verdict};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Where the targets come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    Url(String),
    File(PathBuf),
}

impl TargetSource {
    /// A URL when it starts with `http://` or `https://`, a file path otherwise
    pub fn from_argument(argument: &str) -> Self {
        if is_url_candidate(argument) {
            TargetSource::Url(argument.to_string())
        } else {
            let expanded = shellexpand::tilde(argument);
            TargetSource::File(PathBuf::from(expanded.as_ref()))
        }
    }
}

/// A line of a targets file that did not become a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct TargetList {
    pub targets: Vec<Target>,
    pub skipped: Vec<SkippedLine>,
}

pub fn is_url_candidate(line: &str) -> bool {
    line.starts_with("http://") || line.starts_with("https://")
}

pub fn load_targets(source: &TargetSource) -> Result<TargetList> {
    match source {
        TargetSource::Url(url) => Ok(TargetList {
            targets: vec![Target::new(url)?],
            skipped: Vec::new(),
        }),
        TargetSource::File(path) => load_targets_from_file(path),
    }
}

/// Load targets from a newline-delimited file. Blank lines are ignored, other
/// lines that are not usable URLs are returned in `skipped`.
pub fn load_targets_from_file(path: &PathBuf) -> Result<TargetList> {
    let content = fs::read_to_string(path).map_err(|e| {
        ScanError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to read targets file {}: {}", path.display(), e),
        ))
    })?;

    let mut list = TargetList::default();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if !is_url_candidate(line) {
            list.skipped.push(SkippedLine {
                line_number: index + 1,
                line: line.to_string(),
                reason: "is not a valid URL - Ignored".to_string(),
            });
            continue;
        }

        match Target::new(line) {
            Ok(target) => list.targets.push(target),
            Err(e) => list.skipped.push(SkippedLine {
                line_number: index + 1,
                line: line.to_string(),
                reason: format!("could not be parsed ({}) - Ignored", e),
            }),
        }
    }

    debug!(
        "Loaded {} target(s) from {}, skipped {} line(s)",
        list.targets.len(),
        path.display(),
        list.skipped.len()
    );

    Ok(list)
}

/// Tally of a finished batch
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<TargetOutcome>,
    pub vulnerable: usize,
    pub safe: usize,
    pub unknown: usize,
    pub failed: usize,
    pub interrupted: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: TargetOutcome) {
        match outcome.verdict {
            Verdict::Vulnerable => self.vulnerable += 1,
            Verdict::Safe => self.safe += 1,
            Verdict::Unknown => self.unknown += 1,
        }
        self.outcomes.push(outcome);
    }
}

enum TargetRun {
    Finished(Result<TargetOutcome>),
    Interrupted,
}

/// Check every target in order.
///
/// `interrupt` is called once per target; when the returned future resolves
/// before the check does, that target is abandoned and the batch moves on.
/// Neither failures nor interrupts stop the batch.
pub async fn execute_batch<F>(
    targets: &[Target],
    prober: &Prober,
    event_callback: Option<CheckEventCallback>,
    mut interrupt: F,
) -> BatchSummary
where
    F: FnMut() -> BoxFuture<'static, ()>,
{
    let emit = |event: CheckEvent| {
        if let Some(ref callback) = event_callback {
            callback(event);
        }
    };

    let mut summary = BatchSummary::default();

    for (idx, target) in targets.iter().enumerate() {
        debug!("Target {}/{}: {}", idx + 1, targets.len(), target.url());
        emit(CheckEvent::TargetStarted {
            origin: target.url().to_string(),
        });

        let run = tokio::select! {
            biased;
            _ = interrupt() => TargetRun::Interrupted,
            result = check_target(prober, target, event_callback.as_ref()) => TargetRun::Finished(result),
        };

        match run {
            TargetRun::Finished(Ok(outcome)) => summary.record(outcome),
            TargetRun::Finished(Err(e)) => {
                warn!("Check of {} failed: {}", target.url(), e);
                summary.failed += 1;
                emit(CheckEvent::TargetFailed {
                    origin: target.url().to_string(),
                    message: e.to_string(),
                });
            }
            TargetRun::Interrupted => {
                warn!("Check of {} interrupted", target.url());
                summary.interrupted += 1;
                emit(CheckEvent::Interrupted {
                    origin: target.url().to_string(),
                });
            }
        }
    }

    info!(
        "Batch complete: {} vulnerable, {} safe, {} unknown, {} failed, {} interrupted",
        summary.vulnerable, summary.safe, summary.unknown, summary.failed, summary.interrupted
    );

    summary
}

/// `execute_batch` with Ctrl-C skipping the current target
pub async fn execute_batch_until_ctrl_c(
    targets: &[Target],
    prober: &Prober,
    event_callback: Option<CheckEventCallback>,
) -> BatchSummary {
    execute_batch(targets, prober, event_callback, || {
        async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Unable to listen for Ctrl-C: {}", e);
                futures::future::pending::<()>().await;
            }
        }
        .boxed()
    })
    .await
}

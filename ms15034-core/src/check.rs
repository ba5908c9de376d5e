// Per-target workflow: fetch the homepage, collect candidate assets, probe them in order

use crate::report::{CheckEvent, CheckEventCallback};
use ms15034_scanner::error::Result;
use ms15034_scanner::{ProbeResult, Prober, Target, Verdict};
use scraper::Html;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Start,
    Fetching,
    Discovering,
    Probing,
    Done,
}

/// What a completed check found for one target
#[derive(Debug, Clone)]
pub struct TargetOutcome {
    pub origin: String,
    pub results: Vec<ProbeResult>,
    pub verdict: Verdict,
}

impl TargetOutcome {
    /// URLs that were actually probed, in probe order
    pub fn probed_urls(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.url.as_str()).collect()
    }
}

fn transition(target: &Target, from: CheckState, to: CheckState) -> CheckState {
    debug!("{}: {:?} -> {:?}", target.url(), from, to);
    to
}

/// Run the full check for one target.
///
/// A homepage fetch failure is returned as an error. Probe failures are not:
/// they count as `unknown` and the next candidate is tried. Probing stops at
/// the first `vulnerable` or `safe` verdict.
pub async fn check_target(
    prober: &Prober,
    target: &Target,
    event_callback: Option<&CheckEventCallback>,
) -> Result<TargetOutcome> {
    let mut state = transition(target, CheckState::Start, CheckState::Fetching);
    let body = prober.fetch_homepage(target).await?;

    state = transition(target, state, CheckState::Discovering);
    let candidates = {
        let document = Html::parse_document(&body);
        target.candidate_assets(&document)
    };
    debug!("{} candidate assets for {}", candidates.len(), target.url());

    state = transition(target, state, CheckState::Probing);
    let mut results = Vec::new();
    let mut verdict = Verdict::Unknown;

    for url in candidates {
        let result = prober.classify(&url).await;
        let result_verdict = result.verdict;

        if let Some(callback) = event_callback {
            callback(CheckEvent::Probed(result.clone()));
        }
        results.push(result);

        if result_verdict.is_definitive() {
            verdict = result_verdict;
            break;
        }
    }

    transition(target, state, CheckState::Done);
    info!(
        "{}: {} after {} probe(s)",
        target.url(),
        verdict,
        results.len()
    );

    Ok(TargetOutcome {
        origin: target.url().to_string(),
        results,
        verdict,
    })
}

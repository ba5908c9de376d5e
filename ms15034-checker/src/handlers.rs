use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use ms15034_core::batch::{TargetSource, execute_batch_until_ctrl_c, load_targets};
use ms15034_core::report::{
    CheckEvent, CheckEventCallback, ReportFormat, format_event, skipped_line_warning, summarize,
};
use ms15034_scanner::config::ProbeConfig;
use ms15034_scanner::{Prober, Signatures, Target, Verdict};
use std::sync::Arc;
use tracing::{debug, warn};

/// Build the run configuration from the parsed command line
pub fn build_probe_config(args: &ArgMatches) -> Result<ProbeConfig> {
    let timeout = *args.get_one::<u64>("timeout").unwrap_or(&20);
    let connect_timeout = *args.get_one::<u64>("connect-timeout").unwrap_or(&10);

    let mut config = ProbeConfig::new()
        .with_timeout(timeout)
        .with_connect_timeout(connect_timeout);

    if let Some(proxy) = args.get_one::<String>("proxy") {
        config = config.with_proxy(proxy.clone());
    }
    if let Some(user_agent) = args.get_one::<String>("user-agent") {
        config = config.with_user_agent(user_agent.clone());
    }

    let vulnerable = args.get_one::<String>("vulnerable-signature");
    let safe = args.get_one::<String>("safe-signature");
    if vulnerable.is_some() || safe.is_some() {
        let signatures =
            Signatures::with_overrides(vulnerable.map(String::as_str), safe.map(String::as_str))
                .context("Invalid detection signature")?;
        config = config.with_signatures(signatures);
    }

    Ok(config)
}

pub fn report_format(args: &ArgMatches) -> ReportFormat {
    args.get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text)
}

pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the positional argument into targets, warning about skipped lines
/// when verbose
pub fn load_targets_from_argument(
    argument: &str,
    verbose: bool,
    format: ReportFormat,
) -> Result<Vec<Target>> {
    let source = TargetSource::from_argument(argument);
    debug!("Target source: {:?}", source);

    let list = load_targets(&source).with_context(|| format!("Unable to load {}", argument))?;

    if verbose {
        for skipped in &list.skipped {
            print_event(&skipped_line_warning(skipped), format);
        }
    }

    if list.targets.is_empty() {
        warn!("No targets found in {}", argument);
    }

    Ok(list.targets)
}

fn colorize_text(event: &CheckEvent) -> String {
    match event {
        CheckEvent::TargetStarted { origin } => {
            format!("\n{} Checking {}", "[+]".green().bold(), origin.bright_white())
        }
        CheckEvent::Probed(result) => {
            let verdict = match result.verdict {
                Verdict::Vulnerable => result.verdict.as_str().red().bold(),
                Verdict::Safe => result.verdict.as_str().green().bold(),
                Verdict::Unknown => result.verdict.as_str().yellow(),
            };
            format!(" | {} - {}", result.url, verdict)
        }
        CheckEvent::TargetFailed { message, .. } => {
            format!("{} - {}", "[Error]".red().bold(), message)
        }
        CheckEvent::Interrupted { .. } => format_event(event, ReportFormat::Text)
            .yellow()
            .to_string(),
        CheckEvent::Warning { message } => format!("{} - {}", "[Warning]".yellow(), message),
    }
}

pub fn print_event(event: &CheckEvent, format: ReportFormat) {
    match format {
        ReportFormat::Text => println!("{}", colorize_text(event)),
        ReportFormat::Json => println!("{}", format_event(event, format)),
    }
}

pub async fn handle_check(args: &ArgMatches, argument: &str) -> Result<()> {
    let verbose = args.get_flag("verbose");
    let format = report_format(args);

    let config = build_probe_config(args)?;
    let prober = Prober::new(&config).context("Unable to configure the HTTP client")?;
    let targets = load_targets_from_argument(argument, verbose, format)?;

    let callback: CheckEventCallback = Arc::new(move |event: CheckEvent| {
        print_event(&event, format);
    });

    let summary = execute_batch_until_ctrl_c(&targets, &prober, Some(callback)).await;

    if verbose && format == ReportFormat::Text {
        println!("\n{}", summarize(&summary));
    }

    Ok(())
}

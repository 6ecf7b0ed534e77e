// crates/qualreg-cli/src/main.rs
// ============================================================================
// Module: Qualification Register CLI Entry Point
// Description: Load runner for the Qualification Register contract suite.
// Purpose: Run the suite with N virtual users, gate on thresholds, emit artifacts.
// Dependencies: clap, qualreg-config, qualreg-scenarios, serde, tokio
// ============================================================================

//! ## Overview
//! `qualreg run` executes the full scenario suite against the configured
//! endpoint with N virtual users. Each virtual user owns an independent
//! client, recorder, and RNG; nothing is shared between them but the
//! compiled contracts. At the end the run is gated on the check pass rate
//! and the p99 request duration, and a canonical `summary.json` plus a
//! readable `summary.md` land under the run root.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use qualreg_config::LoadConfig;
use qualreg_scenarios::CheckFailure;
use qualreg_scenarios::CheckReport;
use qualreg_scenarios::Contracts;
use qualreg_scenarios::LatencyStats;
use qualreg_scenarios::RequestSample;
use qualreg_scenarios::checks::CheckRecorder;
use qualreg_scenarios::client::ApiClient;
use qualreg_scenarios::run_suite;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinSet;
use url::Url;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Top-level CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "qualreg", about = "Qualification Register API contract and load runner")]
struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Runs the contract suite against a live endpoint.
    Run(RunCommand),
    /// Prints the package version.
    Version,
}

/// Flags for the `run` subcommand; flags override environment values.
#[derive(Debug, Args)]
struct RunCommand {
    /// Target base URL (overrides `ENDPOINT_URL`).
    #[arg(long)]
    endpoint: Option<Url>,
    /// Number of virtual users (overrides `QUALREG_VUS`).
    #[arg(long)]
    vus: Option<u32>,
    /// Suite iterations per virtual user (overrides `QUALREG_ITERATIONS`).
    #[arg(long)]
    iterations: Option<u32>,
    /// Maximum allowed p99 in milliseconds (overrides `QUALREG_MAX_P99_MS`).
    #[arg(long)]
    max_p99_ms: Option<u64>,
    /// Pause between scenario groups in ms (overrides `QUALREG_SLEEP_MS`).
    #[arg(long)]
    sleep_ms: Option<u64>,
    /// Artifact run root (overrides `QUALREG_RUN_ROOT`).
    #[arg(long)]
    run_root: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Summary Types
// ============================================================================

/// Final run summary written to `summary.json`.
#[derive(Debug, Serialize)]
struct RunSummary {
    /// Target base URL.
    endpoint: String,
    /// Number of virtual users.
    virtual_users: u32,
    /// Suite iterations per virtual user.
    iterations: u32,
    /// Overall status: `pass` or `fail`.
    status: String,
    /// Merged check outcomes.
    checks: CheckReport,
    /// Check pass rate between 0.0 and 1.0.
    check_rate: f64,
    /// Aggregated request latency figures.
    latency: LatencyStats,
    /// Threshold breach descriptions; empty on pass.
    breaches: Vec<String>,
    /// Run start, milliseconds since the epoch.
    started_at_ms: u128,
    /// Run end, milliseconds since the epoch.
    ended_at_ms: u128,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            let _ = write_stderr_line(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(command) => command_run(command).await,
        Commands::Version => {
            let version = env!("CARGO_PKG_VERSION");
            write_stdout_line(&format!("qualreg {version}"))
                .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Runs the suite and evaluates thresholds.
async fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let config = load_config(command)?;
    let contracts =
        Arc::new(Contracts::new().map_err(|err| CliError::new(err.to_string()))?);

    let started_at_ms = now_millis();
    let (checks, samples) = run_virtual_users(&config, &contracts).await;
    let ended_at_ms = now_millis();

    let latency = LatencyStats::from_samples(&samples);
    let check_rate = checks.rate();
    let breaches: Vec<String> = config
        .thresholds
        .evaluate(check_rate, latency.p99_ms)
        .iter()
        .map(ToString::to_string)
        .collect();
    let passed = breaches.is_empty() && checks.failures.is_empty();

    let summary = RunSummary {
        endpoint: config.endpoint_url.to_string(),
        virtual_users: config.virtual_users,
        iterations: config.iterations,
        status: if passed { "pass" } else { "fail" }.to_string(),
        checks,
        check_rate,
        latency,
        breaches,
        started_at_ms,
        ended_at_ms,
    };

    let run_root = resolve_run_root(config.run_root.as_deref(), started_at_ms);
    write_artifacts(&run_root, &summary)?;
    write_stdout_line(&render_result_line(&summary, &run_root))
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Loads the environment config and applies flag overrides.
fn load_config(command: RunCommand) -> CliResult<LoadConfig> {
    let mut config = LoadConfig::load().map_err(|err| CliError::new(err.to_string()))?;
    if let Some(endpoint) = command.endpoint {
        config.endpoint_url = endpoint;
    }
    if let Some(vus) = command.vus {
        if vus == 0 {
            return Err(CliError::new("--vus must be at least 1".to_string()));
        }
        config.virtual_users = vus;
    }
    if let Some(iterations) = command.iterations {
        if iterations == 0 {
            return Err(CliError::new("--iterations must be at least 1".to_string()));
        }
        config.iterations = iterations;
    }
    if let Some(max_p99_ms) = command.max_p99_ms {
        config.thresholds.max_p99_ms = max_p99_ms;
    }
    if let Some(sleep_ms) = command.sleep_ms {
        config.group_sleep = Duration::from_millis(sleep_ms);
    }
    if let Some(run_root) = command.run_root {
        config.run_root = Some(run_root);
    }
    Ok(config)
}

/// Spawns one task per virtual user and merges their results.
async fn run_virtual_users(
    config: &LoadConfig,
    contracts: &Arc<Contracts>,
) -> (CheckReport, Vec<RequestSample>) {
    let mut join_set: JoinSet<(CheckReport, Vec<RequestSample>)> = JoinSet::new();
    for _ in 0..config.virtual_users {
        let endpoint = config.endpoint_url.clone();
        let timeout = config.request_timeout;
        let iterations = config.iterations;
        let group_sleep = config.group_sleep;
        let contracts = Arc::clone(contracts);
        join_set.spawn(async move {
            run_one_virtual_user(endpoint, timeout, iterations, group_sleep, &contracts).await
        });
    }

    let mut merged = CheckReport::default();
    let mut samples = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((report, user_samples)) => {
                merged.merge(report);
                samples.extend(user_samples);
            }
            Err(err) => {
                merged.merge(CheckReport {
                    total: 1,
                    passed: 0,
                    failures: vec![CheckFailure {
                        name: "virtual user".to_string(),
                        details: vec![format!("task failed: {err}")],
                    }],
                });
            }
        }
    }
    (merged, samples)
}

/// Runs the full suite `iterations` times for one virtual user.
async fn run_one_virtual_user(
    endpoint: Url,
    timeout: Duration,
    iterations: u32,
    group_sleep: Duration,
    contracts: &Contracts,
) -> (CheckReport, Vec<RequestSample>) {
    let mut checks = CheckRecorder::new();
    let client = match ApiClient::new(endpoint, timeout) {
        Ok(client) => client,
        Err(err) => {
            checks.fail("client setup", vec![err.to_string()]);
            return (checks.into_report(), Vec::new());
        }
    };
    let mut rng = StdRng::from_entropy();
    for _ in 0..iterations {
        run_suite(&client, contracts, &mut checks, &mut rng, group_sleep).await;
    }
    (checks.into_report(), client.samples())
}

// ============================================================================
// SECTION: Artifacts
// ============================================================================

/// Milliseconds since the Unix epoch.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Resolves the artifact root, defaulting under `target/qualreg`.
fn resolve_run_root(overridden: Option<&Path>, stamp: u128) -> PathBuf {
    overridden.map_or_else(
        || PathBuf::from("target/qualreg").join(format!("run_{stamp}")),
        Path::to_path_buf,
    )
}

/// Writes `summary.json` (canonical JCS) and `summary.md` under the root.
fn write_artifacts(run_root: &Path, summary: &RunSummary) -> CliResult<()> {
    fs::create_dir_all(run_root)
        .map_err(|err| CliError::new(format!("failed to create run root: {err}")))?;
    let bytes = serde_jcs::to_vec(summary)
        .map_err(|err| CliError::new(format!("failed to serialize summary: {err}")))?;
    fs::write(run_root.join("summary.json"), bytes)
        .map_err(|err| CliError::new(format!("failed to write summary.json: {err}")))?;
    fs::write(run_root.join("summary.md"), summary_markdown(summary))
        .map_err(|err| CliError::new(format!("failed to write summary.md: {err}")))?;
    Ok(())
}

/// Renders the human-readable run summary.
fn summary_markdown(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Run summary: {}\n\n", summary.status));
    out.push_str(&format!("- Endpoint: {}\n", summary.endpoint));
    out.push_str(&format!(
        "- Virtual users: {} x {} iteration(s)\n",
        summary.virtual_users, summary.iterations
    ));
    out.push_str(&format!(
        "- Checks: {}/{} passed (rate {:.4})\n",
        summary.checks.passed, summary.checks.total, summary.check_rate
    ));
    out.push_str(&format!(
        "- Latency: p50 {}ms, p95 {}ms, p99 {}ms over {} request(s)\n",
        summary.latency.p50_ms,
        summary.latency.p95_ms,
        summary.latency.p99_ms,
        summary.latency.total_requests
    ));
    if !summary.breaches.is_empty() {
        out.push_str("\n## Threshold breaches\n\n");
        for breach in &summary.breaches {
            out.push_str(&format!("- {breach}\n"));
        }
    }
    if !summary.checks.failures.is_empty() {
        out.push_str("\n## Failed checks\n\n");
        for failure in &summary.checks.failures {
            out.push_str(&format!("- {}\n", failure.name));
            for detail in &failure.details {
                out.push_str(&format!("  - {detail}\n"));
            }
        }
    }
    out
}

/// One-line result for stdout.
fn render_result_line(summary: &RunSummary, run_root: &Path) -> String {
    format!(
        "{}: {}/{} checks passed, p99 {}ms (artifacts: {})",
        summary.status,
        summary.checks.passed,
        summary.checks.total,
        summary.latency.p99_ms,
        run_root.display()
    )
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout without the print macros.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr without the print macros.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

//! Binary entrypoint: run one analysis from the command line.
//!
//! `check-link` / `check-text` go through the same menu flow the browser uses and
//! print the resulting envelope as one JSON line. `request` reads one
//! AnalysisRequest JSON object from stdin and writes the report JSON to stdout.

use std::io::{self, Read, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use link_guard::{
  badge, verdict_comment, AnalysisClient, AnalysisReport, AnalysisRequest, Analyzer, Config,
  Coordinator, MenuTarget, ResultEnvelope, TabId,
};

#[derive(Parser)]
#[command(name = "link-guard", about = "Check a link or text with the analysis service")]
struct Cli {
  /// Analysis service base URL (overrides LINK_GUARD_ENDPOINT).
  #[arg(long, global = true)]
  endpoint: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Analyze a hyperlink, as the "check link" menu entry does.
  CheckLink { href: String },
  /// Analyze free text, extracting the first URL in it.
  CheckText { text: String },
  /// Read one AnalysisRequest JSON object from stdin, write the report to stdout.
  Request,
  /// Check that the analysis service is up.
  Ping,
}

const CLI_TAB: TabId = TabId(0);

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();

  if let Err(e) = run(Cli::parse()).await {
    let _ = writeln!(io::stderr(), "link-guard error: {:#}", e);
    std::process::exit(1);
  }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
  let mut config = Config::from_env().context("failed to read configuration")?;
  if let Some(endpoint) = cli.endpoint {
    config = config.with_endpoint(endpoint);
  }
  tracing::info!(endpoint = %config.endpoint, "using analysis service");
  let client = Arc::new(AnalysisClient::new(config));

  match cli.command {
    Command::CheckLink { href } => run_menu(client, MenuTarget::Link { href }).await,
    Command::CheckText { text } => run_menu(client, MenuTarget::Selection { text }).await,
    Command::Request => {
      let mut raw = String::new();
      io::stdin().lock().read_to_string(&mut raw)?;
      let request: AnalysisRequest =
        serde_json::from_str(&raw).context("stdin is not an AnalysisRequest")?;
      let report = client.analyze(&request).await?;
      print_summary(&report);
      let json = serde_json::to_vec(&report)?;
      io::stdout().write_all(&json)?;
      Ok(())
    }
    Command::Ping => {
      client.ping().await?;
      println!("ok");
      Ok(())
    }
  }
}

async fn run_menu(client: Arc<AnalysisClient>, target: MenuTarget) -> anyhow::Result<()> {
  let mut coordinator = Coordinator::new(client);
  let _inbox = coordinator.attach_tab(CLI_TAB);
  let envelope = coordinator.on_menu_click(CLI_TAB, target).await;

  println!("{}", serde_json::to_string(&envelope)?);
  match envelope {
    ResultEnvelope::AnalyzeResult { report } => {
      print_summary(&report);
      Ok(())
    }
    ResultEnvelope::AnalyzeError { message } => anyhow::bail!(message),
  }
}

fn print_summary(report: &AnalysisReport) {
  let b = badge(report.overall_score);
  let _ = writeln!(
    io::stderr(),
    "{} ({}/100)",
    b.label,
    link_guard::verdict::format_score(report.overall_score)
  );
  if let Some(comment) = verdict_comment(report.final_verdict.as_deref()) {
    let _ = writeln!(io::stderr(), "comment: {}", comment);
  }
  for r in &report.results {
    let mark = if r.is_suspicious { "!" } else { " " };
    let _ = writeln!(io::stderr(), "[{}] {}: {}", mark, r.check_name, r.details);
  }
}

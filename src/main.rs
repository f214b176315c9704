//! skill-invoke - run one request envelope through the skill
//!
//! Reads a request envelope JSON from a file (or stdin), answers it with the
//! standard handler chain and prints the response envelope on stdout. Logs go
//! to stderr.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cim_domain_skill::{InvocationContext, Skill, SkillConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Answer a voice platform request envelope locally
#[derive(Parser)]
#[command(name = "skill-invoke")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run a request envelope through the skill and print the response")]
struct Cli {
    /// Request envelope JSON file; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Skill configuration file (TOML)
    #[arg(short, long, env = "SKILL_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the APL layout documents
    #[arg(long, env = "SKILL_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,

    /// Function name reported in the invocation context
    #[arg(long, default_value = "cim-domain-skill")]
    function_name: String,

    /// Pretty-print the response
    #[arg(short, long)]
    pretty: bool,
}

fn read_payload(input: Option<&PathBuf>) -> Result<serde_json::Value> {
    let text = match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };

    serde_json::from_str(&text).context("request is not valid JSON")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SkillConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SkillConfig::default(),
    };
    if let Some(dir) = cli.assets_dir.clone() {
        config = config.with_assets_dir(dir);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let skill = Skill::standard(config);
    let payload = read_payload(cli.input.as_ref())?;
    let context = InvocationContext::new(cli.function_name);

    let response = skill
        .lambda_handler(payload, &context)
        .context("skill failed to answer the request")?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{output}");

    Ok(())
}

//! settler-cli: inspect a Settler account from the command line.
//!
//! Usage:
//!   settler-cli jobs list [--page N] [--limit N]
//!   settler-cli jobs get <job_id>
//!   settler-cli jobs run <job_id>
//!   settler-cli jobs delete <job_id>
//!   settler-cli reports get <job_id> [--execution <id>]
//!   settler-cli reports unmatched <job_id> [--execution <id>]
//!   settler-cli webhooks list
//!   settler-cli webhooks delete <webhook_id>
//!   settler-cli adapters list
//!   settler-cli adapters get <name>

use anyhow::{anyhow, bail, Context};
use settler::{SettlerClient, SettlerClientBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "version" | "--version" | "-V" => {
            println!("settler-cli {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        _ => {}
    }

    if let Err(e) = run(&args[1..]).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"settler-cli: Settler reconciliation API command line

USAGE:
    settler-cli <RESOURCE> <COMMAND> [ARGS]

COMMANDS:
    jobs list [--page N] [--limit N]
    jobs get|run|delete <job_id>
    reports get <job_id> [--execution <id>]
    reports unmatched <job_id> [--execution <id>]
    webhooks list
    webhooks delete <webhook_id>
    adapters list
    adapters get <name>
    version
    help

ENVIRONMENT:
    SETTLER_API_KEY             API key (required)
    SETTLER_BASE_URL            API endpoint (default https://api.settler.io)
    SETTLER_TIMEOUT_SECS        Per-request timeout (default 30)
    SETTLER_MAX_RETRIES         Retry budget (default 3)
    SETTLER_RETRY_BACKOFF       Backoff multiplier in seconds (default 1.0)
    RUST_LOG                    Log filter (default warn)"#
    );
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn positional<'a>(args: &'a [String], what: &str) -> anyhow::Result<&'a str> {
    args.get(2)
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing <{}>", what))
}

fn number_flag(args: &[String], name: &str, default: u32) -> anyhow::Result<u32> {
    match flag_value(args, name) {
        Some(v) => v
            .parse()
            .with_context(|| format!("{} expects a number, got {:?}", name, v)),
        None => Ok(default),
    }
}

async fn run(args: &[String]) -> anyhow::Result<()> {
    let client: SettlerClient = SettlerClientBuilder::from_env()
        .build()
        .context("failed to configure client")?;

    let resource = args[0].as_str();
    let command = args.get(1).map(String::as_str).unwrap_or("list");

    let output = match (resource, command) {
        ("jobs", "list") => {
            let page = number_flag(args, "--page", 1)?;
            let limit = number_flag(args, "--limit", 100)?;
            client.jobs().list(page, limit).await?
        }
        ("jobs", "get") => client.jobs().get(positional(args, "job_id")?).await?,
        ("jobs", "run") => client.jobs().run(positional(args, "job_id")?).await?,
        ("jobs", "delete") => {
            client.jobs().delete(positional(args, "job_id")?).await?;
            serde_json::json!({"deleted": true})
        }
        ("reports", "get") => {
            let job = positional(args, "job_id")?;
            client.reports().get(job, flag_value(args, "--execution")).await?
        }
        ("reports", "unmatched") => {
            let job = positional(args, "job_id")?;
            let records = client
                .reports()
                .get_unmatched(job, flag_value(args, "--execution"))
                .await?;
            serde_json::Value::Array(records)
        }
        ("webhooks", "list") => serde_json::Value::Array(client.webhooks().list().await?),
        ("webhooks", "delete") => {
            client
                .webhooks()
                .delete(positional(args, "webhook_id")?)
                .await?;
            serde_json::json!({"deleted": true})
        }
        ("adapters", "list") => serde_json::Value::Array(client.adapters().list().await?),
        ("adapters", "get") => client.adapters().get(positional(args, "name")?).await?,
        (r, c) => bail!("unknown command: {} {} (see `settler-cli help`)", r, c),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

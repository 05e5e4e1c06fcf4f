//! `BadgeShare` CLI — upload badge configurations and print share links.
//!
//! `save` stores a configuration on the server and prints the link to its
//! page. `link` builds a stateless link offline; the configuration rides in
//! the URL and nothing is stored.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::Read as _;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use badgeshare_core::badge::count_badges;
use badgeshare_core::links::{SAVE_ROUTE, inline_link, stored_link};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";

/// Share Merit Badge Controller configurations as copy-ready web pages.
#[derive(Parser)]
#[command(
    name = "badgeshare",
    version,
    about = "BadgeShare CLI — upload badge configurations and print shareable links",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         BADGESHARE_ADDR   Server address (default: http://127.0.0.1:3000)\n\n\
         {DIM}Examples:{RESET}\n  \
         badgeshare save badge_config.txt\n  \
         badgeshare save - --id troop42 < badge_config.txt\n  \
         badgeshare link badge_config.txt"
    ),
)]
struct Cli {
    /// BadgeShare server address.
    #[arg(long, env = "BADGESHARE_ADDR", default_value = "http://127.0.0.1:3000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a configuration on the server (kept for 24 hours) and print its link.
    Save {
        /// Configuration file, or `-` for stdin.
        file: String,
        /// Identifier to store under (random UUID if omitted).
        #[arg(long)]
        id: Option<String>,
    },
    /// Print a stateless link that carries the configuration in the URL.
    Link {
        /// Configuration file, or `-` for stdin.
        file: String,
    },
    /// Print the number of badges in a configuration.
    Count {
        /// Configuration file, or `-` for stdin.
        file: String,
    },
}

// ── HTTP client ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct SaveBody<'a> {
    id: &'a str,
    content: &'a str,
}

struct Client {
    http: reqwest::Client,
    addr: String,
}

impl Client {
    fn new(addr: String) -> Self {
        let http = reqwest::Client::new();
        Self { http, addr }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.addr.trim_end_matches('/'))
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> Result<Value> {
        let resp = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.addr))?;
        handle_response(resp).await
    }
}

async fn handle_response(resp: reqwest::Response) -> Result<Value> {
    let status = resp.status();
    let body = resp.text().await.context("failed to read response body")?;
    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
            .unwrap_or(body);
        bail!("server returned {status}: {message}");
    }
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).context("failed to parse response JSON")
}

// ── Commands ─────────────────────────────────────────────────────────

/// Read a configuration from a file, or from stdin when `file` is `-`.
fn read_config(file: &str) -> Result<String> {
    let content = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read configuration from stdin")?;
        buf
    } else {
        std::fs::read_to_string(Path::new(file))
            .with_context(|| format!("failed to read configuration file '{file}'"))?
    };

    if content.trim().is_empty() {
        bail!("configuration is empty");
    }
    Ok(content)
}

async fn cmd_save(client: &Client, file: &str, id: Option<String>) -> Result<()> {
    let content = read_config(file)?;
    let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    if id.is_empty() {
        bail!("--id must not be empty");
    }

    client
        .post(
            SAVE_ROUTE,
            &SaveBody {
                id: &id,
                content: &content,
            },
        )
        .await?;

    eprintln!(
        "{GREEN}{BOLD}✓{RESET} saved {} badges as {BOLD}{id}{RESET} {DIM}(expires in 24 hours){RESET}",
        count_badges(&content)
    );
    println!("{}", stored_link(&client.addr, &id));
    Ok(())
}

fn cmd_link(addr: &str, file: &str) -> Result<()> {
    let content = read_config(file)?;
    println!("{}", inline_link(addr, &content));
    Ok(())
}

fn cmd_count(file: &str) -> Result<()> {
    let content = read_config(file)?;
    println!("{}", count_badges(&content));
    Ok(())
}

// ── Command dispatch ─────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let client = Client::new(cli.server);

    match run(&client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{RED}{BOLD}✗ Error:{RESET} {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &Client, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Save { file, id } => cmd_save(client, &file, id).await,
        Commands::Link { file } => cmd_link(&client.addr, &file),
        Commands::Count { file } => cmd_count(&file),
    }
}

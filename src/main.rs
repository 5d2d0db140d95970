mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use engagement_log::config::AppConfig;
use engagement_log::scoring::{EngagementRecord, EngagementScorer, RateBasis, ScorePolicy};
use engagement_log::store::ContentStore;
use engagement_log::{format_float, format_number, format_percent};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "engagement-log", about = "Marketing content log with engagement scoring")]
struct Cli {
    /// Path to the TOML config (default: config/engagement.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Compute engagement metrics for the given counters
    Score(ScoreArgs),
    /// Print stored content records, newest first
    List(ListArgs),
    /// Write the default config file
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8788)]
    port: u16,
    /// Directory with the submission form's static files
    #[arg(long)]
    web_root: Option<String>,
    /// Content store file; overrides the config
    #[arg(long)]
    store: Option<PathBuf>,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8788,
            web_root: None,
            store: None,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    #[arg(long, default_value_t = 0)]
    views: i64,
    #[arg(long, default_value_t = 0)]
    likes: i64,
    #[arg(long, default_value_t = 0)]
    reposts: i64,
    #[arg(long, default_value_t = 0)]
    comments: i64,
    #[arg(long)]
    followers: Option<i64>,
    /// followers | views
    #[arg(long)]
    rate_basis: Option<String>,
    /// audience-normalized | fixed-divisor
    #[arg(long)]
    score_policy: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct ListArgs {
    #[arg(long)]
    store: Option<PathBuf>,
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/engagement.toml")]
    path: PathBuf,
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing("info");
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_serve(args, load_config(cli.config)?).await,
        Command::Score(args) => run_score(args, &load_config(cli.config)?),
        Command::List(args) => run_list(args, &load_config(cli.config)?).await,
        Command::InitConfig(args) => run_init_config(&args),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<AppConfig, String> {
    AppConfig::load(path)
        .map(|(config, _)| config)
        .map_err(|err| err.to_string())
}

async fn run_serve(args: ServeArgs, config: AppConfig) -> Result<(), String> {
    let store_path = args.store.clone().unwrap_or(config.store.path.clone());
    let store = ContentStore::load(store_path)
        .await
        .map_err(|err| err.to_string())?;
    server::serve(args, store, config.scorer()).await
}

fn run_score(args: ScoreArgs, config: &AppConfig) -> Result<(), String> {
    let rate_basis = match args.rate_basis.as_deref() {
        Some(value) => value.parse::<RateBasis>()?,
        None => config.scoring.rate_basis,
    };
    let score_policy = match args.score_policy.as_deref() {
        Some(value) => value.parse::<ScorePolicy>()?,
        None => config.scoring.score_policy,
    };
    let scorer = EngagementScorer::new(rate_basis, score_policy);

    let record = EngagementRecord {
        views: args.views,
        likes: args.likes,
        reposts: args.reposts,
        comments: args.comments,
        follower_count: args.followers,
    };
    let metrics = scorer.compute(&record);

    println!(
        "Engagement rate: {} (per {})",
        format_percent(metrics.engagement_rate),
        rate_basis
    );
    println!(
        "Engagement score: {} / 100 ({})",
        format_float(metrics.engagement_score, 2),
        score_policy
    );
    Ok(())
}

async fn run_list(args: ListArgs, config: &AppConfig) -> Result<(), String> {
    let store_path = args.store.unwrap_or(config.store.path.clone());
    let store = ContentStore::load(store_path)
        .await
        .map_err(|err| err.to_string())?;
    let records = store.list().await;
    if records.is_empty() {
        println!("No content stored yet.");
        return Ok(());
    }

    let limit = args.limit.unwrap_or(records.len());
    for record in records.iter().take(limit) {
        let engagement = &record.engagement;
        println!(
            "{}  {}  {} / {}",
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.platform.label(),
            record.display_category(),
            record.content_type.label()
        );
        println!("  {}", preview(&record.content, 72));
        println!(
            "  views {} | likes {} | reposts {} | comments {} | rate {} | score {}",
            format_number(engagement.counts.views),
            format_number(engagement.counts.likes),
            format_number(engagement.counts.reposts),
            format_number(engagement.counts.comments),
            format_percent(engagement.metrics.engagement_rate),
            format_float(engagement.metrics.engagement_score, 2)
        );
    }
    Ok(())
}

fn run_init_config(args: &InitConfigArgs) -> Result<(), String> {
    if args.path.exists() && !args.force {
        return Err(format!(
            "config already exists: {} (pass --force to overwrite)",
            args.path.display()
        ));
    }
    AppConfig::default()
        .write(&args.path)
        .map_err(|err| err.to_string())?;
    println!("Wrote {}", args.path.display());
    Ok(())
}

fn preview(text: &str, max_chars: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let truncated: String = single_line.chars().take(max_chars).collect();
    format!("{}...", truncated.trim_end())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}

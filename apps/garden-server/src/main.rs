use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use garden::config::GardenConfig;
use garden::Garden;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MODULE_NAME: &str = "garden";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
/// - Adds `mode=rwc` when no query is given so the file is created on first run.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    out.push('?');
    out.push_str(query.unwrap_or("mode=rwc"));
    Ok(out)
}

/// Garden Server - personal garden and plant-watering tracker
#[derive(Parser)]
#[command(name = "garden-server")]
#[command(about = "Garden Server - personal garden and plant-watering tracker")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Garden Server starting");

    if cli.print_config {
        println!("{}", redacted_yaml(&config)?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, args),
    }
}

/// DSN safe for logs and stdout: a password, if any, becomes `***`.
fn redact_dsn(dsn: &str) -> String {
    if !dsn.contains('@') {
        return dsn.to_string();
    }
    match Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "***".to_string(),
    }
}

/// YAML dump of the config with database credentials redacted.
fn redacted_yaml(config: &AppConfig) -> Result<String> {
    let mut shown = config.clone();
    if let Some(db) = shown.database.as_mut() {
        db.url = redact_dsn(&db.url);
    }
    shown.to_yaml()
}

/// Detect DB backend from URL scheme.
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim().to_owned();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(&raw)
        .map_err(|e| anyhow!("Invalid database DSN '{}': {}", redact_dsn(&raw), e))?;

    match url.scheme() {
        "sqlite" | "sqlite3" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// Final DSN: in-memory when `--mock` is set, sqlite paths resolved against home_dir.
fn resolve_dsn(config: &AppConfig, args: &CliArgs) -> Result<(String, Option<u32>)> {
    if args.mock {
        return Ok(("sqlite::memory:".to_string(), Some(1)));
    }

    let db_config = config.database.clone().unwrap_or_default();
    detect_from_dsn(&db_config)?;

    let mut dsn = db_config.url.trim().to_owned();
    if dsn.starts_with("sqlite://") {
        dsn = absolutize_sqlite_dsn(&dsn, Path::new(&config.server.home_dir), true)?;
    }
    Ok((dsn, db_config.max_conns))
}

async fn connect(dsn: &str, max_conns: Option<u32>) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(dsn.to_owned());
    opts.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if let Some(max) = max_conns {
        opts.max_connections(max);
    }

    let shown = redact_dsn(dsn);
    tracing::info!("Connecting to database: {}", shown);
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {shown}"))
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let garden_cfg: GardenConfig = config.module_config(MODULE_NAME)?;

    let (dsn, max_conns) = resolve_dsn(&config, &args)?;
    let db = connect(&dsn, max_conns).await?;
    Garden::migrate(&db).await?;

    let module = Garden::new(db, &garden_cfg)?;
    let timeout =
        (config.server.timeout_sec > 0).then(|| Duration::from_secs(config.server.timeout_sec));
    let app = garden::api::rest::middleware::apply_layers(
        module.router(),
        timeout,
        &config.server.cors_allowed_origins,
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Garden Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = wait_for_shutdown().await {
        tracing::error!("failed to listen for shutdown signals: {e}");
    }
    tracing::info!("shutdown signal received");
}

async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok(())
    }
}

fn check_config(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    let garden_cfg: GardenConfig = config.module_config(MODULE_NAME)?;
    Url::parse(&garden_cfg.identity.tokeninfo_url).with_context(|| {
        format!(
            "invalid modules.garden.identity.tokeninfo_url '{}'",
            garden_cfg.identity.tokeninfo_url
        )
    })?;
    let (dsn, _) = resolve_dsn(&config, &args)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Database: {}", redact_dsn(&dsn));
    println!("Server config:");
    println!("{}", redacted_yaml(&config)?);

    Ok(())
}

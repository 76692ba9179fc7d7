use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use services::{AppServices, Clock};
use tracing_subscriber::EnvFilter;
use web::{AppState, QuizServer, ServerConfig};

#[derive(Parser)]
#[command(name = "sql-quiz", about = "Practice SELECT queries against a small table")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Address to bind
    #[arg(long, env = "QUIZ_HOST", default_value = "0.0.0.0", global = true)]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = web::DEFAULT_PORT, global = true)]
    port: u16,

    /// SQLite database URL or file path
    #[arg(
        long = "db",
        env = "QUIZ_DB_URL",
        default_value = "sqlite:example.db",
        global = true
    )]
    db: String,

    /// File that accepted queries are appended to
    #[arg(long, env = "QUIZ_LOG_FILE", default_value = "query_logs.txt", global = true)]
    log_file: PathBuf,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run the web server (default)
    Serve,
    /// Reset the practice table to its seed rows and exit
    Seed,
}

#[derive(Debug)]
struct InvalidDbUrl {
    raw: String,
}

impl fmt::Display for InvalidDbUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid --db value: {}", self.raw)
    }
}

impl std::error::Error for InvalidDbUrl {}

fn is_in_memory(db_url: &str) -> bool {
    db_url == "sqlite::memory:" || db_url.contains("mode=memory")
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_in_memory(trimmed) || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its directory exist before connecting.
fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if is_in_memory(db_url) {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_url = normalize_sqlite_url(&cli.db);
    prepare_sqlite_file(&db_url)?;

    // Startup always resets the practice table.
    let services = AppServices::new_sqlite(&db_url, &cli.log_file, Clock::default_clock()).await?;
    tracing::info!(db = %db_url, log_file = %cli.log_file.display(), "storage ready");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = ServerConfig {
                host: cli.host,
                port: cli.port,
            };
            let state = Arc::new(AppState::from_services(&services));
            QuizServer::new(config, state).run().await?;
        }
        Command::Seed => {
            println!("practice table reset ({db_url})");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

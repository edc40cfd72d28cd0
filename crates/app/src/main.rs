use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::QuizConfig;
use services::{
    Clock, HttpMoviesLoader, MovieQuestionFactory, MoviesApiConfig, QuestionSource,
    StatisticsService,
};
use storage::repository::Storage;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://movie_quiz.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    MissingApiKey,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::MissingApiKey => {
                write!(f, "a movies API key is required (--api-key or MOVIEQUIZ_API_KEY)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    config: QuizConfig,
    source: Arc<dyn QuestionSource>,
    statistics: Arc<StatisticsService>,
}

impl UiApp for DesktopApp {
    fn quiz_config(&self) -> QuizConfig {
        self.config
    }

    fn question_source(&self) -> Arc<dyn QuestionSource> {
        Arc::clone(&self.source)
    }

    fn statistics(&self) -> Arc<StatisticsService> {
        Arc::clone(&self.statistics)
    }
}

struct Args {
    db_url: String,
    api_key: Option<String>,
    api_base_url: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--db <sqlite_url>] [--api-key <key>] [--api-base-url <url>]");
    eprintln!("  cargo run -p app -- stats [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --api-base-url https://tv-api.com/en/API");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MOVIEQUIZ_DB_URL, MOVIEQUIZ_API_KEY, MOVIEQUIZ_API_BASE_URL, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Stats,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "stats" => Some(Self::Stats),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("MOVIEQUIZ_DB_URL")
            .ok()
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut api_key = None;
        let mut api_base_url = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--api-key" => api_key = Some(require_value(args, "--api-key")?),
                "--api-base-url" => api_base_url = Some(require_value(args, "--api-base-url")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            api_key,
            api_base_url,
        })
    }

    /// Flags win over `MOVIEQUIZ_API_KEY` / `MOVIEQUIZ_API_BASE_URL`.
    fn movies_api(&self) -> Result<MoviesApiConfig, ArgsError> {
        let mut config = match (self.api_key.as_deref(), MoviesApiConfig::from_env()) {
            (Some(key), Some(env)) => MoviesApiConfig::new(env.base_url, key),
            (Some(key), None) => MoviesApiConfig::with_key(key),
            (None, Some(env)) => env,
            (None, None) => return Err(ArgsError::MissingApiKey),
        };
        if let Some(base_url) = &self.api_base_url {
            config.base_url.clone_from(base_url);
        }
        Ok(config)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup so core/services stay storage-agnostic.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    debug!(db = %parsed.db_url, "storage ready");

    let clock = Clock::system();
    let statistics = Arc::new(StatisticsService::new(
        clock,
        Arc::clone(&storage.statistics),
    ));

    match cmd {
        Command::Ui => {
            let movies = parsed.movies_api()?;
            info!(base_url = %movies.base_url, "starting movie quiz");
            let loader = Arc::new(HttpMoviesLoader::new(movies));
            let source: Arc<dyn QuestionSource> = Arc::new(MovieQuestionFactory::new(loader));

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                config: QuizConfig::default(),
                source,
                statistics,
            });
            let context = build_app_context(&app);

            // Some dev setups default tao windows to always-on-top.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Movie Quiz")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Stats => {
            let stats = statistics.current().await?;
            let best = stats.best_game();
            println!("Quizzes played: {}", stats.games_played());
            if stats.games_played() > 0 {
                println!(
                    "Record: {}/{} ({})",
                    best.correct(),
                    best.total(),
                    best.date().format("%d.%m.%y %H:%M")
                );
            }
            println!("Average accuracy: {:.2}%", stats.accuracy_percent());
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
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

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

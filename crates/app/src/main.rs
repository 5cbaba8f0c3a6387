use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{OpenAiChatClient, PracticeService, TutorConfig};
use tracing_subscriber::{EnvFilter, fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTimeout { raw: String },
    Blank { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout-secs value: {raw}"),
            ArgsError::Blank { flag } => write!(f, "{flag} must not be blank"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::Blank { flag });
    }
    Ok(value)
}

struct DesktopApp {
    practice: Arc<PracticeService>,
}

impl UiApp for DesktopApp {
    fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }
}

/// Command-line overrides for the environment config.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    base_url: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
    help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  word-buddy [--model <name>] [--base-url <url>] [--timeout-secs <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --model gpt-3.5-turbo");
    eprintln!("  --base-url https://api.openai.com/v1");
    eprintln!("  --timeout-secs 60");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  WORD_BUDDY_API_KEY (required), WORD_BUDDY_BASE_URL, WORD_BUDDY_MODEL,");
    eprintln!("  WORD_BUDDY_TIMEOUT_SECS, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--model" => parsed.model = Some(require_value(args, "--model")?),
                "--base-url" => parsed.base_url = Some(require_value(args, "--base-url")?),
                "--timeout-secs" => {
                    let value = require_value(args, "--timeout-secs")?;
                    let secs: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidTimeout { raw: value.clone() })?;
                    parsed.timeout = Some(Duration::from_secs(secs));
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn apply(self, config: Option<TutorConfig>) -> Option<TutorConfig> {
        let mut config = config?;
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(model) = self.model {
            config = config.with_model(model);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        Some(config)
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(log_fmt::layer().with_target(true))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(&mut std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if parsed.help {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let config = parsed.apply(TutorConfig::from_env());
    match config.as_ref() {
        Some(config) => tracing::info!(model = %config.model, base_url = %config.base_url, "tutor configured"),
        None => tracing::warn!("WORD_BUDDY_API_KEY is not set; tutor requests will fail"),
    }

    let tutor = OpenAiChatClient::new(config)?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        practice: Arc::new(PracticeService::new(Arc::new(tutor))),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Word Buddy")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

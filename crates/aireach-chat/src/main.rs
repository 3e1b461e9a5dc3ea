//! AIREACH chat: terminal front end for the rule-based reply engine.
//!
//! Usage:
//!   cargo run -p aireach-chat -- [--catalog data/responses.toml] [--no-delay]
//!   cargo run -p aireach-chat -- --ask "what is ai"
//!
//! Config: `$AIREACH_CONFIG` (default `config/aireach.toml`) and `AIREACH__*` env vars.

mod session;

use aireach_core::ChatConfig;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line flags; each one overrides the loaded config.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    catalog: Option<PathBuf>,
    ask: Option<String>,
    no_delay: bool,
    help: bool,
}

impl Args {
    fn apply(&self, config: &mut ChatConfig) {
        if let Some(path) = &self.catalog {
            config.catalog_path = Some(path.clone());
        }
        if self.no_delay {
            config.thinking_delay_ms = 0;
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--catalog" => {
                let path = args.next().ok_or("--catalog requires a PATH")?;
                parsed.catalog = Some(PathBuf::from(path));
            }
            "--ask" => parsed.ask = Some(args.next().ok_or("--ask requires TEXT")?),
            "--no-delay" => parsed.no_delay = true,
            "--help" | "-h" => parsed.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            print_usage();
            return Err(msg.into());
        }
    };
    if args.help {
        print_usage();
        return Ok(());
    }

    let mut config = ChatConfig::load()?;
    args.apply(&mut config);

    let resolver = config.build_resolver()?;

    if let Some(question) = &args.ask {
        println!("{}", resolver.reply(Some(question.as_str())));
        return Ok(());
    }

    info!(
        thinking_delay_ms = config.thinking_delay_ms,
        exit_command = %config.exit_command,
        "AIREACH chat started"
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        res = session::run(&config, &resolver, stdin, stdout) => {
            let replies = res?;
            info!(replies, "chat ended");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("CTRL-C received; ending chat");
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!("AIREACH chat: rule-based AI buddy");
    eprintln!("  --catalog PATH   Response catalog (.json or .toml); default is the built-in one");
    eprintln!("  --ask \"TEXT\"     Print the reply to TEXT and exit");
    eprintln!("  --no-delay       Reply immediately instead of simulating thinking time");
    eprintln!("  -h, --help       Show this help");
    eprintln!();
    eprintln!("Config: AIREACH_CONFIG (default config/aireach.toml), AIREACH__* env overrides.");
}

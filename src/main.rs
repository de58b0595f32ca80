//! Dashboard server entry point — CLI wiring, config loading, and startup.

use std::net::SocketAddr;
use std::path::Path;
use std::process;
use std::sync::Arc;

use solar_dash::api::{self, AppState};
use solar_dash::config::AppConfig;
use solar_dash::providers::chat::GeminiChat;
use solar_dash::providers::mail::ResendMail;
use solar_dash::providers::weather::OpenMeteo;
use solar_dash::store::ModelStore;
use tracing_subscriber::EnvFilter;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    seed_path: Option<String>,
    bind: Option<String>,
    port: Option<u16>,
}

fn print_help() {
    eprintln!("solar-dash — solar-investment dashboard backend");
    eprintln!();
    eprintln!("Usage: solar-dash [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>      Load configuration from TOML file");
    eprintln!("  --seed-data <path>   Seed JSON file (overrides config store.seed_path)");
    eprintln!("  --bind <addr>        Bind address (overrides config server.bind)");
    eprintln!("  --port <u16>         Listen port (overrides config server.port)");
    eprintln!("  --help               Show this help message");
    eprintln!();
    eprintln!("Secrets are read from the environment: GEMINI_API_KEY, RESEND_API_KEY.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        seed_path: None,
        bind: None,
        port: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--seed-data" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed-data requires a path argument");
                    process::exit(1);
                }
                cli.seed_path = Some(args[i].clone());
            }
            "--bind" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --bind requires an address argument");
                    process::exit(1);
                }
                cli.bind = Some(args[i].clone());
            }
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = Some(p);
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn env_secret(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = parse_args();

    // Load config: --config path or defaults, then CLI overrides on top
    let mut config = if let Some(ref path) = cli.config_path {
        match AppConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        AppConfig::default()
    };

    if let Some(seed_path) = cli.seed_path {
        config.store.seed_path = seed_path;
    }
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let store = match ModelStore::from_seed_file(Path::new(&config.store.seed_path)) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    tracing::info!(seed_path = %config.store.seed_path, "document store seeded");

    let http = match reqwest::Client::builder().build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: failed to build HTTP client: {e}");
            process::exit(1);
        }
    };

    let gemini_key = env_secret("GEMINI_API_KEY");
    let resend_key = env_secret("RESEND_API_KEY");
    if gemini_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; /ai-chat will report upstream unavailable");
    }
    if resend_key.is_none() {
        tracing::warn!("RESEND_API_KEY is not set; /contact will report upstream unavailable");
    }

    let state = Arc::new(AppState {
        store,
        location: config.location.clone(),
        weather: Arc::new(OpenMeteo::new(http.clone(), &config.weather)),
        chat: Arc::new(GeminiChat::new(http.clone(), config.ai.model, gemini_key)),
        mail: Arc::new(ResendMail::new(http, &config.contact, resend_key)),
    });

    let addr: SocketAddr = match format!("{}:{}", config.server.bind, config.server.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!(
                "error: invalid bind address \"{}:{}\": {e}",
                config.server.bind, config.server.port
            );
            process::exit(1);
        }
    };

    api::serve(state, addr).await;
}

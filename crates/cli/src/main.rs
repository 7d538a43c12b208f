//! MayGloss CLI - catalog browsing and a scripted storefront demo.
//!
//! # Usage
//!
//! ```bash
//! # List the product catalog
//! maygloss catalog
//!
//! # Walk through a full order lifecycle
//! maygloss demo
//!
//! # Ask the beauty concierge (requires GEMINI_API_KEY)
//! maygloss ask "Which gloss suits a bold evening look?"
//! ```
//!
//! # Commands
//!
//! - `catalog` - List the product catalog
//! - `demo` - Scripted shop/bag/checkout walkthrough
//! - `ask` - One-shot question to the beauty concierge

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use maygloss_storefront::config::StorefrontConfig;
use maygloss_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "maygloss")]
#[command(author, version, about = "MayGloss CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Catalog,
    /// Run a scripted order walkthrough
    Demo,
    /// Ask the beauty concierge a question
    Ask {
        /// The question to ask
        question: String,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "maygloss=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");
    let state = AppState::new(config);

    let result = match cli.command {
        Commands::Catalog => commands::catalog::run(&state),
        Commands::Demo => commands::demo::run(&state).await,
        Commands::Ask { question } => commands::ask::run(&state, &question).await,
    };

    if let Err(e) = result {
        tracing::error!("command failed: {e}");
        std::process::exit(1);
    }
}

//! Bella Mode CLI - the cart and page navigation from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a product and look at the cart
//! bella cart add "Dress Bella" "Rp 275.000" --qty 2
//! bella cart show
//!
//! # Change quantities by row number
//! bella cart inc 1
//! bella cart set 1 3
//!
//! # Check out without being asked
//! bella --yes checkout
//!
//! # Walk the page cycle
//! bella nav --from index.html next
//! ```
//!
//! # Environment Variables
//!
//! - `BELLA_DATA_DIR` - Directory holding the cart (default: .bella)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::path::PathBuf;

use bella_mode_core::Page;
use clap::{Parser, Subcommand};

mod commands;
mod storage;
mod terminal;

use commands::CommandError;
use commands::cart::CartAction;
use commands::nav::{NavAction, TerminalHost};
use terminal::TerminalInteraction;

#[derive(Parser)]
#[command(name = "bella")]
#[command(author, version, about = "Bella Mode cart and navigation")]
struct Cli {
    /// Directory holding the cart
    #[arg(long, env = "BELLA_DATA_DIR", default_value = ".bella", global = true)]
    data_dir: PathBuf,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Check out the whole cart
    Checkout,
    /// Navigate between pages
    Nav {
        /// Page to start from; unknown pages start from the home page
        #[arg(long, default_value = "index.html")]
        from: String,

        /// Change page immediately instead of waiting for the transition
        #[arg(long)]
        no_wait: bool,

        #[command(subcommand)]
        action: NavAction,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout is the command's output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bella_mode_cli=warn,bella_mode_core=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let terminal = || TerminalInteraction::new(io::stdin().lock(), io::stdout().lock(), cli.yes);

    match cli.command {
        Commands::Cart { action } => {
            commands::cart::run(action, &cli.data_dir, terminal())?;
        }
        Commands::Checkout => {
            commands::cart::checkout(&cli.data_dir, terminal())?;
        }
        Commands::Nav {
            from,
            no_wait,
            action,
        } => {
            let host = TerminalHost::new(io::stdout().lock(), !no_wait);
            commands::nav::run(Page::from_path(&from), action, host)?;
        }
    }
    Ok(())
}

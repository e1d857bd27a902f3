//! FreshCounter CLI - variant previews and Shopify maintenance from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Preview the variants an option edit would produce (no network)
//! fc-cli variants preview --file editor.json
//!
//! # Save edited options and variants of a product
//! fc-cli options save --product 123 --file editor.json
//!
//! # Show or change an order's custom status
//! fc-cli order status 1001
//! fc-cli order set-status 1001 Packed --first-name Ana --last-name Ruiz
//! fc-cli order steps 1001
//! ```
//!
//! # Commands
//!
//! - `variants preview` - Generate variants from an editor state file
//! - `options save` - Run the option/variant save against Shopify
//! - `order` - Read and update custom order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fc-cli")]
#[command(author, version, about = "FreshCounter CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with generated variants
    Variants {
        #[command(subcommand)]
        action: VariantsAction,
    },
    /// Save product options
    Options {
        #[command(subcommand)]
        action: OptionsAction,
    },
    /// Read and update custom order statuses
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum VariantsAction {
    /// Print the variants for the options in an editor state file
    Preview {
        /// JSON file with `options` and optional `prior_variants` / `current_variants`
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum OptionsAction {
    /// Save edited options and regenerated variants
    Save {
        /// Product id (numeric or gid)
        #[arg(short, long)]
        product: String,

        /// JSON file with `initial_options`, `current_options` and variants
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Show the current status and log
    Status {
        /// Order id (numeric or gid)
        order: String,
    },
    /// Move an order to a new status
    SetStatus {
        /// Order id (numeric or gid)
        order: String,

        /// New status name
        status: String,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// Show progress through the configured statuses
    Steps {
        /// Order id (numeric or gid)
        order: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Variants { action } => match action {
            VariantsAction::Preview { file } => commands::variants::preview(&file)?,
        },
        Commands::Options { action } => match action {
            OptionsAction::Save { product, file } => {
                commands::options::save(&product, &file).await?;
            }
        },
        Commands::Order { action } => match action {
            OrderAction::Status { order } => commands::order::status(&order).await?,
            OrderAction::SetStatus {
                order,
                status,
                first_name,
                last_name,
            } => {
                commands::order::set_status(&order, &status, &first_name, &last_name).await?;
            }
            OrderAction::Steps { order } => commands::order::steps(&order).await?,
        },
    }
    Ok(())
}

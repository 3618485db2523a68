pub mod analyze;
pub mod cards;
pub mod config;
pub mod demo;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "perks", about = "See how much of your credit card's benefits you actually used.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match statement transactions against a card's benefit credits.
    Analyze {
        /// Statement files (CSV, TSV, XLSX, XLS, ODS)
        files: Vec<String>,
        /// Card id, e.g. amexGold (default: from settings)
        #[arg(long)]
        card: Option<String>,
        /// Pasted transactions, one per line: "DUNKIN $6.50"
        #[arg(long)]
        text: Option<String>,
        /// Read pasted transactions from a file
        #[arg(long = "text-file")]
        text_file: Option<String>,
        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Benefit catalog JSON to use instead of the configured one
        #[arg(long)]
        catalog: Option<String>,
    },
    /// List the cards in the catalog.
    Cards {
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Show a card's benefits, caps and merchant keywords.
    Benefits {
        /// Card id
        card: String,
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Run an analysis over built-in sample transactions.
    Demo {
        #[arg(long)]
        card: Option<String>,
    },
    /// Show or change settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print current settings.
    Show,
    /// Set the card used when --card is omitted.
    SetCard {
        /// Card id
        id: String,
    },
    /// Use a JSON catalog instead of the built-in cards.
    SetCatalog {
        /// Path to catalog JSON
        path: String,
    },
    /// Go back to the built-in catalog.
    ClearCatalog,
}

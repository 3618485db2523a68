macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static regex::Regex {
            static R: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            R.get_or_init(|| regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}

mod aggregator;
mod analysis;
mod catalog;
mod classifier;
mod cli;
mod error;
mod fmt;
mod importer;
mod logging;
mod matcher;
mod models;
mod periods;
mod reports;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(settings::load_settings().log_filter.as_deref());

    let result = match cli.command {
        Commands::Analyze {
            files,
            card,
            text,
            text_file,
            json,
            catalog,
        } => cli::analyze::run(
            &files,
            card.as_deref(),
            text.as_deref(),
            text_file.as_deref(),
            json,
            catalog.as_deref(),
        ),
        Commands::Cards { catalog } => cli::cards::list(catalog.as_deref()),
        Commands::Benefits { card, catalog } => cli::cards::benefits(&card, catalog.as_deref()),
        Commands::Demo { card } => cli::demo::run(card.as_deref()),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::SetCard { id } => cli::config::set_card(&id),
            ConfigCommands::SetCatalog { path } => cli::config::set_catalog(&path),
            ConfigCommands::ClearCatalog => cli::config::clear_catalog(),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

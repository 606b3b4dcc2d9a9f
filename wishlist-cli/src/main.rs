//! Wishlist CLI - cool off before you buy

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;
mod output;

use commands::{add, get_logger, list, log_command, log_error, logs, profile, settings, status, user, wish};

/// Wishlist - wait before you buy, and know when you can afford it
#[derive(Parser)]
#[command(name = "wl", version, about, long_about = None)]
struct Cli {
    /// User to act as (defaults to the configured user)
    #[arg(long, short, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a wish
    Add {
        /// What you want to buy
        title: String,
        /// Price, e.g. 1299.99
        price: Decimal,
        /// Category label
        #[arg(long, short, default_value = "")]
        category: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List wishes
    List {
        /// Partition to list: active, completed or canceled
        #[arg(long, short)]
        status: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one wish from any partition
    Show {
        /// Wish ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Flip "still want" on an active wish
    Toggle {
        /// Wish ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark an active wish as bought
    Complete {
        /// Wish ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Give up on an active wish
    Cancel {
        /// Wish ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move an active wish to any status
    SetStatus {
        /// Wish ID
        id: String,
        /// Target status: active, completed or canceled
        status: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an active wish
    Remove {
        /// Wish ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and change settings
    Settings {
        #[command(subcommand)]
        command: settings::SettingsCommands,
    },

    /// View and change the financial profile
    Profile {
        #[command(subcommand)]
        command: profile::ProfileCommands,
    },

    /// Show a summary of the wishlist
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or set the default user
    User {
        /// New default user
        name: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Add { .. } => "add",
            Commands::List { .. } => "list",
            Commands::Show { .. } => "show",
            Commands::Toggle { .. } => "toggle",
            Commands::Complete { .. } => "complete",
            Commands::Cancel { .. } => "cancel",
            Commands::SetStatus { .. } => "set-status",
            Commands::Remove { .. } => "remove",
            Commands::Settings { .. } => "settings",
            Commands::Profile { .. } => "profile",
            Commands::Status { .. } => "status",
            Commands::User { .. } => "user",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.name();

    // Viewing the log should not add to it
    let logger = if command == "logs" { None } else { get_logger() };
    log_command(&logger, command);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(&logger, command, &e);
            output::error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let user = cli.user;
    match cli.command {
        Commands::Add { title, price, category, json } => add::run(user, &title, price, &category, json),
        Commands::List { status, json } => list::run(user, status.as_deref(), json),
        Commands::Show { id, json } => list::show(user, &id, json),
        Commands::Toggle { id, json } => wish::toggle(user, &id, json),
        Commands::Complete { id, json } => wish::complete(user, &id, json),
        Commands::Cancel { id, json } => wish::cancel(user, &id, json),
        Commands::SetStatus { id, status, json } => wish::set_status(user, &id, &status, json),
        Commands::Remove { id, force, json } => wish::remove(user, &id, force, json),
        Commands::Settings { command } => settings::run(user, command),
        Commands::Profile { command } => profile::run(user, command),
        Commands::Status { json } => status::run(user, json),
        Commands::User { name, json } => user::run(name, json),
        Commands::Logs { command } => logs::run(command),
    }
}

//! Settings command - notification preferences and cooldown bands

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use rust_decimal::Decimal;
use wishlist_core::{CooldownRange, Settings};

use super::{get_context, resolve_user};
use crate::output::{create_table, format_money, info, success};

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change settings (only the given fields)
    Set {
        #[arg(long)]
        notification_frequency: Option<String>,
        #[arg(long)]
        notification_channel: Option<String>,
        /// Free-text list of products to leave out
        #[arg(long)]
        excluded_products: Option<String>,
        #[arg(long)]
        total_spent: Option<Decimal>,
        #[arg(long)]
        total_purchases: Option<u32>,
        #[arg(long)]
        monthly_saving: Option<Decimal>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage cooldown bands
    Cooldown {
        #[command(subcommand)]
        command: CooldownCommands,
    },
}

#[derive(Subcommand)]
pub enum CooldownCommands {
    /// Append a band: prices in [min, max] wait `period` days
    Add {
        min: Decimal,
        max: Decimal,
        /// Days to wait
        period: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove all bands
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(user: Option<String>, command: SettingsCommands) -> Result<()> {
    let ctx = get_context()?;
    let user = resolve_user(user, &ctx.config)?;
    let service = &ctx.settings_service;

    match command {
        SettingsCommands::Show { json } => {
            let settings = service.get_settings(&user)?;
            print_settings(&settings, json)?;
        }
        SettingsCommands::Set {
            notification_frequency,
            notification_channel,
            excluded_products,
            total_spent,
            total_purchases,
            monthly_saving,
            json,
        } => {
            let settings = service.update_settings(&user, |settings| {
                if let Some(v) = &notification_frequency {
                    settings.notification_freq = v.clone();
                }
                if let Some(v) = &notification_channel {
                    settings.notification_channel = v.clone();
                }
                if let Some(v) = &excluded_products {
                    settings.excluded_products = v.clone();
                }
                if let Some(v) = total_spent {
                    settings.total_spent = v;
                }
                if let Some(v) = total_purchases {
                    settings.total_purchases = v;
                }
                if let Some(v) = monthly_saving {
                    settings.monthly_saving = v;
                }
            })?;
            if !json {
                success("✓ Settings saved");
            }
            print_settings(&settings, json)?;
        }
        SettingsCommands::Cooldown { command } => match command {
            CooldownCommands::Add { min, max, period, json } => {
                if min > max {
                    bail!("Band minimum must not exceed its maximum");
                }
                let settings = service.add_cooldown(&user, CooldownRange::new(min, max, period))?;
                if !json {
                    success("✓ Cooldown band added");
                }
                print_settings(&settings, json)?;
            }
            CooldownCommands::Clear { force, json } => {
                if !force && !json {
                    if !Confirm::new()
                        .with_prompt("Remove all cooldown bands?")
                        .default(false)
                        .interact()?
                    {
                        println!("{}", "Cancelled".dimmed());
                        return Ok(());
                    }
                }
                let settings = service.clear_cooldowns(&user)?;
                if !json {
                    success("✓ Cooldown bands cleared");
                }
                print_settings(&settings, json)?;
            }
        },
    }

    Ok(())
}

fn print_settings(settings: &Settings, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(settings)?);
        return Ok(());
    }

    println!("{}", "Cooldown bands".bold());
    if settings.cooldowns.is_empty() {
        info("  none - every wish waits the default period");
    } else {
        let mut table = create_table();
        table.set_header(vec!["#", "Min", "Max", "Days"]);
        for (i, band) in settings.cooldowns.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                format_money(band.min),
                format_money(band.max),
                band.period.to_string(),
            ]);
        }
        println!("{}", table);
    }

    println!();
    println!("{}", "Preferences".bold());
    println!("  Notification frequency: {}", settings.notification_freq);
    println!("  Notification channel:   {}", settings.notification_channel);
    println!("  Excluded products:      {}", settings.excluded_products);
    println!("  Total spent:            {}", format_money(settings.total_spent));
    println!("  Total purchases:        {}", settings.total_purchases);
    println!("  Monthly saving:         {}", format_money(settings.monthly_saving));

    Ok(())
}

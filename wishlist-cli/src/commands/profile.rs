//! Profile command - the figures comfort months are computed from

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use rust_decimal::Decimal;
use wishlist_core::UserProfile;

use super::{get_context, resolve_user};
use crate::output::{format_money, success, warning};

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the profile (only the given fields) and refresh active wishes
    Set {
        #[arg(long)]
        salary: Option<Decimal>,
        #[arg(long)]
        total_savings: Option<Decimal>,
        #[arg(long)]
        monthly_saving: Option<Decimal>,
        /// Share of savings to keep untouched, e.g. 0.2
        #[arg(long)]
        comfort_percent: Option<Decimal>,
        /// Comma-separated categories to block
        #[arg(long)]
        blocked_categories: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(user: Option<String>, command: ProfileCommands) -> Result<()> {
    let ctx = get_context()?;
    let user = resolve_user(user, &ctx.config)?;
    let service = &ctx.settings_service;

    match command {
        ProfileCommands::Show { json } => {
            let profile = service.profile_or_default(&user)?;
            print_profile(&profile, json)?;
        }
        ProfileCommands::Set {
            salary,
            total_savings,
            monthly_saving,
            comfort_percent,
            blocked_categories,
            json,
        } => {
            let mut profile = service.profile_or_default(&user)?;
            if let Some(v) = salary {
                profile.salary = v;
            }
            if let Some(v) = total_savings {
                profile.total_savings = v;
            }
            if let Some(v) = monthly_saving {
                profile.monthly_saving = v;
            }
            if let Some(v) = comfort_percent {
                profile.comfort_percent = v;
            }
            if let Some(text) = blocked_categories {
                profile.blocked_categories = UserProfile::parse_categories(&text);
            }

            // Out-of-range figures are saved anyway; they just yield "never"
            if let Err(problem) = profile.validate() {
                warning(&format!("Warning: {}", problem));
            }

            service.save_profile(&user, profile)?;
            let refreshed = ctx.wish_service.list_wishes(&user, None)?.len();
            if !json {
                success(&format!("✓ Profile saved, {} active wish(es) refreshed", refreshed));
            }
            print_profile(&service.profile_or_default(&user)?, json)?;
        }
    }

    Ok(())
}

fn print_profile(profile: &UserProfile, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(profile)?);
        return Ok(());
    }

    println!("{}", format!("Profile: {}", profile.nick).bold());
    println!("  Salary:          {}", format_money(profile.salary));
    println!("  Total savings:   {}", format_money(profile.total_savings));
    println!("  Monthly saving:  {}", format_money(profile.monthly_saving));
    let buffer = profile
        .comfort_percent
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|p| p.normalize().to_string())
        .unwrap_or_else(|| profile.comfort_percent.to_string());
    println!("  Comfort buffer:  {}%", buffer);
    if profile.blocked_categories.is_empty() {
        println!("  Blocked:         {}", "none".dimmed());
    } else {
        println!("  Blocked:         {}", profile.blocked_categories.join(", "));
    }

    Ok(())
}

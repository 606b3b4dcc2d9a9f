//! Add command - put a new wish on the list

use anyhow::Result;
use colored::Colorize;
use rust_decimal::Decimal;

use super::{get_context, resolve_user};
use crate::output::{format_comfort, format_money, warning};

pub fn run(user: Option<String>, title: &str, price: Decimal, category: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = resolve_user(user, &ctx.config)?;

    let wish = ctx.wish_service.add_wish(&user, title, price, category)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&wish)?);
        return Ok(());
    }

    println!("{} Added {} ({})", "✓".green(), wish.title.bold(), format_money(wish.price));
    println!("  ID: {}", wish.id.dimmed());
    println!("  Wait at least {} day(s) before buying", wish.recommended_cooling);
    println!("  Affordable: {}", format_comfort(wish.comfort_months));

    let profile = ctx.settings_service.profile_or_default(&user)?;
    if profile.blocks(&wish.category) {
        warning(&format!("Category '{}' is on your blocked list", wish.category));
    }

    Ok(())
}

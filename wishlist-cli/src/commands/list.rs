//! List and show commands - display wishes

use anyhow::{bail, Result};
use chrono::Utc;
use colored::Colorize;
use wishlist_core::{Wish, WishStatus};

use super::{get_context, resolve_user};
use crate::output::{create_table, format_comfort, format_money, format_status, info};

pub fn run(user: Option<String>, status: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = resolve_user(user, &ctx.config)?;

    let wishes = ctx.wish_service.list_wishes(&user, status)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&wishes)?);
        return Ok(());
    }

    if wishes.is_empty() {
        if WishStatus::from_filter(status).is_none() {
            info("Nothing matches that status. Use active, completed or canceled.");
        } else {
            info("No wishes here yet.");
        }
        return Ok(());
    }

    print_wishes(&wishes);
    Ok(())
}

pub fn show(user: Option<String>, id: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = resolve_user(user, &ctx.config)?;

    let Some(wish) = ctx.wish_service.get_wish(&user, id)? else {
        bail!("Wish '{}' not found", id);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&wish)?);
        return Ok(());
    }

    let now = Utc::now();
    println!("{}", wish.title.bold());
    println!("  ID:          {}", wish.id);
    println!("  Status:      {}", format_status(wish.status));
    println!("  Price:       {}", format_money(wish.price));
    if !wish.category.is_empty() {
        println!("  Category:    {}", wish.category);
    }
    println!(
        "  Cooling:     {} of {} day(s){}",
        wish.days_waited(now),
        wish.recommended_cooling,
        if wish.is_cooled_down(now) { " - done".green().to_string() } else { String::new() }
    );
    println!("  Still want:  {}", if wish.still_want { "yes" } else { "no" });
    println!("  Affordable:  {}", format_comfort(wish.comfort_months));
    println!("  Added:       {}", wish.created_at.format("%Y-%m-%d %H:%M"));
    println!("  Updated:     {}", wish.updated_at.format("%Y-%m-%d %H:%M"));

    Ok(())
}

/// Render wishes as a table, in the order given
pub fn print_wishes(wishes: &[Wish]) {
    let now = Utc::now();
    let mut table = create_table();
    table.set_header(vec!["ID", "Title", "Price", "Category", "Cooling", "Want", "Affordable"]);

    for wish in wishes {
        let cooling = format!("{}/{}d", wish.days_waited(now).min(wish.recommended_cooling), wish.recommended_cooling);
        let cooling = if wish.is_cooled_down(now) { cooling.green() } else { cooling.normal() };

        table.add_row(vec![
            wish.id.clone(),
            wish.title.clone(),
            format_money(wish.price),
            wish.category.clone(),
            cooling.to_string(),
            if wish.still_want { "yes".to_string() } else { "no".dimmed().to_string() },
            format_comfort(wish.comfort_months).to_string(),
        ]);
    }

    println!("{}", table);
}

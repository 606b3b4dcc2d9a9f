//! Status command - wishlist summary

use anyhow::Result;
use colored::Colorize;

use super::{get_context, resolve_user};
use crate::output::{create_table, format_money};

pub fn run(user: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = resolve_user(user, &ctx.config)?;
    let status = ctx.status_service.summary(&user)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", format!("Wishlist for {}", status.user).bold());
    println!();

    let mut table = create_table();
    table.add_row(vec!["Active", &status.active_count.to_string()]);
    table.add_row(vec!["Completed", &status.completed_count.to_string()]);
    table.add_row(vec!["Canceled", &status.canceled_count.to_string()]);
    table.add_row(vec!["Active total", &format_money(status.active_total)]);
    table.add_row(vec!["Spent on completed", &format_money(status.completed_total)]);
    println!("{}", table);
    println!();

    if status.active_count > 0 {
        println!("  {} affordable now", status.affordable_now.to_string().green());
        println!("  {} still wanted", status.still_wanted);
        if status.impossible > 0 {
            println!("  {} out of reach with current savings", status.impossible.to_string().red());
        }
    }

    Ok(())
}

//! Wish commands - toggle, move between partitions, remove

use anyhow::{bail, Result};
use colored::Colorize;
use dialoguer::Confirm;
use wishlist_core::{OperationResult, WishStatus, WishlistContext};

use super::{get_context, resolve_user};
use crate::output::{format_status, success};

fn open(user: Option<String>) -> Result<(WishlistContext, String)> {
    let ctx = get_context()?;
    let user = resolve_user(user, &ctx.config)?;
    Ok((ctx, user))
}

/// Report the outcome of a mutation that can miss
fn report(found: bool, id: &str, done: &str, json: bool) -> Result<()> {
    if json {
        let result: OperationResult<String> = if found {
            OperationResult::ok(id.to_string())
        } else {
            OperationResult::fail(format!("Active wish '{}' not found", id))
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !found {
        bail!("Active wish '{}' not found", id);
    }
    success(&format!("✓ {}", done));
    Ok(())
}

pub fn toggle(user: Option<String>, id: &str, json: bool) -> Result<()> {
    let (ctx, user) = open(user)?;
    let found = ctx.wish_service.toggle_still_want(&user, id)?;
    report(found, id, "Toggled \"still want\"", json)
}

pub fn complete(user: Option<String>, id: &str, json: bool) -> Result<()> {
    let (ctx, user) = open(user)?;
    let found = ctx.wish_service.complete(&user, id)?;
    report(found, id, "Marked as bought", json)
}

pub fn cancel(user: Option<String>, id: &str, json: bool) -> Result<()> {
    let (ctx, user) = open(user)?;
    let found = ctx.wish_service.cancel(&user, id)?;
    report(found, id, "Canceled", json)
}

pub fn set_status(user: Option<String>, id: &str, status: &str, json: bool) -> Result<()> {
    let status: WishStatus = status.trim().to_lowercase().parse()?;
    let (ctx, user) = open(user)?;
    let found = ctx.wish_service.set_status(&user, id, status)?;
    report(found, id, &format!("Moved to {}", format_status(status)), json)
}

pub fn remove(user: Option<String>, id: &str, force: bool, json: bool) -> Result<()> {
    let (ctx, user) = open(user)?;

    // Confirm removal unless --force
    if !force && !json {
        let title = ctx
            .wish_service
            .get_wish(&user, id)?
            .filter(|w| w.status == WishStatus::Active)
            .map(|w| w.title);

        if let Some(title) = title {
            println!("\n{}", format!("This will delete '{}' for good.", title).yellow());
            println!("{}\n", "Use `wl cancel` to keep it in your history instead.".dimmed());

            if !Confirm::new()
                .with_prompt("Are you sure?")
                .default(false)
                .interact()?
            {
                println!("{}\n", "Cancelled".dimmed());
                return Ok(());
            }
        }
    }

    let found = ctx.wish_service.remove_wish(&user, id)?;
    report(found, id, "Removed", json)
}

//! Category menu flows.

use std::io::{BufRead, Write};
use stockroom_core::{Category, ServiceError};

use super::App;
use crate::error::CliResult;
use crate::ui::{describe, Console};

const CATEGORY_MENU: [&str; 5] = [
    "Add category",
    "List categories",
    "Rename category",
    "Delete category",
    "Back to main menu",
];

pub(super) fn menu<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> CliResult<()> {
    loop {
        console.menu("MANAGE CATEGORIES", &CATEGORY_MENU)?;
        match console.prompt("Select an option: ")?.as_str() {
            "1" => add(app, console)?,
            "2" => {
                show_listing(app, console)?;
            }
            "3" => rename(app, console)?,
            "4" => delete(app, console)?,
            "5" => return Ok(()),
            _ => console.error("Invalid option.")?,
        }
    }
}

fn add<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> CliResult<()> {
    if console.settle(app.categories.ensure_capacity())?.is_none() {
        return Ok(());
    }

    loop {
        let raw = console.prompt("Enter the new category name: ")?;
        match app.categories.add_category(&raw) {
            Ok(_) => return console.success(format!("Category '{raw}' added.")),
            // Blank names re-prompt; every other refusal ends the flow.
            Err(err @ ServiceError::Validation(_)) => console.error(describe(&err))?,
            Err(err) => {
                console.settle::<()>(Err(err))?;
                return Ok(());
            }
        }
    }
}

/// Prints the category table; `None` when there is nothing to pick from.
fn show_listing<R: BufRead, W: Write>(
    app: &App,
    console: &mut Console<R, W>,
) -> CliResult<Option<Vec<Category>>> {
    let listing = app.categories.list_categories()?;
    if listing.is_empty() {
        console.info("No categories registered.")?;
        return Ok(None);
    }
    console.category_table(listing.as_slice())?;
    Ok(Some(listing.into_vec()))
}

fn rename<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> CliResult<()> {
    let Some(categories) = show_listing(app, console)? else {
        return Ok(());
    };
    let id = console.prompt_until("Enter the ID of the category to rename: ", |raw| {
        app.categories.resolve_category_id(raw, &categories)
    })?;

    loop {
        let raw = console.prompt("Enter the new name: ")?;
        match app.categories.rename_category(id, &raw) {
            Ok(()) => return console.success("Category renamed."),
            Err(err @ ServiceError::Validation(_)) => console.error(describe(&err))?,
            Err(err) => {
                console.settle::<()>(Err(err))?;
                return Ok(());
            }
        }
    }
}

fn delete<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> CliResult<()> {
    let Some(categories) = show_listing(app, console)? else {
        return Ok(());
    };
    let id = console.prompt_until("Enter the ID of the category to delete: ", |raw| {
        app.categories.resolve_category_id(raw, &categories)
    })?;

    if console.settle(app.categories.delete_category(id))?.is_some() {
        console.success("Category deleted.")?;
    }
    Ok(())
}

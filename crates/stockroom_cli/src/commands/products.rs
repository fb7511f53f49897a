//! Product menu flows.

use std::io::{BufRead, Write};
use stockroom_core::{
    parse_edit_quantity, parse_initial_quantity, parse_price, validate_description,
    validate_name, CategoryId, CategorySelection, DeleteTarget, EditChoice, NewProduct,
    ProductId, ProductRecord, ProductUpdate, ServiceError, CANCEL_SENTINEL,
};

use super::App;
use crate::error::CliResult;
use crate::ui::{describe, Console};

const PRODUCT_MENU: [&str; 6] = [
    "Add product",
    "Edit product",
    "List products",
    "Search product by ID",
    "Delete product",
    "Back to main menu",
];

const EDIT_MENU: [&str; 6] = [
    "Name",
    "Description",
    "Quantity",
    "Price",
    "Category",
    "Finish editing",
];

pub(super) fn menu<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> CliResult<()> {
    loop {
        console.menu("MANAGE PRODUCTS", &PRODUCT_MENU)?;
        match console.prompt("Select an option: ")?.as_str() {
            "1" => add(app, console)?,
            "2" => edit(app, console)?,
            "3" => {
                show_listing(app, console)?;
            }
            "4" => search(app, console)?,
            "5" => delete(app, console)?,
            "6" => return Ok(()),
            _ => console.error("Invalid option.")?,
        }
    }
}

fn add<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> CliResult<()> {
    console.line("\nChoose a category or create a new one:")?;
    let category_id = choose_category(app, console)?;

    let name = console.prompt_until("Enter the product name: ", |raw| Ok(validate_name(raw)?))?;
    let description = console.prompt_until("Enter the product description: ", |raw| {
        Ok(validate_description(raw)?)
    })?;
    let quantity = console.prompt_until("Enter the initial stock quantity: ", |raw| {
        Ok(parse_initial_quantity(raw)?)
    })?;
    let price = console.prompt_until("Enter the product price (whole number): ", |raw| {
        Ok(parse_price(raw)?)
    })?;

    let product = NewProduct {
        name,
        description,
        quantity,
        price,
        category_id,
    };
    let label = product.name.clone();
    if console.settle(app.products.add_product(product))?.is_some() {
        console.success(format!("Product '{label}' added."))?;
    }
    Ok(())
}

/// Runs the "existing or create new" selection until a category is bound.
fn choose_category<R: BufRead, W: Write>(
    app: &App,
    console: &mut Console<R, W>,
) -> CliResult<CategoryId> {
    loop {
        let choices = app.products.category_choices()?;
        console.category_choices(&choices)?;
        let selection = console.prompt_until("Select an option: ", |raw| {
            app.products.select_category(&choices, raw)
        })?;
        match selection {
            CategorySelection::Existing(id) => return Ok(id),
            CategorySelection::CreateNew => {
                if let Some(id) = create_category(app, console)? {
                    return Ok(id);
                }
            }
        }
    }
}

/// Prompts for a new category name, re-prompting on blank or taken names.
///
/// Yields `None` when the category cap is already reached.
fn create_category<R: BufRead, W: Write>(
    app: &App,
    console: &mut Console<R, W>,
) -> CliResult<Option<CategoryId>> {
    loop {
        let raw = console.prompt("Enter the new category name: ")?;
        match app.products.create_category_inline(&raw) {
            Ok(id) => {
                console.success(format!("Category '{raw}' created."))?;
                return Ok(Some(id));
            }
            Err(err @ ServiceError::LimitExceeded { .. }) => {
                console.settle::<()>(Err(err))?;
                return Ok(None);
            }
            Err(err) if err.is_recoverable() => console.error(describe(&err))?,
            Err(err) => return Err(err.into()),
        }
    }
}

/// Prints the product table; `None` when there is nothing to pick from.
fn show_listing<R: BufRead, W: Write>(
    app: &App,
    console: &mut Console<R, W>,
) -> CliResult<Option<Vec<ProductRecord>>> {
    let listing = app.products.list_products()?;
    if listing.is_empty() {
        console.info("No products registered.")?;
        return Ok(None);
    }
    console.product_table(listing.as_slice())?;
    Ok(Some(listing.into_vec()))
}

fn edit<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> CliResult<()> {
    let Some(products) = show_listing(app, console)? else {
        return Ok(());
    };
    let id = console.prompt_until("Enter the ID of the product to edit: ", |raw| {
        app.products.resolve_product_id(raw, &products)
    })?;

    loop {
        console.menu("EDIT PRODUCT", &EDIT_MENU)?;
        let choice = console.prompt_until("Select an option: ", EditChoice::parse)?;
        match choice {
            EditChoice::Name => {
                let name =
                    console.prompt_until("Enter the new name: ", |raw| Ok(validate_name(raw)?))?;
                apply(app, console, id, ProductUpdate::Name(name), "Name updated.")?;
            }
            EditChoice::Description => {
                let description = console.prompt_until("Enter the new description: ", |raw| {
                    Ok(validate_description(raw)?)
                })?;
                apply(
                    app,
                    console,
                    id,
                    ProductUpdate::Description(description),
                    "Description updated.",
                )?;
            }
            EditChoice::Quantity => {
                let quantity = console.prompt_until("Enter the new quantity: ", |raw| {
                    Ok(parse_edit_quantity(raw)?)
                })?;
                apply(
                    app,
                    console,
                    id,
                    ProductUpdate::Quantity(quantity),
                    "Quantity updated.",
                )?;
            }
            EditChoice::Price => {
                let price =
                    console.prompt_until("Enter the new price: ", |raw| Ok(parse_price(raw)?))?;
                apply(app, console, id, ProductUpdate::Price(price), "Price updated.")?;
            }
            EditChoice::Category => {
                console.line("\nChoose the new category:")?;
                let category_id = choose_category(app, console)?;
                apply(
                    app,
                    console,
                    id,
                    ProductUpdate::Category(category_id),
                    "Category updated.",
                )?;
            }
            EditChoice::Finish => return console.info("Edit finished."),
        }
    }
}

fn apply<R: BufRead, W: Write>(
    app: &App,
    console: &mut Console<R, W>,
    id: ProductId,
    update: ProductUpdate,
    message: &str,
) -> CliResult<()> {
    if console.settle(app.products.update_product(id, update))?.is_some() {
        console.success(message)?;
    }
    Ok(())
}

fn search<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> CliResult<()> {
    let raw = console.prompt("Enter the ID of the product to search: ")?;
    if let Some(product) = console.settle(app.products.find_product(&raw))? {
        console.success("Product found:")?;
        console.product_table(std::slice::from_ref(&product))?;
    }
    Ok(())
}

fn delete<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> CliResult<()> {
    let Some(products) = show_listing(app, console)? else {
        return Ok(());
    };
    let message =
        format!("Enter the ID of the product to delete (or '{CANCEL_SENTINEL}' to cancel): ");
    let target = console.prompt_until(&message, |raw| {
        app.products.parse_delete_target(raw, &products)
    })?;

    match target {
        DeleteTarget::Cancel => console.info("Operation cancelled."),
        DeleteTarget::Product(id) => {
            if console.settle(app.products.delete_product(id))?.is_some() {
                console.success("Product deleted.")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::tests::{run_script, temp_store};
    use stockroom_core::{ProductRepository, SqliteProductRepository};

    const ADD_HAMMER: &str = "1\n1\n1\nTools\nHammer\nClaw hammer\n0\n3\n-1\n12\n";

    #[test]
    fn add_with_inline_category_retries_each_field() {
        let (_dir, store) = temp_store();
        let script = format!("{ADD_HAMMER}6\n4\n");
        let (result, output) = run_script(&store, &script);
        assert!(result.is_ok());
        assert!(output.contains("Category 'Tools' created."));
        assert!(output.contains("The quantity must be greater than zero."));
        assert!(output.contains("The price cannot be negative."));
        assert!(output.contains("Product 'Hammer' added."));

        let products = SqliteProductRepository::new(store).list_products().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].quantity, 3);
        assert_eq!(products[0].price, 12);
        assert_eq!(products[0].category_name, "Tools");
    }

    #[test]
    fn out_of_range_category_choice_reprompts() {
        let (_dir, store) = temp_store();
        let script = "1\n1\n5\n1\nTools\nHammer\nClaw hammer\n3\n12\n6\n4\n";
        let (result, output) = run_script(&store, script);
        assert!(result.is_ok());
        assert!(output.contains("Option out of range. Choose a number from 1 to 1."));
        assert!(output.contains("Product 'Hammer' added."));
    }

    #[test]
    fn edit_loops_until_finish_and_allows_zero_stock() {
        let (_dir, store) = temp_store();
        let script = format!("{ADD_HAMMER}2\n1\n9\n3\n0\n1\nMallet\n6\n6\n4\n");
        let (result, output) = run_script(&store, &script);
        assert!(result.is_ok());
        assert!(output.contains("Invalid option."));
        assert!(output.contains("Quantity updated."));
        assert!(output.contains("Name updated."));
        assert!(output.contains("Edit finished."));

        let product = SqliteProductRepository::new(store)
            .get_product(1)
            .unwrap()
            .unwrap();
        assert_eq!(product.name, "Mallet");
        assert_eq!(product.quantity, 0);
    }

    #[test]
    fn edit_category_creates_inline_and_returns_to_field_menu() {
        let (_dir, store) = temp_store();
        let script = format!("{ADD_HAMMER}2\n1\n5\n2\nHardware\n6\n6\n4\n");
        let (result, output) = run_script(&store, &script);
        assert!(result.is_ok());
        assert!(output.contains("Category 'Hardware' created."));
        assert!(output.contains("Category updated."));
        assert_eq!(output.matches("EDIT PRODUCT").count(), 2);

        let product = SqliteProductRepository::new(store)
            .get_product(1)
            .unwrap()
            .unwrap();
        assert_eq!(product.category_name, "Hardware");
    }

    #[test]
    fn delete_accepts_cancel_sentinel() {
        let (_dir, store) = temp_store();
        let script = format!("{ADD_HAMMER}5\nQ\n6\n4\n");
        let (result, output) = run_script(&store, &script);
        assert!(result.is_ok());
        assert!(output.contains("Operation cancelled."));

        let products = SqliteProductRepository::new(store).list_products().unwrap();
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn delete_reprompts_on_unlisted_id() {
        let (_dir, store) = temp_store();
        let script = format!("{ADD_HAMMER}5\n42\n1\n6\n4\n");
        let (result, output) = run_script(&store, &script);
        assert!(result.is_ok());
        assert!(output.contains("Invalid ID. Please try again."));
        assert!(output.contains("Product deleted."));

        let products = SqliteProductRepository::new(store).list_products().unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn search_reports_missing_and_found_products() {
        let (_dir, store) = temp_store();
        let script = format!("{ADD_HAMMER}4\n7\n4\nabc\n4\n1\n6\n4\n");
        let (result, output) = run_script(&store, &script);
        assert!(result.is_ok());
        assert!(output.contains("No record found with ID 7."));
        assert!(output.contains("Please enter a whole number."));
        assert!(output.contains("Product found:"));
        assert!(output.contains("Claw hammer"));
    }
}

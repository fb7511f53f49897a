//! Terminal rendering and line input.
//!
//! All output goes through `Console` so menu flows can be driven by scripted
//! input in tests. Colors are applied only when stdout supports them.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use std::fmt::Display;
use std::io::{BufRead, Write};
use stockroom_core::{
    Category, CategoryChoices, LowStockReport, ProductRecord, ServiceError, ServiceResult,
    ValidationError,
};

use crate::error::{CliError, CliResult};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `message` and reads one trimmed line.
    ///
    /// Closed input yields `CliError::EndOfInput`.
    pub fn prompt(&mut self, message: &str) -> CliResult<String> {
        write!(
            self.output,
            "{}",
            message.if_supports_color(Stdout, |t| t.cyan())
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(CliError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Prompts until `parse` accepts the input.
    ///
    /// Recoverable errors are printed and the prompt repeats; fatal ones
    /// end the loop.
    pub fn prompt_until<T>(
        &mut self,
        message: &str,
        mut parse: impl FnMut(&str) -> ServiceResult<T>,
    ) -> CliResult<T> {
        loop {
            let raw = self.prompt(message)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_recoverable() => self.error(describe(&err))?,
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Reports a recoverable failure and yields `None`, or propagates a
    /// fatal one.
    pub fn settle<T>(&mut self, result: ServiceResult<T>) -> CliResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                self.error(describe(&err))?;
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn success(&mut self, message: impl Display) -> CliResult<()> {
        let text = format!("\u{2714} {message}");
        writeln!(
            self.output,
            "{}",
            text.if_supports_color(Stdout, |t| t.green())
        )?;
        Ok(())
    }

    pub fn error(&mut self, message: impl Display) -> CliResult<()> {
        let text = format!("\u{2718} {message}");
        writeln!(
            self.output,
            "{}",
            text.if_supports_color(Stdout, |t| t.red())
        )?;
        Ok(())
    }

    pub fn info(&mut self, message: impl Display) -> CliResult<()> {
        let text = message.to_string();
        writeln!(
            self.output,
            "{}",
            text.if_supports_color(Stdout, |t| t.blue())
        )?;
        Ok(())
    }

    pub fn line(&mut self, text: impl Display) -> CliResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints a titled, numbered menu.
    pub fn menu(&mut self, title: &str, options: &[&str]) -> CliResult<()> {
        let heading = format!("\n=== {title} ===");
        writeln!(
            self.output,
            "{}",
            heading.if_supports_color(Stdout, |t| t.bold())
        )?;
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {option}", index + 1)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    pub fn category_table(&mut self, categories: &[Category]) -> CliResult<()> {
        self.table_header(&format!("{:<5}{:<30}", "ID", "Name"))?;
        for category in categories {
            writeln!(self.output, "{:<5}{:<30}", category.id, category.name)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    pub fn product_table(&mut self, products: &[ProductRecord]) -> CliResult<()> {
        self.table_header(&format!(
            "{:<5}{:<25}{:<40}{:<10}{:<10}{:<20}",
            "ID", "Name", "Description", "Quantity", "Price", "Category"
        ))?;
        for product in products {
            writeln!(
                self.output,
                "{:<5}{:<25}{:<40}{:<10}${:<9}{:<20}",
                product.id,
                product.name,
                product.description,
                product.quantity,
                product.price,
                product.category_name
            )?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Prints the low-stock rows, or an informational line when empty.
    pub fn low_stock_table(&mut self, report: &LowStockReport) -> CliResult<()> {
        if report.rows.is_empty() {
            return self.info(format!(
                "No products with a quantity at or below {}.",
                report.limit
            ));
        }

        let title = format!("\n--- LOW STOCK (<= {}) ---", report.limit);
        writeln!(
            self.output,
            "{}",
            title.if_supports_color(Stdout, |t| t.red())
        )?;
        self.table_header(&format!(
            "{:<5}{:<25}{:<10}{:<20}",
            "ID", "Name", "Quantity", "Category"
        ))?;
        for product in report.rows.as_slice() {
            let quantity = format!("{:<10}", product.quantity);
            writeln!(
                self.output,
                "{:<5}{:<25}{}{:<20}",
                product.id,
                product.name,
                quantity.if_supports_color(Stdout, |t| t.bold()),
                product.category_name
            )?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Prints `choices` numbered from 1 followed by the "create new" entry.
    pub fn category_choices(&mut self, choices: &CategoryChoices) -> CliResult<()> {
        for (index, category) in choices.categories.iter().enumerate() {
            let number = format!("{}.", index + 1);
            writeln!(
                self.output,
                "{} {}",
                number.if_supports_color(Stdout, |t| t.yellow()),
                category.name
            )?;
        }
        let number = format!("{}.", choices.create_new_index());
        writeln!(
            self.output,
            "{} Create a new category",
            number.if_supports_color(Stdout, |t| t.yellow())
        )?;
        Ok(())
    }

    fn table_header(&mut self, header: &str) -> CliResult<()> {
        let rule = "-".repeat(header.chars().count());
        writeln!(
            self.output,
            "{}",
            header.if_supports_color(Stdout, |t| t.yellow())
        )?;
        writeln!(
            self.output,
            "{}",
            rule.if_supports_color(Stdout, |t| t.yellow())
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// User-facing wording for a recoverable service error.
pub fn describe(err: &ServiceError) -> String {
    match err {
        ServiceError::Validation(ValidationError::EmptyName) => {
            "The name cannot be empty.".to_string()
        }
        ServiceError::Validation(ValidationError::EmptyDescription) => {
            "The description cannot be empty.".to_string()
        }
        ServiceError::Validation(ValidationError::NotANumber(_)) => {
            "Please enter a whole number.".to_string()
        }
        ServiceError::Validation(ValidationError::NonPositiveQuantity(_)) => {
            "The quantity must be greater than zero.".to_string()
        }
        ServiceError::Validation(ValidationError::NegativeQuantity(_)) => {
            "The quantity cannot be negative.".to_string()
        }
        ServiceError::Validation(ValidationError::NegativePrice(_)) => {
            "The price cannot be negative.".to_string()
        }
        ServiceError::Validation(ValidationError::NegativeLimit(_)) => {
            "The limit cannot be negative.".to_string()
        }
        ServiceError::InvalidId(_) => "Invalid ID. Please try again.".to_string(),
        ServiceError::NotFound(id) => format!("No record found with ID {id}."),
        ServiceError::DuplicateName(name) => format!("The category '{name}' already exists."),
        ServiceError::HasDependents { .. } => {
            "Cannot delete: the category still has products.".to_string()
        }
        ServiceError::LimitExceeded { max } => {
            format!("You have reached the limit of {max} categories.")
        }
        ServiceError::OutOfRange { max, .. } => {
            format!("Option out of range. Choose a number from 1 to {max}.")
        }
        ServiceError::InvalidOption(_) => "Invalid option.".to_string(),
        ServiceError::InvalidField(_) | ServiceError::Repo(_) => err.to_string(),
    }
}

//! Low-stock report flow.

use std::io::{BufRead, Write};

use super::App;
use crate::error::CliResult;
use crate::ui::Console;

pub(super) fn low_stock<R: BufRead, W: Write>(
    app: &App,
    console: &mut Console<R, W>,
) -> CliResult<()> {
    let limit = console.prompt_until("Show products with stock at or below: ", |raw| {
        app.reports.parse_threshold(raw)
    })?;
    if let Some(report) = console.settle(app.reports.low_stock(limit))? {
        console.low_stock_table(&report)?;
    }
    Ok(())
}

use crate::core::category::Category;
use crate::core::format::{Formatter, Locale};
use crate::core::transaction::{Kind, Transaction};
use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::{Term, style};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Parses a `#rrggbb` colour into a table colour.
fn hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Icon and localized label, tinted with the category colour.
pub fn category_cell(category: &Category, locale: Locale) -> Cell {
    let text = format!("{} {}", category.icon(), category.label(locale));
    match hex_color(category.color()) {
        Some(color) => Cell::new(text).fg(color),
        None => Cell::new(text),
    }
}

/// Right-aligned amount; income is shown in green.
pub fn amount_cell(transaction: &Transaction, formatter: &Formatter) -> Cell {
    let cell = Cell::new(formatter.format_currency(transaction.amount))
        .set_alignment(CellAlignment::Right);
    match transaction.kind {
        Kind::Income => cell.fg(Color::Green),
        Kind::Expense => cell,
    }
}

/// Creates a dimmed cell, e.g. for ids.
pub fn subtle_cell(text: &str) -> Cell {
    Cell::new(text).fg(Color::DarkGrey)
}

/// Renders a fixed-width bar for a 0-100 percentage.
pub fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!(
        "{}{}",
        style("█".repeat(filled)).cyan(),
        style("░".repeat(width - filled)).dim()
    )
}

/// Asks a yes/no question on the terminal. Anything but y/yes is a no.
pub fn confirm(prompt: &str) -> Result<bool> {
    let term = Term::stderr();
    term.write_str(&format!("{prompt} [y/N] "))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

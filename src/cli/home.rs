use super::ui;
use crate::core::analytics::{self, MonthSummary};
use crate::core::format::Formatter;
use crate::core::transaction::Transaction;
use chrono::NaiveDate;
use comfy_table::{Cell, CellAlignment};

const PROGRESS_WIDTH: usize = 30;

pub fn render(summary: &MonthSummary, today: NaiveDate, formatter: &Formatter) -> String {
    let locale = formatter.locale();
    let month_short = formatter.format_month_short(today);

    let mut output = format!(
        "{}\n{}\n\n",
        ui::style_text("Home", ui::StyleType::Title),
        ui::style_text(&formatter.format_long_date(today), ui::StyleType::Subtle)
    );

    // Month progress
    output.push_str(&format!(
        "Month progress {}%\n{}\n{}\n\n",
        summary.progress,
        ui::progress_bar(summary.progress, PROGRESS_WIDTH),
        ui::style_text(
            &format!(
                "1 {month_short}{:>width$}",
                format!("{} {month_short}", summary.days_in_month),
                width = PROGRESS_WIDTH - 2 - month_short.chars().count()
            ),
            ui::StyleType::Subtle
        )
    ));

    // Month totals
    output.push_str(&format!(
        "{} {}\n",
        ui::style_text("Spent this month:", ui::StyleType::TotalLabel),
        ui::style_text(
            &formatter.format_currency(summary.total),
            ui::StyleType::TotalValue
        )
    ));
    output.push_str(&format!(
        "Daily average: {}\n",
        formatter.format_currency(summary.average_per_day)
    ));
    if summary.kinds.income != 0.0 {
        output.push_str(&format!(
            "Income: {}  Expenses: {}  Net: {}\n",
            formatter.format_currency(summary.kinds.income),
            formatter.format_currency(summary.kinds.expense),
            formatter.format_currency(summary.kinds.net())
        ));
    }

    // Top categories
    output.push_str(&format!(
        "\n{}\n",
        ui::style_text("Top categories (this month)", ui::StyleType::TotalLabel)
    ));
    if summary.top_categories.is_empty() {
        output.push_str(&ui::style_text(
            "No spending this month yet.",
            ui::StyleType::Subtle,
        ));
        output.push('\n');
    } else {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Category"),
            ui::header_cell("Amount"),
            ui::header_cell("Share"),
            ui::header_cell(""),
        ]);
        for ranked in &summary.top_categories {
            table.add_row(vec![
                ui::category_cell(&ranked.category, locale),
                Cell::new(formatter.format_currency(ranked.total))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format!("{}%", ranked.percent)).set_alignment(CellAlignment::Right),
                Cell::new(ui::progress_bar(ranked.percent, 20)),
            ]);
        }
        output.push_str(&table.to_string());
        output.push('\n');
    }

    // Recent activity
    output.push_str(&format!(
        "\n{}\n",
        ui::style_text("Latest transactions", ui::StyleType::TotalLabel)
    ));
    if summary.recent.is_empty() {
        output.push_str(&ui::style_text(
            "No transactions yet.",
            ui::StyleType::Subtle,
        ));
    } else {
        output.push_str(&recent_table(&summary.recent, formatter).to_string());
    }

    output
}

fn recent_table(recent: &[&Transaction], formatter: &Formatter) -> comfy_table::Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Description"),
        ui::header_cell("Date"),
        ui::header_cell("Amount"),
    ]);
    for tx in recent {
        table.add_row(vec![
            ui::category_cell(&tx.category, formatter.locale()),
            Cell::new(&tx.description),
            Cell::new(formatter.format_date(&tx.date)),
            ui::amount_cell(tx, formatter),
        ]);
    }
    table
}

pub fn run(
    transactions: &[Transaction],
    today: NaiveDate,
    top_categories: usize,
    recent_count: usize,
    formatter: &Formatter,
) {
    let summary = analytics::summarize_month(transactions, today, top_categories, recent_count);
    println!("{}", render(&summary, today, formatter));
}

use super::ui;
use crate::core::format::Formatter;
use crate::core::transaction::Transaction;
use crate::core::view::{NO_DATE_KEY, View, ViewFilter, apply_view, group_by_month};
use comfy_table::{Cell, Table};

fn count_label(count: usize) -> String {
    if count == 1 {
        "1 transaction".to_string()
    } else {
        format!("{count} transactions")
    }
}

fn transactions_table(items: &[&Transaction], formatter: &Formatter) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Description"),
        ui::header_cell("Date"),
        ui::header_cell("Amount"),
        ui::header_cell("Id"),
    ]);
    for tx in items {
        table.add_row(vec![
            ui::category_cell(&tx.category, formatter.locale()),
            Cell::new(&tx.description),
            Cell::new(formatter.format_date(&tx.date)),
            ui::amount_cell(tx, formatter),
            ui::subtle_cell(tx.id.as_str()),
        ]);
    }
    table
}

/// Renders the filtered view, optionally split into one table per month.
pub fn render(view: &View, formatter: &Formatter, grouped: bool) -> String {
    let mut output = format!(
        "{}\n{}  {} {}\n",
        ui::style_text("Transactions", ui::StyleType::Title),
        ui::style_text(&count_label(view.items.len()), ui::StyleType::Subtle),
        ui::style_text("Total:", ui::StyleType::TotalLabel),
        ui::style_text(
            &formatter.format_currency(view.total),
            ui::StyleType::TotalValue
        )
    );

    if view.items.is_empty() {
        output.push_str(&ui::style_text(
            "\nNo transactions yet. Use `spendbook add` to record your first expense.",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    if !grouped {
        output.push('\n');
        output.push_str(&transactions_table(&view.items, formatter).to_string());
        return output;
    }

    for group in group_by_month(&view.items) {
        let title = if group.key == NO_DATE_KEY {
            "No date".to_string()
        } else {
            formatter.format_year_month(&group.key)
        };
        output.push_str(&format!(
            "\n{}  {}\n",
            ui::style_text(&title, ui::StyleType::TotalLabel),
            ui::style_text(
                &formatter.format_currency(group.total()),
                ui::StyleType::Subtle
            )
        ));
        output.push_str(&transactions_table(&group.items, formatter).to_string());
        output.push('\n');
    }
    output
}

pub fn run(
    transactions: &[Transaction],
    filter: &ViewFilter,
    formatter: &Formatter,
    grouped: bool,
) {
    let view = apply_view(transactions, filter);
    println!("{}", render(&view, formatter, grouped));
}

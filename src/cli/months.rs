use super::ui;
use crate::core::analytics;
use crate::core::format::Formatter;
use crate::core::transaction::Transaction;
use comfy_table::{Cell, CellAlignment};

pub fn render(transactions: &[Transaction], formatter: &Formatter) -> String {
    let totals = analytics::monthly_totals(transactions);
    if totals.is_empty() {
        return ui::style_text("No dated transactions yet.", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Transactions"),
        ui::header_cell("Total"),
    ]);
    for month in &totals {
        table.add_row(vec![
            Cell::new(formatter.format_year_month(&month.year_month)),
            Cell::new(month.count).set_alignment(CellAlignment::Right),
            Cell::new(formatter.format_currency(month.total)).set_alignment(CellAlignment::Right),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Monthly totals", ui::StyleType::Title),
        table
    )
}

pub fn run(transactions: &[Transaction], formatter: &Formatter) {
    println!("{}", render(transactions, formatter));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::Category;
    use crate::core::format::Locale;

    #[test]
    fn test_render_months() {
        console::set_colors_enabled(false);
        let txs = vec![
            Transaction::new("1", "a", 1200.0, Category::Food, "2025-09-20"),
            Transaction::new("2", "b", 300.0, Category::Food, "2025-09-01"),
            Transaction::new("3", "c", 5.0, Category::Food, "2025-07-01"),
        ];
        let formatter = Formatter::new(Locale::EnUs, "USD");
        let output = render(&txs, &formatter);
        assert!(output.contains("September 2025"));
        assert!(output.contains("$1,500"));
        assert!(output.find("September 2025").unwrap() < output.find("July 2025").unwrap());
    }
}

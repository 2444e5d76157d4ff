use super::ui;
use crate::core::format::Formatter;
use crate::core::store::TransactionStore;
use crate::core::transaction::{Transaction, TransactionDraft};
use anyhow::{Context, Result};

/// One-line description of a record, used after mutations.
pub fn describe(transaction: &Transaction, formatter: &Formatter) -> String {
    format!(
        "{} {} · {} · {} · {}",
        transaction.category.icon(),
        transaction.category.label(formatter.locale()),
        transaction.description,
        formatter.format_date(&transaction.date),
        formatter.format_currency(transaction.amount)
    )
}

pub fn run(
    store: &mut TransactionStore,
    draft: TransactionDraft,
    formatter: &Formatter,
) -> Result<()> {
    let added = store.add(draft).context("Failed to add transaction")?;
    println!(
        "{} {}\n{}",
        ui::style_text("Added", ui::StyleType::TotalValue),
        describe(&added, formatter),
        ui::style_text(&format!("id: {}", added.id), ui::StyleType::Subtle)
    );
    Ok(())
}

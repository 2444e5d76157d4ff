use super::{add::describe, ui};
use crate::core::format::Formatter;
use crate::core::store::{StoreError, TransactionStore};
use crate::core::transaction::TransactionId;
use anyhow::{Context, Result};

pub fn run(
    store: &mut TransactionStore,
    id: &TransactionId,
    assume_yes: bool,
    formatter: &Formatter,
) -> Result<()> {
    let Some(existing) = store.get(id) else {
        return Err(StoreError::NotFound(id.clone()))
            .with_context(|| format!("Failed to remove transaction {id}"));
    };

    if !assume_yes {
        let prompt = format!("Delete {}?", describe(existing, formatter));
        if !ui::confirm(&prompt)? {
            println!("{}", ui::style_text("Cancelled", ui::StyleType::Subtle));
            return Ok(());
        }
    }

    let removed = store
        .remove(id)
        .with_context(|| format!("Failed to remove transaction {id}"))?;
    println!(
        "{} {}",
        ui::style_text("Removed", ui::StyleType::Error),
        describe(&removed, formatter)
    );
    Ok(())
}

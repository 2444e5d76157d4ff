use super::{add::describe, ui};
use crate::core::format::Formatter;
use crate::core::store::TransactionStore;
use crate::core::transaction::TransactionPatch;
use anyhow::{Context, Result, bail};

pub fn run(
    store: &mut TransactionStore,
    patch: TransactionPatch,
    formatter: &Formatter,
) -> Result<()> {
    if patch.is_empty() {
        bail!("Nothing to update for {}: pass at least one field", patch.id);
    }

    let id = patch.id.clone();
    let updated = store
        .update(patch)
        .with_context(|| format!("Failed to update transaction {id}"))?;
    println!(
        "{} {}",
        ui::style_text("Updated", ui::StyleType::TotalValue),
        describe(&updated, formatter)
    );
    Ok(())
}

use anyhow::{Context, Result, anyhow};
use core_types::{LedgerBackup, Operation};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads and validates a JSON ledger backup.
pub fn load_backup(path: &Path) -> Result<LedgerBackup> {
    let file = File::open(path).with_context(|| format!("Cannot open ledger {}", path.display()))?;
    let backup: LedgerBackup = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Cannot parse ledger {}", path.display()))?;
    backup
        .validate()
        .with_context(|| format!("Ledger {} failed validation", path.display()))?;

    tracing::info!(
        path = %path.display(),
        version = backup.version,
        operations = backup.operations.len(),
        "Ledger loaded."
    );
    Ok(backup)
}

/// Looks up an operation by id or name.
pub fn find_operation<'a>(backup: &'a LedgerBackup, key: &str) -> Result<&'a Operation> {
    backup.operation(key).ok_or_else(|| {
        let known: Vec<&str> = backup.operations.iter().map(|op| op.name.as_str()).collect();
        anyhow!("Operation '{key}' not found (known: {})", known.join(", "))
    })
}

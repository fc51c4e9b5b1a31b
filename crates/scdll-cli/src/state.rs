//! JSON-persisted storage between CLI invocations

use std::path::Path;

use anyhow::{Context, Result};
use scdll_core::MemoryStorage;

/// Load the state file, starting empty if it does not exist yet
pub fn load(path: &Path) -> Result<MemoryStorage> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no state file, starting empty");
        return Ok(MemoryStorage::new());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    let storage: MemoryStorage = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse state file {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        cells = storage.cell_count(),
        "loaded state"
    );
    Ok(storage)
}

/// Write the state file, replacing the previous contents
pub fn save(path: &Path, storage: &MemoryStorage) -> Result<()> {
    let contents = serde_json::to_string_pretty(storage)?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write state file {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        cells = storage.cell_count(),
        "saved state"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use scdll_core::StorageBackend;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = load(&dir.path().join("state.json")).unwrap();
        assert_eq!(storage.cell_count(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut storage = MemoryStorage::new();
        storage.store(&Address::repeat_byte(3), U256::from(1), U256::from(42));
        save(&path, &storage).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, storage);
        assert_eq!(loaded.load(&Address::repeat_byte(3), U256::from(1)), U256::from(42));
    }

    #[test]
    fn test_garbage_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse state file"));
    }
}

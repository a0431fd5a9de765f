pub mod check;
pub mod fix;

use anyhow::Context;
use flowfix_core::paths::default_db_path;
use flowfix_core::store::WorkflowStore;
use std::path::{Path, PathBuf};

/// Resolve the store path (`--db` / `FLOWFIX_DB` over the default) and open it.
pub fn open_store(db: Option<&Path>) -> anyhow::Result<(PathBuf, WorkflowStore)> {
    let path = match db {
        Some(p) => p.to_path_buf(),
        None => default_db_path()?,
    };
    let store = WorkflowStore::open(&path)
        .with_context(|| format!("cannot open n8n store at {}", path.display()))?;
    Ok((path, store))
}

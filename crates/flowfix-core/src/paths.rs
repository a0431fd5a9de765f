use crate::error::{FlowfixError, Result};
use std::path::PathBuf;

pub const N8N_DIR: &str = ".n8n";
pub const DB_FILE: &str = "database.sqlite";

/// Default location of the n8n store: `~/.n8n/database.sqlite`.
pub fn default_db_path() -> Result<PathBuf> {
    let home = home::home_dir().ok_or(FlowfixError::HomeNotFound)?;
    Ok(home.join(N8N_DIR).join(DB_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_with_n8n_database() {
        let path = default_db_path().unwrap();
        assert!(path.ends_with(".n8n/database.sqlite"), "got {path:?}");
    }
}

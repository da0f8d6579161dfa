//! Markdown artifact export

use std::fs;
use std::path::Path;

use eyre::{Context, Result};

/// Write a rendered document, creating parent directories as needed
pub fn write_markdown(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .wrap_err_with(|| format!("Failed to write artifact: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plans").join("2026-09-01_lisbon.md");
        write_markdown(&path, "# Itinerary\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Itinerary\n");
    }
}

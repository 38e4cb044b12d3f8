//! Debug dump writer for raw starred items.
//!
//! Writes one fenced, index-labeled structural dump per item to a Markdown
//! file, in processing order. The file is created before processing starts
//! and finalized only after the export completes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{AppError, Result, StarredItem};

/// Writer for the item dump file.
#[derive(Debug)]
pub struct DumpWriter {
    out: BufWriter<File>,
}

impl DumpWriter {
    /// Create the dump file at `path`, truncating any existing one.
    ///
    /// # Errors
    /// Returns error if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .map_err(|e| AppError::io(format!("Failed to create dump file {}", path.display()), e))?;

        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    /// Append one item as a fenced block labeled with its zero-padded
    /// original index.
    ///
    /// # Errors
    /// Returns error if the write fails.
    pub fn write_item(&mut self, index: usize, item: &StarredItem) -> Result<()> {
        writeln!(self.out, "{index:03}\n```\n{item:#?}\n```")
            .map_err(|e| AppError::io("Failed to write dump entry", e))
    }

    /// Flush and close the dump file.
    ///
    /// # Errors
    /// Returns error if the flush fails.
    pub fn finish(mut self) -> Result<()> {
        self.out
            .flush()
            .map_err(|e| AppError::io("Failed to flush dump file", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemKind;
    use tempfile::tempdir;

    fn channel_item(id: &str) -> StarredItem {
        StarredItem {
            kind: ItemKind::Channel,
            channel: Some(id.to_string()),
            message: None,
            file: None,
            comment: None,
        }
    }

    #[test]
    fn test_write_item_fenced_block() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("item-dump.md");

        let mut writer = DumpWriter::create(&path).unwrap();
        writer.write_item(7, &channel_item("C025GUBAX")).unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("007\n```\n"));
        assert!(content.contains("C025GUBAX"));
        assert!(content.ends_with("```\n"));
    }

    #[test]
    fn test_entries_keep_processing_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("item-dump.md");

        let mut writer = DumpWriter::create(&path).unwrap();
        writer.write_item(2, &channel_item("C_OLDEST")).unwrap();
        writer.write_item(1, &channel_item("C_MIDDLE")).unwrap();
        writer.write_item(0, &channel_item("C_NEWEST")).unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let oldest = content.find("C_OLDEST").unwrap();
        let middle = content.find("C_MIDDLE").unwrap();
        let newest = content.find("C_NEWEST").unwrap();
        assert!(oldest < middle && middle < newest);
    }

    #[test]
    fn test_create_fails_in_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("item-dump.md");

        assert!(matches!(DumpWriter::create(&path), Err(AppError::Io { .. })));
    }
}

// src/export/writer.rs
// =============================================================================
// Writes report output to disk.
//
// Each run gets its own directory named after the time it started, e.g.
//   data/2026-10-17_14-03-59/
// and every file of the run lands there. Files are written once; a run never
// appends to or rewrites an earlier export.
// =============================================================================

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::record::Table;
use crate::graph::{gexf, Network};

/// Format of the per-run directory name.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    // Creates <root>/<timestamp>/ and everything above it.
    // Fails if the run directory already exists.
    pub fn create(root: &Path) -> Result<Self> {
        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::create_run(root, &stamp)
    }

    fn create_run(root: &Path, stamp: &str) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create output directory {}", root.display()))?;

        let path = root.join(stamp);
        fs::create_dir(&path)
            .with_context(|| format!("Failed to create run directory {}", path.display()))?;
        Ok(Self { path })
    }

    // Uses an exact directory instead of a timestamped one
    pub fn create_at(path: PathBuf) -> Result<Self> {
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create output directory {}", path.display()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes a CSV with a header row followed by one row per record.
    pub fn write_table(&self, table: &Table) -> Result<PathBuf> {
        let path = self.path.join(table.file_name);
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        writer.write_record(table.columns)?;
        for row in table.rows() {
            writer.write_record(&row)?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }

    /// Writes a GEXF graph file.
    pub fn write_graph(&self, file_name: &str, network: &Network) -> Result<PathBuf> {
        let path = self.path.join(file_name);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        write_gexf(network, file).with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }
}

// The explicit flush surfaces errors that dropping the BufWriter would swallow
fn write_gexf<W: Write>(network: &Network, inner: W) -> io::Result<()> {
    let mut out = BufWriter::new(inner);
    gexf::write(network, &mut out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Record;
    use serde_json::json;

    #[test]
    fn test_creates_timestamped_directory() {
        let root = tempfile::tempdir().unwrap();
        let output = OutputDir::create(root.path()).unwrap();

        assert!(output.path().is_dir());
        assert_eq!(output.path().parent().unwrap(), root.path());
        let name = output.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(chrono::NaiveDateTime::parse_from_str(&name, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_run_directory_is_never_reused() {
        let root = tempfile::tempdir().unwrap();
        let first = OutputDir::create_run(&root.path().join("data"), "2026-10-17_14-03-59").unwrap();
        fs::write(first.path().join("org_repositories.csv"), "organization\nacme\n").unwrap();

        let second = OutputDir::create_run(&root.path().join("data"), "2026-10-17_14-03-59");

        assert!(second.is_err());
        assert_eq!(
            fs::read_to_string(first.path().join("org_repositories.csv")).unwrap(),
            "organization\nacme\n"
        );
    }

    #[test]
    fn test_write_table() {
        let root = tempfile::tempdir().unwrap();
        let output = OutputDir::create_at(root.path().join("run")).unwrap();

        const COLUMNS: &[&str] = &["organization", "full_name", "description"];
        let table = Table::new(
            "org_repositories.csv",
            COLUMNS,
            vec![Record::new(json!({
                "full_name": "acme/rocket",
                "description": "Goes up, comes down",
                "private": false
            }))
            .with("organization", "acme")],
        );

        let path = output.write_table(&table).unwrap();
        let content = fs::read_to_string(path).unwrap();

        assert_eq!(
            content,
            "organization,full_name,description\nacme,acme/rocket,\"Goes up, comes down\"\n"
        );
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let root = tempfile::tempdir().unwrap();
        let output = OutputDir::create_at(root.path().to_path_buf()).unwrap();

        const COLUMNS: &[&str] = &["organization", "login"];
        let path = output
            .write_table(&Table::new("members_info.csv", COLUMNS, Vec::new()))
            .unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "organization,login\n");
    }

    #[test]
    fn test_write_graph() {
        let root = tempfile::tempdir().unwrap();
        let output = OutputDir::create_at(root.path().to_path_buf()).unwrap();

        let mut network = Network::new();
        network.add_edge("alice", "acme", &[("node_type", "organization")]);

        let path = output.write_graph("membership_network.gexf", &network).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains(r#"source="alice" target="acme""#));
    }

    // Accepts nothing: every write fails like a full disk would
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_graph_write_error_is_reported() {
        let mut network = Network::new();
        network.add_edge("alice", "acme", &[("node_type", "organization")]);

        // Small enough to sit in the buffer until the final flush
        let err = write_gexf(&network, FullDisk).unwrap_err();
        assert_eq!(err.to_string(), "no space left on device");
    }
}

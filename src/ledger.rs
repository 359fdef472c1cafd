// src/ledger.rs
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Durable record of headlines already posted. Owns both the in-memory set
/// and the backing file behind one interface, so the invariant "in-memory ⊇
/// durable, durable never rewritten" holds in one place.
///
/// The file is plain UTF-8, one title per line, append-only. Entries are
/// never removed; the ledger grows for the life of the deployment.
#[derive(Debug)]
pub struct TitleLedger {
    path: PathBuf,
    seen: HashSet<String>,
}

impl TitleLedger {
    /// Load the ledger from `path`. An absent file is the normal empty
    /// state, not an error; any other I/O problem is.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut seen = HashSet::new();
        match File::open(&path) {
            Ok(f) => {
                for line in BufReader::new(f).lines() {
                    let line =
                        line.with_context(|| format!("reading ledger {}", path.display()))?;
                    let title = line.trim();
                    if !title.is_empty() {
                        seen.insert(title.to_string());
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("opening ledger {}", path.display()));
            }
        }
        Ok(Self { path, seen })
    }

    /// Byte-for-byte, case-sensitive membership check.
    pub fn contains(&self, title: &str) -> bool {
        self.seen.contains(title)
    }

    /// Append `title` durably, then mirror it into the in-memory set. The
    /// write is synced before control returns, so a crash right after a
    /// successful post cannot lose the dedup record. On failure the
    /// in-memory set is left untouched and the error escalates to the
    /// caller (risk of a duplicate repost otherwise).
    pub fn record(&mut self, title: &str) -> Result<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening ledger {} for append", self.path.display()))?;
        f.write_all(title.as_bytes())
            .and_then(|_| f.write_all(b"\n"))
            .and_then(|_| f.sync_all())
            .with_context(|| format!("appending to ledger {}", self.path.display()))?;
        self.seen.insert(title.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_is_empty_state() {
        let tmp = tempfile::tempdir().unwrap();
        let ledger = TitleLedger::load(tmp.path().join("missing.txt")).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn record_then_fresh_load_contains_title() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("posted.txt");

        let mut ledger = TitleLedger::load(&path).unwrap();
        ledger.record("Headline A").unwrap();
        assert!(ledger.contains("Headline A"));

        // Simulated restart.
        let reloaded = TitleLedger::load(&path).unwrap();
        assert!(reloaded.contains("Headline A"));
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn load_strips_whitespace_and_skips_blank_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("posted.txt");
        std::fs::write(&path, "  Headline A  \n\n\nHeadline B\n").unwrap();

        let ledger = TitleLedger::load(&path).unwrap();
        assert_eq!(ledger.len(), 2);
        assert!(ledger.contains("Headline A"));
        assert!(ledger.contains("Headline B"));
    }

    #[test]
    fn matching_is_case_sensitive_and_exact() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("posted.txt");
        let mut ledger = TitleLedger::load(&path).unwrap();
        ledger.record("Headline A").unwrap();

        assert!(!ledger.contains("headline a"));
        assert!(!ledger.contains("Headline A "));
    }

    #[test]
    fn record_appends_one_line_per_title() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("posted.txt");
        let mut ledger = TitleLedger::load(&path).unwrap();
        ledger.record("Headline A").unwrap();
        ledger.record("Headline B").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "Headline A\nHeadline B\n");
    }

    #[test]
    fn record_fails_when_file_cannot_be_opened() {
        let tmp = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so the append open fails.
        let path = tmp.path().join("missing-dir").join("posted.txt");
        let mut ledger = TitleLedger::load(&path).unwrap();

        let err = ledger.record("Headline A").unwrap_err();
        assert!(err.to_string().contains("opening ledger"));
        // In-memory set stays consistent with the durable file.
        assert!(!ledger.contains("Headline A"));
    }
}

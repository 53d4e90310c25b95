//! Template reading and output file writing.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::assembler::{draft_file_name, enhanced_file_name};
use crate::error::{Error, Result};

/// Read the base template. Any failure is fatal for the run.
pub fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::Template {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Writes drafts and their enhanced siblings under one target directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    target_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Write `<target>/<sanitized-name>-<timestamp>.md`, creating the target
    /// directory if needed. Returns the written path.
    pub fn write_draft(&self, project_name: &str, text: &str, now: DateTime<Utc>) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.target_dir)?;

        let path = self.target_dir.join(draft_file_name(project_name, now));
        std::fs::write(&path, text.trim())?;
        debug!(path = %path.display(), bytes = text.len(), "Wrote draft");
        Ok(path)
    }

    /// Write the enhanced text next to `draft_path` as `<stem>-enhanced.md`.
    pub fn write_enhanced(&self, draft_path: &Path, text: &str) -> Result<PathBuf> {
        let draft_name = draft_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::Internal(format!("Draft path has no file name: {}", draft_path.display()))
            })?;
        let path = draft_path.with_file_name(enhanced_file_name(draft_name));

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, text.trim())?;
        debug!(path = %path.display(), bytes = text.len(), "Wrote enhanced prompt");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn write_draft_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("nested").join("prompts");
        let writer = OutputWriter::new(&target);
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

        let path = writer.write_draft("My App", "\n  draft body \n", now).unwrap();

        assert_eq!(path, target.join("my-app-2026-01-02T03-04-05.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "draft body");
    }

    #[test]
    fn enhanced_file_sits_next_to_draft() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(tmp.path());
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

        let draft = writer.write_draft("Acme", "draft", now).unwrap();
        let enhanced = writer.write_enhanced(&draft, "better\n").unwrap();

        assert_eq!(enhanced, tmp.path().join("acme-2026-01-02T03-04-05-enhanced.md"));
        assert_eq!(std::fs::read_to_string(&enhanced).unwrap(), "better");
        assert_eq!(std::fs::read_to_string(&draft).unwrap(), "draft");
    }

    #[test]
    fn missing_template_is_a_template_error() {
        let err = read_template(Path::new("/nonexistent/NextJs.startup.md")).unwrap_err();
        match err {
            Error::Template { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/NextJs.startup.md"))
            }
            other => panic!("Expected Template error, got: {other:?}"),
        }
    }

    #[test]
    fn read_template_returns_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("base.md");
        std::fs::write(&path, "# Base").unwrap();
        assert_eq!(read_template(&path).unwrap(), "# Base");
    }
}

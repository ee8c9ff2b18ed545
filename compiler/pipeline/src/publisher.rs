//! Publishes generated output to disk.
//!
//! Files whose on-disk content already matches the generated content
//! are left untouched, so repeated runs against an unchanged protocol
//! do not disturb file timestamps or downstream build caches.

use std::fs;
use std::io;
use std::path::Path;

use codegen::generator::OutputMapping;
use sha2::{Digest, Sha256};

/// Summary of a publish pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Files created or rewritten because their content changed.
    pub written: usize,
    /// Files left untouched because their content already matched.
    pub skipped: usize,
}

/// Write `outputs` under `output_root`, creating parent directories as
/// needed.
///
/// Each entry's relative path is joined to `output_root`. An existing
/// file is rewritten only when its content digest differs from the
/// generated content; the first I/O failure aborts the pass.
pub fn publish(output_root: &Path, outputs: &OutputMapping) -> io::Result<PublishReport> {
    let mut report = PublishReport::default();

    for (relative, content) in outputs {
        let target = output_root.join(relative);

        if target.is_file() {
            let existing = fs::read(&target)?;
            if Sha256::digest(&existing) == Sha256::digest(content.as_bytes()) {
                report.skipped += 1;
                continue;
            }
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)?;
        report.written += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_creates_nested_directories() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let mut outputs = OutputMapping::new();
        outputs.insert("Page/types/FrameId.rs".to_string(), "pub struct PageFrameId;\n".to_string());

        let report = publish(dir.path(), &outputs).expect("Failed to publish");
        assert_eq!(report, PublishReport { written: 1, skipped: 0 });
        let written = std::fs::read_to_string(dir.path().join("Page/types/FrameId.rs"))
            .expect("Failed to read published file");
        assert_eq!(written, "pub struct PageFrameId;\n");
    }
}

use crate::CoreError;
use crate::file_finder::SourceFile;
use crate::stripper::{self, StripOptions};
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct ProcessedFileResult {
    pub path: PathBuf,
    pub relative: String,
    pub changed: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub processed: usize,
    pub changed: usize,
    pub failed: usize,
}

impl ProcessSummary {
    pub fn from_results(results: &[ProcessedFileResult]) -> Self {
        let mut s = ProcessSummary::default();
        for r in results {
            s.processed += 1;
            if r.error.is_some() {
                s.failed += 1;
            } else if r.changed {
                s.changed += 1;
            }
        }
        s
    }
}

fn processing_error(path: &Path, context: &str) -> impl Fn(std::io::Error) -> CoreError {
    let path = path.display().to_string();
    let context = context.to_string();
    move |e| CoreError::Processing {
        path: path.clone(),
        message: format!("{}: {}", context, e),
    }
}

// Written next to the target so the final rename stays on one filesystem.
fn write_atomically(path: &Path, content: &str) -> Result<(), CoreError> {
    let parent_dir = path.parent().ok_or_else(|| CoreError::Processing {
        path: path.display().to_string(),
        message: "no parent directory".to_string(),
    })?;
    let mut temp_file = tempfile::Builder::new()
        .prefix(".decomment_")
        .tempfile_in(parent_dir)
        .map_err(processing_error(path, "Create temp file"))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(processing_error(path, "Write temp file"))?;
    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(temp_file.path(), meta.permissions())
            .map_err(processing_error(path, "Copy permissions"))?;
    }
    temp_file
        .persist(path)
        .map_err(|e| processing_error(path, "Replace file")(e.error))?;
    Ok(())
}

/// Strips one file; returns whether its content would change.
pub fn process_single_file(
    file: &SourceFile,
    options: &StripOptions,
    apply: bool,
) -> Result<bool, CoreError> {
    let original = fs::read_to_string(&file.path).map_err(processing_error(&file.path, "Read"))?;
    let updated =
        stripper::strip_document(&original, file.dialect, file.preserve_header, options);
    if updated == original {
        return Ok(false);
    }
    debug!(
        path = %file.relative,
        dialect = ?file.dialect,
        before = original.len(),
        after = updated.len(),
        "content changed"
    );
    if apply {
        write_atomically(&file.path, &updated)?;
    }
    Ok(true)
}

pub fn process_files(
    files: &[SourceFile],
    options: &StripOptions,
    apply: bool,
) -> Vec<ProcessedFileResult> {
    files
        .par_iter()
        .map(|f| {
            let outcome = process_single_file(f, options, apply);
            ProcessedFileResult {
                path: f.path.clone(),
                relative: f.relative.clone(),
                changed: matches!(outcome, Ok(true)),
                error: outcome.err().map(|e| e.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(changed: bool, error: Option<&str>) -> ProcessedFileResult {
        ProcessedFileResult {
            path: PathBuf::from("x"),
            relative: "x".to_string(),
            changed,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn summary_counts_changes_and_failures() {
        let results = [
            result(true, None),
            result(false, None),
            result(false, Some("boom")),
            result(true, None),
        ];
        assert_eq!(
            ProcessSummary::from_results(&results),
            ProcessSummary {
                processed: 4,
                changed: 2,
                failed: 1
            }
        );
    }
}

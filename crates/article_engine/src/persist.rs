use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine_logging::engine_warn;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::config::CollisionPolicy;
use crate::filename::{output_filename, OUTPUT_EXTENSION};
use crate::frontmatter::build_mdx_document;
use crate::ArticleRecord;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(format!("{}: {e}", dir.display())))
}

/// Writes `content` to `{dir}/{filename}` through a temp file in the same
/// directory, so a crash never leaves a half-written document behind.
pub fn write_atomically(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
    ensure_output_dir(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
    Ok(target)
}

/// Persists article records as `<slug>.mdx` documents in one directory.
pub struct ArticleWriter {
    dir: PathBuf,
    policy: CollisionPolicy,
    written: HashSet<String>,
}

impl ArticleWriter {
    pub fn new(dir: PathBuf, policy: CollisionPolicy) -> Self {
        Self {
            dir,
            policy,
            written: HashSet::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&mut self, record: &ArticleRecord) -> Result<PathBuf, PersistError> {
        let filename = self.claim_filename(&record.title);
        write_atomically(&self.dir, &filename, &build_mdx_document(record))
    }

    fn claim_filename(&mut self, title: &str) -> String {
        let base = output_filename(title);
        if !self.written.contains(&base) {
            self.written.insert(base.clone());
            return base;
        }

        match self.policy {
            CollisionPolicy::Overwrite => {
                engine_warn!("{} was already written in this run, overwriting", base);
                base
            }
            CollisionPolicy::Suffix => {
                let stem = base
                    .strip_suffix(&format!(".{OUTPUT_EXTENSION}"))
                    .unwrap_or(&base)
                    .to_string();
                let mut n = 2;
                loop {
                    let candidate = format!("{stem}-{n}.{OUTPUT_EXTENSION}");
                    if self.written.insert(candidate.clone()) {
                        return candidate;
                    }
                    n += 1;
                }
            }
        }
    }
}

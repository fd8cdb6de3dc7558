//! Source file scanner for discovering Swift files.
//!
//! This module walks an input path for Swift source files, respecting
//! `.gitignore` patterns and custom filters. Files produced by the generator
//! itself (recognised by their suffix) are skipped.

use crate::error::{CliResult, ScanError};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Extension of Swift source files.
pub const SWIFT_EXTENSION: &str = "swift";

/// A discovered source file with its content.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path to the file.
    pub path: PathBuf,

    /// Path relative to the scan root.
    pub relative_path: PathBuf,

    /// File content.
    pub content: String,
}

/// Scanner for discovering Swift source files.
#[derive(Debug)]
pub struct SourceScanner {
    /// Input file or directory.
    root: PathBuf,

    /// Whether to respect .gitignore files.
    respect_gitignore: bool,

    /// Optional glob filter pattern.
    filter: Option<glob::Pattern>,

    /// Stem suffix marking generated files.
    generated_suffix: Option<String>,
}

impl SourceScanner {
    /// Create a new scanner for the given file or directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            respect_gitignore: true,
            filter: None,
            generated_suffix: None,
        }
    }

    /// Set whether to respect .gitignore files.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Set a glob filter pattern for files.
    ///
    /// Only files whose path relative to the root matches are included.
    pub fn with_filter(mut self, pattern: &str) -> Result<Self, ScanError> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| ScanError::invalid_pattern(pattern, e.to_string()))?;
        self.filter = Some(glob_pattern);
        Ok(self)
    }

    /// Skip files whose stem ends with `suffix`.
    pub fn skip_generated(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.generated_suffix = (!suffix.is_empty()).then_some(suffix);
        self
    }

    /// Scan the input and return all discovered Swift files.
    pub fn scan(&self) -> CliResult<Vec<SourceFile>> {
        if !self.root.exists() {
            return Err(ScanError::not_found(self.root.clone()).into());
        }

        let files = if self.root.is_file() {
            self.scan_single()?
        } else {
            self.scan_directory()?
        };

        if files.is_empty() {
            return Err(ScanError::no_swift_files(self.root.clone()).into());
        }

        debug!(root = %self.root.display(), count = files.len(), "Discovered Swift files");
        Ok(files)
    }

    /// Scan without failing on empty results.
    ///
    /// Returns an empty vector if no files are found.
    pub fn scan_allow_empty(&self) -> CliResult<Vec<SourceFile>> {
        match self.scan() {
            Ok(files) => Ok(files),
            Err(crate::error::CliError::Scan(ScanError::NoSwiftFiles { .. })) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Whether `path` names a Swift source this scanner would pick up,
    /// ignoring the glob filter.
    pub fn is_source_path(&self, path: &Path) -> bool {
        if path.extension().map_or(true, |ext| ext != SWIFT_EXTENSION) {
            return false;
        }
        match (&self.generated_suffix, path.file_stem()) {
            (Some(suffix), Some(stem)) => !stem.to_string_lossy().ends_with(suffix.as_str()),
            _ => true,
        }
    }

    fn scan_single(&self) -> CliResult<Vec<SourceFile>> {
        if !self.is_source_path(&self.root) {
            return Ok(Vec::new());
        }
        let relative = self
            .root
            .file_name()
            .map_or_else(|| self.root.clone(), PathBuf::from);
        if !self.matches_filter(&relative) {
            return Ok(Vec::new());
        }
        Ok(vec![self.read(&self.root, relative)?])
    }

    fn scan_directory(&self) -> CliResult<Vec<SourceFile>> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .hidden(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(ScanError::Walk)?;
            let path = entry.path();

            if !path.is_file() || !self.is_source_path(path) {
                continue;
            }

            let relative = self.relative_path(path);
            if !self.matches_filter(&relative) {
                trace!(path = %relative.display(), "Filtered out");
                continue;
            }

            files.push(self.read(path, relative)?);
        }

        Ok(files)
    }

    fn matches_filter(&self, relative: &Path) -> bool {
        self.filter
            .as_ref()
            .map_or(true, |pattern| pattern.matches_path(relative))
    }

    fn read(&self, path: &Path, relative_path: PathBuf) -> CliResult<SourceFile> {
        let content = std::fs::read_to_string(path).map_err(|e| ScanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(SourceFile {
            path: path.to_path_buf(),
            relative_path,
            content,
        })
    }

    /// Get the relative path from root.
    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    /// Get the input path.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

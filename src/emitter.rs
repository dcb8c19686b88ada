//! Output files: one list per category, the combined list and scanner configs.
//!
//! Every file is rewritten wholesale. Any filesystem failure is returned as
//! [`RangegenError::FileSystem`] carrying the offending path.

use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::RangegenError;
use crate::fs_abstraction::FileSystem;
use crate::normalizer::AddressRange;
use crate::pipeline::CategoryResults;
use crate::templates::{render_all, TemplateContext};
use crate::utils::count_noun;

/// First header line of every per-category file.
pub const CATEGORY_HEADER_PREFIX: &str = "# Russia IP Ranges - ";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes pipeline output through a [`FileSystem`].
pub struct Emitter<'a> {
    fs: &'a dyn FileSystem,
    generated: String,
}

impl<'a> Emitter<'a> {
    pub fn new(fs: &'a dyn FileSystem, generated_at: NaiveDateTime) -> Self {
        Self {
            fs,
            generated: generated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Formatted generation timestamp used in every header.
    pub fn generated(&self) -> &str {
        &self.generated
    }

    /// Write one file per category into `dir`, then remove stale category files.
    ///
    /// `dir` is created if missing. Ranges keep their first-seen order.
    /// A stale file is a `.txt` file in `dir` that carries a category header
    /// but was not written by this call.
    pub fn write_categories(
        &self,
        results: &CategoryResults,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, RangegenError> {
        self.ensure_dir(dir)?;

        let mut written = Vec::new();
        for (category, ranges) in results.iter() {
            let path = dir.join(category.file_name());
            let content = render_category(
                &category.as_str().to_uppercase(),
                &self.generated,
                ranges,
            );
            self.write_file(&path, &content)?;
            info!(
                "Created {} ({})",
                path.display(),
                count_noun(ranges.len(), "range", "ranges")
            );
            written.push(path);
        }

        self.remove_stale(dir, &written)?;

        Ok(written)
    }

    /// Write the combined list, sorted by (first, last), to `path`.
    pub fn write_combined(
        &self,
        combined: &[AddressRange],
        path: &Path,
    ) -> Result<PathBuf, RangegenError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.ensure_dir(parent)?;
        }

        let mut sorted = combined.to_vec();
        sorted.sort();

        let content = render_combined(&self.generated, &sorted);
        self.write_file(path, &content)?;
        info!(
            "Combined file: {} ({})",
            path.display(),
            count_noun(sorted.len(), "range", "ranges")
        );

        Ok(path.to_path_buf())
    }

    /// Write the masscan, nmap and NESCA templates into `dir`.
    pub fn write_scan_configs(
        &self,
        combined_file: &Path,
        category_dir: &Path,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, RangegenError> {
        self.ensure_dir(dir)?;

        let ctx = TemplateContext {
            combined_file: combined_file.display().to_string(),
            generated: self.generated.clone(),
            category_dir: category_dir.display().to_string(),
        };

        let mut written = Vec::new();
        for (name, content) in render_all(&ctx) {
            let path = dir.join(name);
            self.write_file(&path, &content)?;
            written.push(path);
        }

        info!("Scanner configs created in {}", dir.display());
        Ok(written)
    }

    fn ensure_dir(&self, dir: &Path) -> Result<(), RangegenError> {
        if !self.fs.exists(dir) {
            debug!("Creating directory {}", dir.display());
        }
        self.fs
            .create_dir_all(dir)
            .map_err(|e| RangegenError::fs(dir, e))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), RangegenError> {
        self.fs
            .write(path, content.as_bytes())
            .map_err(|e| RangegenError::fs(path, e))
    }

    fn remove_stale(&self, dir: &Path, written: &[PathBuf]) -> Result<(), RangegenError> {
        let keep: HashSet<&PathBuf> = written.iter().collect();
        let files = self
            .fs
            .list_files(dir)
            .map_err(|e| RangegenError::fs(dir, e))?;

        for path in files {
            if keep.contains(&path) || path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            // Only files we generated ourselves
            let is_ours = self
                .fs
                .read_to_string(&path)
                .map(|content| content.starts_with(CATEGORY_HEADER_PREFIX))
                .unwrap_or(false);
            if is_ours {
                self.fs
                    .remove_file(&path)
                    .map_err(|e| RangegenError::fs(&path, e))?;
                info!("Removed stale {}", path.display());
            }
        }

        Ok(())
    }
}

/// Text of a per-category file.
pub fn render_category(name: &str, generated: &str, ranges: &[AddressRange]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", CATEGORY_HEADER_PREFIX, name);
    let _ = writeln!(out, "# Generated: {}", generated);
    let _ = writeln!(out, "# Total ranges: {}", ranges.len());
    out.push('\n');
    push_ranges(&mut out, ranges);
    out
}

/// Text of the combined file.
pub fn render_combined(generated: &str, ranges: &[AddressRange]) -> String {
    let mut out = String::new();
    out.push_str("# ALL RUSSIA IP RANGES + HIKVISION + SMARTPSS + CAMERAS\n");
    let _ = writeln!(out, "# Generated: {}", generated);
    out.push_str(
        "# Includes: All Russia + Hikvision(8000) + SmartPSS(3000) + Web(80) + Cameras(37777)\n",
    );
    let _ = writeln!(out, "# Total unique ranges: {}", ranges.len());
    out.push('\n');
    push_ranges(&mut out, ranges);
    out
}

fn push_ranges(out: &mut String, ranges: &[AddressRange]) {
    for range in ranges {
        let _ = writeln!(out, "{}", range);
    }
}

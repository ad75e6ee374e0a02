use crate::error::ReportError;
use crate::services::canonical::{canonical_owners_url, descriptor_url};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const OWNERS_FILE_COLUMN: &str = "owners_file";

/// Descriptor locations already represented in a prior report.
#[derive(Debug, Default)]
pub struct CompletedFileSet {
    urls: HashSet<String>,
}

impl CompletedFileSet {
    pub fn from_report(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            ReportError::Input(format!("cannot open prior report {}: {}", path.display(), e))
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut csv = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let column = csv
            .headers()?
            .iter()
            .position(|h| h.trim() == OWNERS_FILE_COLUMN)
            .ok_or_else(|| {
                ReportError::Input(format!("prior report has no `{}` column", OWNERS_FILE_COLUMN))
            })?;
        let mut set = Self::default();
        for record in csv.records() {
            let record = record?;
            if let Some(url) = record.get(column).filter(|u| !u.trim().is_empty()) {
                set.insert(url);
            }
        }
        Ok(set)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(&canonical_owners_url(url))
    }

    /// Returns false when the location was already present.
    pub fn insert(&mut self, url: &str) -> bool {
        self.urls.insert(canonical_owners_url(url))
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Candidates not yet represented, expanded to fetchable locations.
    /// Each is marked completed as it is returned, so duplicates in the
    /// candidate list come back once.
    pub fn pending<'c>(&mut self, candidates: impl IntoIterator<Item = &'c str>) -> Vec<String> {
        let mut out = Vec::new();
        for candidate in candidates {
            let url = descriptor_url(candidate);
            if self.contains(&url) {
                debug!(url = %url, "already in prior report");
                continue;
            }
            self.insert(&url);
            out.push(url);
        }
        out
    }
}

/// One candidate per non-blank, non-`#` line.
pub fn parse_candidate_list(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect()
}

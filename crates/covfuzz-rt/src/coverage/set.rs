//! Coverage sets read back from `.cov` files by the harness.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{RuntimeError, RuntimeResult};
use crate::location::SourceLocation;

/// Hit counts per source location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageSet {
    hits: HashMap<SourceLocation, u64>,
}

impl CoverageSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the contents of a coverage file.
    ///
    /// Blank lines are skipped; any other line must be a `line,col` record.
    pub fn parse(text: &str) -> RuntimeResult<Self> {
        let mut set = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let record = raw.trim();
            if record.is_empty() {
                continue;
            }
            let location = record
                .parse()
                .map_err(|source| RuntimeError::MalformedRecord {
                    line: idx + 1,
                    source,
                })?;
            set.record_hit(location);
        }
        Ok(set)
    }

    /// Load a coverage file. A missing file is an empty set.
    pub fn load(path: &Path) -> RuntimeResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(RuntimeError::coverage_io(path, e)),
        }
    }

    /// Record one hit on a location
    pub fn record_hit(&mut self, location: SourceLocation) {
        *self.hits.entry(location).or_insert(0) += 1;
    }

    /// Number of distinct locations
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether no location was hit
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Whether a location was hit
    #[must_use]
    pub fn contains(&self, location: SourceLocation) -> bool {
        self.hits.contains_key(&location)
    }

    /// Hit count for a location
    #[must_use]
    pub fn hit_count(&self, location: SourceLocation) -> u64 {
        self.hits.get(&location).copied().unwrap_or(0)
    }

    /// Sum of all hit counts
    #[must_use]
    pub fn total_hits(&self) -> u64 {
        self.hits.values().sum()
    }

    /// All hit locations, sorted
    #[must_use]
    pub fn locations(&self) -> Vec<SourceLocation> {
        let mut locations: Vec<_> = self.hits.keys().copied().collect();
        locations.sort_unstable();
        locations
    }

    /// Locations hit in `other` that this set has not seen
    #[must_use]
    pub fn new_locations(&self, other: &Self) -> Vec<SourceLocation> {
        let mut fresh: Vec<_> = other
            .hits
            .keys()
            .filter(|loc| !self.hits.contains_key(loc))
            .copied()
            .collect();
        fresh.sort_unstable();
        fresh
    }

    /// Merge another set into this one, summing hit counts
    pub fn merge(&mut self, other: &Self) {
        for (location, count) in &other.hits {
            *self.hits.entry(*location).or_insert(0) += count;
        }
    }
}

impl FromIterator<SourceLocation> for CoverageSet {
    fn from_iter<I: IntoIterator<Item = SourceLocation>>(iter: I) -> Self {
        let mut set = Self::new();
        for location in iter {
            set.record_hit(location);
        }
        set
    }
}

//! Seed corpus and on-disk storage of interesting inputs
//!
//! Output layout, as expected by downstream scoring:
//!
//! ```text
//! <output>/
//! ├── crash/<sha256>   inputs that crashed the target
//! └── pass/<sha256>    inputs that passed (only with --store-passing-input)
//! ```

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Content-derived file name for an input
#[must_use]
pub fn content_name(input: &[u8]) -> String {
    format!("{:x}", Sha256::digest(input))
}

/// Regular files in a directory, sorted by path. A missing directory is empty.
pub fn list_inputs(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// In-memory set of inputs the fuzzer mutates
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<Vec<u8>>,
    names: HashSet<String>,
}

impl Corpus {
    /// Create an empty corpus
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every file of a seed directory.
    ///
    /// An empty directory yields a corpus holding the empty input, so there
    /// is always something to mutate.
    pub fn from_seed_dir(dir: &Path) -> CliResult<Self> {
        if !dir.is_dir() {
            return Err(CliError::invalid_argument(format!(
                "seed directory {} does not exist",
                dir.display()
            )));
        }

        let mut corpus = Self::new();
        for path in list_inputs(dir)? {
            let input = fs::read(&path)?;
            corpus.add(input);
        }
        if corpus.is_empty() {
            corpus.add(Vec::new());
        }
        tracing::debug!(seeds = corpus.len(), dir = %dir.display(), "loaded seed corpus");
        Ok(corpus)
    }

    /// Add an input; returns false if identical content is already present
    pub fn add(&mut self, input: Vec<u8>) -> bool {
        if !self.names.insert(content_name(&input)) {
            return false;
        }
        self.entries.push(input);
        true
    }

    /// Entry by index
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&[u8]> {
        self.entries.get(idx).map(Vec::as_slice)
    }

    /// All entries in insertion order
    #[must_use]
    pub fn entries(&self) -> &[Vec<u8>] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the corpus is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Kind of stored input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Crashed the target
    Crash,
    /// Ran to a clean exit
    Pass,
}

impl InputKind {
    /// Subdirectory name under the output root
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Crash => "crash",
            Self::Pass => "pass",
        }
    }
}

/// Writes inputs under `crash/` and `pass/`, one file per distinct content
#[derive(Debug)]
pub struct OutputStore {
    root: PathBuf,
    stored: HashSet<(InputKind, String)>,
}

impl OutputStore {
    /// Create (or reopen) an output directory.
    ///
    /// Files already present count as stored, so a resumed campaign does
    /// not report them again.
    pub fn create(root: &Path) -> CliResult<Self> {
        let mut stored = HashSet::new();
        for kind in [InputKind::Crash, InputKind::Pass] {
            let dir = root.join(kind.dir_name());
            fs::create_dir_all(&dir)?;
            for path in list_inputs(&dir)? {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    stored.insert((kind, name.to_string()));
                }
            }
        }
        Ok(Self {
            root: root.to_path_buf(),
            stored,
        })
    }

    /// Directory for a kind of input
    #[must_use]
    pub fn dir(&self, kind: InputKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Store an input. Returns the new file, or `None` if it was already stored.
    pub fn store(&mut self, kind: InputKind, input: &[u8]) -> CliResult<Option<PathBuf>> {
        let name = content_name(input);
        if self.stored.contains(&(kind, name.clone())) {
            return Ok(None);
        }
        let path = self.dir(kind).join(&name);
        fs::write(&path, input)?;
        self.stored.insert((kind, name));
        Ok(Some(path))
    }

    /// Number of stored inputs of a kind
    #[must_use]
    pub fn count(&self, kind: InputKind) -> usize {
        self.stored.iter().filter(|(k, _)| *k == kind).count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_content_name_is_sha256_hex() {
        assert_eq!(
            content_name(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_list_inputs_sorted_files_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b"), "2").unwrap();
        fs::write(dir.path().join("a"), "1").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = list_inputs(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("a"), dir.path().join("b")]);
    }

    #[test]
    fn test_list_inputs_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert!(list_inputs(&dir.path().join("nope")).unwrap().is_empty());
    }

    mod corpus_tests {
        use super::*;

        #[test]
        fn test_add_dedups_content() {
            let mut corpus = Corpus::new();
            assert!(corpus.add(b"1+1".to_vec()));
            assert!(!corpus.add(b"1+1".to_vec()));
            assert!(corpus.add(b"1+2".to_vec()));
            assert_eq!(corpus.len(), 2);
            assert_eq!(corpus.get(1), Some(&b"1+2"[..]));
        }

        #[test]
        fn test_from_seed_dir() {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("s1"), "1+2\n").unwrap();
            fs::write(dir.path().join("s2"), "3+4\n").unwrap();
            fs::write(dir.path().join("s3"), "1+2\n").unwrap();

            let corpus = Corpus::from_seed_dir(dir.path()).unwrap();
            assert_eq!(corpus.len(), 2);
            assert_eq!(corpus.get(0), Some(&b"1+2\n"[..]));
        }

        #[test]
        fn test_empty_seed_dir_yields_empty_input() {
            let dir = TempDir::new().unwrap();
            let corpus = Corpus::from_seed_dir(dir.path()).unwrap();
            assert_eq!(corpus.entries(), &[Vec::<u8>::new()]);
        }

        #[test]
        fn test_missing_seed_dir_is_an_error() {
            let dir = TempDir::new().unwrap();
            let err = Corpus::from_seed_dir(&dir.path().join("missing")).unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument { .. }));
        }
    }

    mod output_store_tests {
        use super::*;

        #[test]
        fn test_create_makes_layout() {
            let dir = TempDir::new().unwrap();
            let store = OutputStore::create(&dir.path().join("out")).unwrap();
            assert!(store.dir(InputKind::Crash).is_dir());
            assert!(store.dir(InputKind::Pass).is_dir());
            assert!(store.dir(InputKind::Crash).ends_with("out/crash"));
        }

        #[test]
        fn test_store_dedups_per_kind() {
            let dir = TempDir::new().unwrap();
            let mut store = OutputStore::create(dir.path()).unwrap();

            let first = store.store(InputKind::Crash, b"2000+1").unwrap();
            assert!(first.is_some());
            assert_eq!(fs::read(first.unwrap()).unwrap(), b"2000+1");

            assert!(store.store(InputKind::Crash, b"2000+1").unwrap().is_none());
            assert!(store.store(InputKind::Pass, b"2000+1").unwrap().is_some());

            assert_eq!(store.count(InputKind::Crash), 1);
            assert_eq!(store.count(InputKind::Pass), 1);
        }

        #[test]
        fn test_reopen_remembers_existing_files() {
            let dir = TempDir::new().unwrap();
            {
                let mut store = OutputStore::create(dir.path()).unwrap();
                store.store(InputKind::Crash, b"boom").unwrap();
            }

            let mut store = OutputStore::create(dir.path()).unwrap();
            assert_eq!(store.count(InputKind::Crash), 1);
            assert!(store.store(InputKind::Crash, b"boom").unwrap().is_none());
        }
    }
}

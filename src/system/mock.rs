//! Mock filesystem implementation for testing
//!
//! In-memory implementation of AssetSystem with fault injection for probes,
//! directory creation and renames, plus call counters.

use dpiwatch_core_interface::{AssetSystem, AssetSystemError, FileMetadata, Result};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::task::{Context, Poll};
use std::time::SystemTime;
use tokio::io::{AsyncRead, AsyncWrite};

/// In-memory file data
#[derive(Debug, Clone)]
struct MockEntry {
    data: Vec<u8>,
    modified: SystemTime,
    is_dir: bool,
}

impl MockEntry {
    fn file(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            modified: SystemTime::now(),
            is_dir: false,
        }
    }

    fn dir() -> Self {
        Self {
            data: Vec::new(),
            modified: SystemTime::now(),
            is_dir: true,
        }
    }
}

type Entries = Arc<RwLock<HashMap<PathBuf, MockEntry>>>;

#[derive(Debug, Default)]
struct Faults {
    probe: HashMap<PathBuf, io::ErrorKind>,
    create: HashMap<PathBuf, io::ErrorKind>,
    rename: HashMap<PathBuf, io::ErrorKind>,
    create_races: HashSet<PathBuf>,
}

/// Mock filesystem implementation for testing
///
/// Parent directories are not implied: `rename` and `writer` fail with
/// `NotFound` unless the destination's parent was added or created.
#[derive(Debug, Clone, Default)]
pub struct MockSystem {
    entries: Entries,
    faults: Arc<RwLock<Faults>>,
    probe_calls: Arc<AtomicUsize>,
    create_calls: Arc<AtomicUsize>,
    rename_calls: Arc<AtomicUsize>,
}

impl MockSystem {
    /// Create a new empty mock filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content, along with its ancestors
    pub fn add_file(&self, path: impl Into<PathBuf>, data: &[u8]) {
        let path = path.into();
        let mut entries = self.entries.write().unwrap();
        insert_ancestors(&mut entries, &path);
        entries.insert(path, MockEntry::file(data));
    }

    /// Add a directory, along with its ancestors
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut entries = self.entries.write().unwrap();
        insert_ancestors(&mut entries, &path);
        entries.insert(path, MockEntry::dir());
    }

    /// Remove a file or directory
    pub fn remove(&self, path: &Path) {
        self.entries.write().unwrap().remove(path);
    }

    /// Get file data (for testing)
    pub fn get_data(&self, path: &Path) -> Option<Vec<u8>> {
        self.entries
            .read()
            .unwrap()
            .get(path)
            .filter(|e| !e.is_dir)
            .map(|e| e.data.clone())
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.entries
            .read()
            .unwrap()
            .get(path)
            .is_some_and(|e| e.is_dir)
    }

    /// Make `metadata(path)` fail with `kind`
    pub fn fail_probe(&self, path: &Path, kind: io::ErrorKind) {
        self.faults
            .write()
            .unwrap()
            .probe
            .insert(path.to_path_buf(), kind);
    }

    /// Make `create_dir_all(path)` fail with `kind` without creating anything
    pub fn fail_create(&self, path: &Path, kind: io::ErrorKind) {
        self.faults
            .write()
            .unwrap()
            .create
            .insert(path.to_path_buf(), kind);
    }

    /// Make `rename(path, _)` fail with `kind`
    pub fn fail_rename(&self, path: &Path, kind: io::ErrorKind) {
        self.faults
            .write()
            .unwrap()
            .rename
            .insert(path.to_path_buf(), kind);
    }

    /// Simulate another task winning a creation race: the next
    /// `create_dir_all(path)` creates the directory, then reports
    /// `AlreadyExists`
    pub fn lose_create_race(&self, path: &Path) {
        self.faults
            .write()
            .unwrap()
            .create_races
            .insert(path.to_path_buf());
    }

    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn rename_calls(&self) -> usize {
        self.rename_calls.load(Ordering::SeqCst)
    }

    fn injected(&self, path: &Path, pick: fn(&Faults) -> &HashMap<PathBuf, io::ErrorKind>) -> Option<AssetSystemError> {
        let faults = self.faults.read().unwrap();
        pick(&faults)
            .get(path)
            .map(|kind| AssetSystemError::from_io(io::Error::from(*kind), path))
    }

    fn require_parent_dir(&self, path: &Path) -> Result<()> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        let entries = self.entries.read().unwrap();
        match entries.get(parent) {
            Some(entry) if entry.is_dir => Ok(()),
            _ => Err(AssetSystemError::NotFound(parent.to_path_buf())),
        }
    }
}

fn insert_ancestors(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    for ancestor in path.ancestors().skip(1) {
        if ancestor.as_os_str().is_empty() {
            continue;
        }
        entries
            .entry(ancestor.to_path_buf())
            .or_insert_with(MockEntry::dir);
    }
}

/// Writer that appends straight into the shared entry map
struct MockWriter {
    path: PathBuf,
    entries: Entries,
}

impl AsyncWrite for MockWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let mut entries = self.entries.write().unwrap();
        match entries.get_mut(&self.path) {
            Some(entry) => {
                entry.data.extend_from_slice(buf);
                entry.modified = SystemTime::now();
                Poll::Ready(Ok(buf.len()))
            }
            None => Poll::Ready(Err(io::Error::from(io::ErrorKind::NotFound))),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[async_trait::async_trait]
impl AssetSystem for MockSystem {
    async fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.injected(path, |f| &f.probe) {
            return Err(err);
        }

        let entries = self.entries.read().unwrap();
        let entry = entries
            .get(path)
            .ok_or_else(|| AssetSystemError::NotFound(path.to_path_buf()))?;

        Ok(FileMetadata {
            path: path.to_path_buf(),
            len: entry.data.len() as u64,
            is_dir: entry.is_dir,
            modified: entry.modified,
        })
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<FileMetadata>> {
        if let Some(err) = self.injected(path, |f| &f.probe) {
            return Err(err);
        }

        let entries = self.entries.read().unwrap();
        match entries.get(path) {
            Some(entry) if entry.is_dir => {}
            _ => return Err(AssetSystemError::NotFound(path.to_path_buf())),
        }

        Ok(entries
            .iter()
            .filter(|(entry_path, _)| entry_path.parent() == Some(path))
            .map(|(entry_path, entry)| FileMetadata {
                path: entry_path.clone(),
                len: entry.data.len() as u64,
                is_dir: entry.is_dir,
                modified: entry.modified,
            })
            .collect())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.injected(path, |f| &f.create) {
            return Err(err);
        }

        let lost_race = self.faults.write().unwrap().create_races.remove(path);
        let mut entries = self.entries.write().unwrap();
        if let Some(entry) = entries.get(path) {
            if !entry.is_dir {
                return Err(AssetSystemError::AlreadyExists(path.to_path_buf()));
            }
        }
        insert_ancestors(&mut entries, path);
        entries
            .entry(path.to_path_buf())
            .or_insert_with(MockEntry::dir);

        if lost_race {
            return Err(AssetSystemError::AlreadyExists(path.to_path_buf()));
        }
        Ok(())
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.rename_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.injected(from, |f| &f.rename) {
            return Err(err);
        }
        self.require_parent_dir(to)?;

        let mut entries = self.entries.write().unwrap();
        let entry = entries
            .remove(from)
            .ok_or_else(|| AssetSystemError::NotFound(from.to_path_buf()))?;
        entries.insert(to.to_path_buf(), entry);
        Ok(())
    }

    async fn reader(&self, path: &Path) -> Result<Box<dyn AsyncRead + Unpin + Send>> {
        let entries = self.entries.read().unwrap();
        let entry = entries
            .get(path)
            .filter(|e| !e.is_dir)
            .ok_or_else(|| AssetSystemError::NotFound(path.to_path_buf()))?;

        Ok(Box::new(std::io::Cursor::new(entry.data.clone())))
    }

    async fn writer(&self, path: &Path) -> Result<Box<dyn AsyncWrite + Unpin + Send>> {
        self.require_parent_dir(path)?;
        self.entries
            .write()
            .unwrap()
            .insert(path.to_path_buf(), MockEntry::file(&[]));

        Ok(Box::new(MockWriter {
            path: path.to_path_buf(),
            entries: Arc::clone(&self.entries),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpiwatch_core_interface::AssetSystemExt;

    #[tokio::test]
    async fn test_mock_basic_operations() {
        let system = MockSystem::new();
        system.add_file("/src/icon@2x.png", b"Hello, World!");

        assert!(system.exists(Path::new("/src/icon@2x.png")).await);
        assert!(system.is_dir(Path::new("/src")));
        assert!(!system.exists(Path::new("/src/other.png")).await);

        let meta = system.metadata(Path::new("/src/icon@2x.png")).await.unwrap();
        assert_eq!(meta.len, 13);
        assert!(!meta.is_dir);

        let data = system.read_all(Path::new("/src/icon@2x.png")).await.unwrap();
        assert_eq!(data, b"Hello, World!");
    }

    #[tokio::test]
    async fn test_mock_writer_truncates() {
        let system = MockSystem::new();
        system.add_file("/res/a.png", b"old old old");

        system.write_all(Path::new("/res/a.png"), b"new").await.unwrap();

        assert_eq!(system.get_data(Path::new("/res/a.png")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_mock_rename_requires_parent() {
        let system = MockSystem::new();
        system.add_file("/src/a.png", b"a");

        let err = system
            .rename(Path::new("/src/a.png"), Path::new("/res/drawable-hdpi/a.png"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(system.exists(Path::new("/src/a.png")).await);
        assert_eq!(system.rename_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_directories() {
        let system = MockSystem::new();
        system.add_dir("/data");
        system.add_file("/data/file1.png", b"content1");
        system.add_file("/data/sub/file2.png", b"content2");

        let entries = system.read_dir(Path::new("/data")).await.unwrap();
        assert_eq!(entries.len(), 2);

        let names: Vec<_> = entries
            .iter()
            .map(|e| e.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert!(names.contains(&"file1.png".to_string()));
        assert!(names.contains(&"sub".to_string()));
    }

    #[tokio::test]
    async fn test_mock_fault_injection() {
        let system = MockSystem::new();
        system.fail_probe(Path::new("/locked"), io::ErrorKind::PermissionDenied);

        let err = system.metadata(Path::new("/locked")).await.unwrap_err();
        assert!(matches!(err, AssetSystemError::PermissionDenied(_)));
        assert_eq!(system.probe_calls(), 1);

        system.lose_create_race(Path::new("/res/drawable-mdpi"));
        let err = system
            .create_dir_all(Path::new("/res/drawable-mdpi"))
            .await
            .unwrap_err();
        assert!(err.is_already_exists());
        assert!(system.is_dir(Path::new("/res/drawable-mdpi")));

        // The race is one-shot.
        system
            .create_dir_all(Path::new("/res/drawable-mdpi"))
            .await
            .unwrap();
        assert_eq!(system.create_calls(), 2);
    }
}

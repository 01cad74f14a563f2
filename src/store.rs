use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::entities::AddressEntry;
use crate::error::{storage_error, Error};

/// Name of the single slot the address collection lives in.
pub const SLOT_NAME: &str = "travel-addresses";

pub trait Store {
    fn load(&self) -> Result<Option<Vec<AddressEntry>>, Error>;
    fn save(&self, entries: &[AddressEntry]) -> Result<(), Error>;
}

pub type DynStore = Box<dyn Store + Send + Sync>;

#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Option<Vec<AddressEntry>>, Error> {
        let slot = self.slot.lock().map_err(storage_error)?;

        match slot.as_deref() {
            Some(data) => Ok(Some(serde_json::from_str(data)?)),
            None => Ok(None),
        }
    }

    fn save(&self, entries: &[AddressEntry]) -> Result<(), Error> {
        let data = serde_json::to_string(entries)?;
        *self.slot.lock().map_err(storage_error)? = Some(data);

        Ok(())
    }
}

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, Error> {
        fs::create_dir_all(dir.as_ref())?;

        Ok(Self {
            path: dir.as_ref().join(format!("{}.json", SLOT_NAME)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for FileStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<Vec<AddressEntry>>, Error> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_str(&data)?))
    }

    #[tracing::instrument(skip(self, entries), fields(path = %self.path.display(), count = entries.len()))]
    fn save(&self, entries: &[AddressEntry]) -> Result<(), Error> {
        let data = serde_json::to_vec_pretty(entries)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<AddressEntry> {
        let mut home = AddressEntry::new("1".into(), "A St".into());
        home.is_home = true;
        let mut skipped = AddressEntry::new("2".into(), "B St".into());
        skipped.is_selected = false;
        let mut end = AddressEntry::new("3".into(), "C St".into());
        end.is_destination = true;

        vec![home, skipped, end]
    }

    #[test]
    fn memory_store_starts_empty() {
        assert_eq!(MemoryStore::new().load().unwrap(), None);
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        store.save(&sample()).unwrap();

        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert_eq!(store.load().unwrap(), None);

        store.save(&sample()).unwrap();
        assert!(store.path().ends_with("travel-addresses.json"));

        let reopened = FileStore::new(dir.path()).unwrap();
        assert_eq!(reopened.load().unwrap(), Some(sample()));
    }

    #[test]
    fn file_store_reports_corrupt_slot() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        let err = store.load().unwrap_err();
        assert_eq!(err.code, 2);
    }
}

use chrono::Utc;

use crate::entities::address::{normalize_text, AddressEntry, Role};
use crate::error::Error;
use crate::store::DynStore;

const SEED_ADDRESSES: [&str; 10] = [
    "1234 Legacy Drive, Plano, TX 75024",
    "5678 Preston Road, Plano, TX 75093",
    "9012 Coit Road, Plano, TX 75075",
    "3456 Spring Creek Parkway, Plano, TX 75023",
    "7890 Park Boulevard, Plano, TX 75074",
    "2345 Alma Drive, Plano, TX 75023",
    "6789 Independence Parkway, Plano, TX 75075",
    "0123 Custer Road, Plano, TX 75075",
    "4567 Hedgcoxe Road, Plano, TX 75093",
    "8901 Ohio Drive, Plano, TX 75024",
];

pub fn seed_entries() -> Vec<AddressEntry> {
    SEED_ADDRESSES
        .iter()
        .enumerate()
        .map(|(i, text)| AddressEntry::new((i + 1).to_string(), text.to_string()))
        .collect()
}

/// Ordered address collection. Every mutation is written through to the
/// store before the call returns; no-ops never touch the store.
pub struct AddressBook {
    entries: Vec<AddressEntry>,
    store: DynStore,
    last_id: i64,
}

impl AddressBook {
    #[tracing::instrument(name = "AddressBook::open", skip_all)]
    pub fn open(store: DynStore) -> Result<Self, Error> {
        let entries = match store.load()? {
            Some(entries) => entries,
            None => {
                tracing::info!("no saved addresses, seeding defaults");
                let entries = seed_entries();
                store.save(&entries)?;
                entries
            }
        };

        let last_id = entries
            .iter()
            .filter_map(|entry| entry.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        Ok(Self {
            entries,
            store,
            last_id,
        })
    }

    pub fn entries(&self) -> &[AddressEntry] {
        &self.entries
    }

    pub fn find(&self, id: &str) -> Option<&AddressEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    #[tracing::instrument(skip(self))]
    pub fn add(&mut self, text: &str) -> Result<Option<AddressEntry>, Error> {
        let text = match normalize_text(text) {
            Some(text) => text,
            None => return Ok(None),
        };

        let id = self.next_id();
        let entry = AddressEntry::new(id.to_string(), text);

        let mut entries = self.entries.clone();
        entries.push(entry.clone());
        self.commit(entries)?;
        self.last_id = id;

        Ok(Some(entry))
    }

    #[tracing::instrument(skip(self))]
    pub fn edit(&mut self, id: &str, text: &str) -> Result<bool, Error> {
        let text = match normalize_text(text) {
            Some(text) => text,
            None => return Ok(false),
        };

        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.text = text,
            None => return Ok(false),
        }

        self.commit(entries)?;
        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: &str) -> Result<bool, Error> {
        let entries: Vec<AddressEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();

        if entries.len() == self.entries.len() {
            return Ok(false);
        }

        self.commit(entries)?;
        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    pub fn set_role(&mut self, id: &str, role: Role) -> Result<bool, Error> {
        let enabling = match self.find(id) {
            Some(entry) => !entry.has_role(role),
            None => return Ok(false),
        };

        let mut entries = self.entries.clone();
        for entry in entries.iter_mut() {
            if entry.id == id {
                entry.set_role_flag(role, enabling);
                if enabling {
                    entry.is_selected = true;
                }
            } else if enabling {
                entry.set_role_flag(role, false);
            }
        }

        self.commit(entries)?;
        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle_selected(&mut self, id: &str) -> Result<bool, Error> {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) if !entry.holds_any_role() => entry.is_selected = !entry.is_selected,
            _ => return Ok(false),
        }

        self.commit(entries)?;
        Ok(true)
    }

    fn next_id(&self) -> i64 {
        Utc::now()
            .timestamp_millis()
            .max(self.last_id.saturating_add(1))
    }

    /// The book only takes `entries` once the store has accepted them.
    fn commit(&mut self, entries: Vec<AddressEntry>) -> Result<(), Error> {
        self.store.save(&entries)?;
        self.entries = entries;
        Ok(())
    }
}

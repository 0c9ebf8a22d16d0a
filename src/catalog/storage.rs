use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use sled::IVec;

use crate::catalog::errors::CatalogError;
use crate::catalog::types::{CatalogEntity, EntityKind, Survivor};

const TREE_MONSTERS: &str = "catalog_monsters";
const TREE_ITEMS: &str = "catalog_items";
const TREE_SURVIVORS: &str = "catalog_survivors";

/// On-disk value: the record plus the schema version it was written with.
#[derive(Serialize, Deserialize)]
struct StoredRecord<R> {
    schema_version: u8,
    record: R,
}

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct CatalogStoreBuilder {
    path: PathBuf,
    flush_on_write: bool,
}

impl CatalogStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            flush_on_write: true,
        }
    }

    /// Skip the per-insert flush; data still reaches disk when the store is dropped.
    pub fn without_flush(mut self) -> Self {
        self.flush_on_write = false;
        self
    }

    pub fn open(self) -> Result<CatalogStore, CatalogError> {
        CatalogStore::open_with_options(self.path, self.flush_on_write)
    }
}

/// Sled-backed persistence for the monster, item and survivor collections.
///
/// Each collection lives in its own tree keyed by the record's natural key, byte for
/// byte, so lookups are case-sensitive.
pub struct CatalogStore {
    _db: sled::Db,
    path: PathBuf,
    monsters: sled::Tree,
    items: sled::Tree,
    survivors: sled::Tree,
    flush_on_write: bool,
}

impl CatalogStore {
    /// Open (or create) the catalog store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        Self::open_with_options(path, true)
    }

    fn open_with_options<P: AsRef<Path>>(path: P, flush_on_write: bool) -> Result<Self, CatalogError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let monsters = db.open_tree(TREE_MONSTERS)?;
        let items = db.open_tree(TREE_ITEMS)?;
        let survivors = db.open_tree(TREE_SURVIVORS)?;
        debug!("opened catalog store at {}", path_ref.display());
        Ok(Self {
            _db: db,
            path: path_ref.to_path_buf(),
            monsters,
            items,
            survivors,
            flush_on_write,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tree(&self, kind: EntityKind) -> &sled::Tree {
        match kind {
            EntityKind::Monster => &self.monsters,
            EntityKind::Item => &self.items,
            EntityKind::Survivor => &self.survivors,
        }
    }

    fn serialize<E: CatalogEntity>(record: &E) -> Result<Vec<u8>, CatalogError> {
        let stored = StoredRecord {
            schema_version: E::SCHEMA_VERSION,
            record,
        };
        Ok(bincode::serialize(&stored)?)
    }

    fn deserialize<E: CatalogEntity>(bytes: IVec) -> Result<E, CatalogError> {
        let stored: StoredRecord<E> = bincode::deserialize(&bytes)?;
        if stored.schema_version != E::SCHEMA_VERSION {
            return Err(CatalogError::SchemaMismatch {
                entity: E::KIND.singular(),
                expected: E::SCHEMA_VERSION,
                found: stored.schema_version,
            });
        }
        Ok(stored.record)
    }

    /// Insert `record` only if no record with the same key exists.
    ///
    /// Returns `true` when the record was created and `false` when the key was already
    /// present, in which case the stored record is left untouched.
    pub fn insert_if_absent<E: CatalogEntity>(&self, record: &E) -> Result<bool, CatalogError> {
        let bytes = Self::serialize(record)?;
        let tree = self.tree(E::KIND);
        let swapped = tree.compare_and_swap(record.key().as_bytes(), None as Option<&[u8]>, Some(bytes))?;
        let created = swapped.is_ok();
        if created && self.flush_on_write {
            tree.flush()?;
        }
        Ok(created)
    }

    /// Fetch a record by key, or `None` when absent.
    pub fn find<E: CatalogEntity>(&self, key: &str) -> Result<Option<E>, CatalogError> {
        match self.tree(E::KIND).get(key.as_bytes())? {
            Some(bytes) => Ok(Some(Self::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    /// Fetch exactly one record by key; a miss is [`CatalogError::NotFound`].
    pub fn get<E: CatalogEntity>(&self, key: &str) -> Result<E, CatalogError> {
        self.find(key)?
            .ok_or_else(|| CatalogError::NotFound(format!("{}: {}", E::KIND.singular(), key)))
    }

    /// Every record in a collection, in key order.
    pub fn list<E: CatalogEntity>(&self) -> Result<Vec<E>, CatalogError> {
        self.tree(E::KIND)
            .iter()
            .map(|entry| {
                entry
                    .map_err(CatalogError::from)
                    .and_then(|(_key, value)| Self::deserialize::<E>(value))
            })
            .collect()
    }

    /// List the stored keys of one collection.
    pub fn list_keys(&self, kind: EntityKind) -> Result<Vec<String>, CatalogError> {
        let mut keys = Vec::new();
        for entry in self.tree(kind).iter() {
            let (key, _) = entry?;
            keys.push(String::from_utf8_lossy(&key).into_owned());
        }
        Ok(keys)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.tree(kind).len()
    }

    /// Distinct non-blank survivor `Class` values, sorted.
    pub fn survivor_classes(&self) -> Result<Vec<String>, CatalogError> {
        let classes: BTreeSet<String> = self
            .list::<Survivor>()?
            .into_iter()
            .map(|survivor| survivor.class)
            .filter(|class| !class.trim().is_empty())
            .collect();
        Ok(classes.into_iter().collect())
    }

    pub fn flush(&self) -> Result<(), CatalogError> {
        for kind in EntityKind::IMPORT_ORDER {
            self.tree(kind).flush()?;
        }
        Ok(())
    }
}

//! Bulk import of delimited source files into the catalog store.
//!
//! Each source is read and checked in full (header columns, non-blank keys) before the
//! first insert. Rows are then reconciled in source order: a row whose key is absent is
//! created verbatim, a row whose key already exists is left alone. Running an import twice
//! is therefore harmless.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use serde::Serialize;

use crate::catalog::errors::CatalogError;
use crate::catalog::storage::CatalogStore;
use crate::catalog::types::{CatalogEntity, EntityKind, Item, Monster, Survivor};
use crate::logutil::escape_log;
use crate::validation::{check_headers, is_blank_key, oversized_fields};

/// One source path per collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSources {
    pub monsters: PathBuf,
    pub items: PathBuf,
    pub survivors: PathBuf,
}

impl ImportSources {
    pub fn path(&self, kind: EntityKind) -> &Path {
        match kind {
            EntityKind::Monster => &self.monsters,
            EntityKind::Item => &self.items,
            EntityKind::Survivor => &self.survivors,
        }
    }
}

/// Result of reconciling a single row.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowOutcome {
    Created,
    AlreadyExisted,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RowReport {
    pub key: String,
    pub outcome: RowOutcome,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum SourceStatus {
    Imported { rows: Vec<RowReport> },
    /// The source could not be opened; nothing was written for this collection.
    Skipped { reason: String },
}

/// Per-collection import result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SourceReport {
    pub kind: EntityKind,
    pub path: PathBuf,
    pub status: SourceStatus,
}

impl SourceReport {
    fn count(&self, outcome: RowOutcome) -> usize {
        match &self.status {
            SourceStatus::Imported { rows } => rows.iter().filter(|r| r.outcome == outcome).count(),
            SourceStatus::Skipped { .. } => 0,
        }
    }

    pub fn created(&self) -> usize {
        self.count(RowOutcome::Created)
    }

    pub fn already_existed(&self) -> usize {
        self.count(RowOutcome::AlreadyExisted)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, SourceStatus::Skipped { .. })
    }

    /// Keys created by this import, in source order.
    pub fn created_keys(&self) -> Vec<&str> {
        match &self.status {
            SourceStatus::Imported { rows } => rows
                .iter()
                .filter(|r| r.outcome == RowOutcome::Created)
                .map(|r| r.key.as_str())
                .collect(),
            SourceStatus::Skipped { .. } => Vec::new(),
        }
    }
}

/// Outcome of a full run over all three sources.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sources: Vec<SourceReport>,
}

impl ImportSummary {
    pub fn total_created(&self) -> usize {
        self.sources.iter().map(SourceReport::created).sum()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|s| s.is_skipped())
    }

    pub fn source(&self, kind: EntityKind) -> Option<&SourceReport> {
        self.sources.iter().find(|s| s.kind == kind)
    }
}

/// Reconciles delimited sources against a [`CatalogStore`].
pub struct Importer<'a> {
    store: &'a CatalogStore,
    delimiter: u8,
}

impl<'a> Importer<'a> {
    pub fn new(store: &'a CatalogStore) -> Self {
        Self {
            store,
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Import monsters, items and survivors, in that order.
    ///
    /// A missing source is skipped and the run continues. A malformed source stops the
    /// run; collections imported before it keep their new records.
    pub fn import_all(&self, sources: &ImportSources) -> Result<ImportSummary, CatalogError> {
        let started_at = Utc::now();
        let mut reports = Vec::with_capacity(EntityKind::IMPORT_ORDER.len());
        for kind in EntityKind::IMPORT_ORDER {
            let path = sources.path(kind);
            let report = match kind {
                EntityKind::Monster => self.import_source::<Monster>(path)?,
                EntityKind::Item => self.import_source::<Item>(path)?,
                EntityKind::Survivor => self.import_source::<Survivor>(path)?,
            };
            reports.push(report);
        }
        info!("All data has been successfully imported.");
        Ok(ImportSummary {
            started_at,
            finished_at: Utc::now(),
            sources: reports,
        })
    }

    /// Import one collection from `path`.
    pub fn import_source<E: CatalogEntity>(&self, path: &Path) -> Result<SourceReport, CatalogError> {
        let kind = E::KIND;
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                error!("File not found: {}. Skipping {} import.", path.display(), kind);
                return Ok(Self::skipped(kind, path, "file not found".to_string()));
            }
            Err(e) => {
                error!("Cannot open {}: {}. Skipping {} import.", path.display(), e, kind);
                return Ok(Self::skipped(kind, path, e.to_string()));
            }
        };
        // Directories open fine on some platforms and only fail on the first read
        match file.metadata() {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                error!("{} is not a regular file. Skipping {} import.", path.display(), kind);
                return Ok(Self::skipped(kind, path, "not a regular file".to_string()));
            }
            Err(e) => {
                error!("Cannot read {}: {}. Skipping {} import.", path.display(), e, kind);
                return Ok(Self::skipped(kind, path, e.to_string()));
            }
        }

        info!("Starting {} import from {}...", kind, path.display());
        let records = self.read_records::<E, _>(file, path)?;
        debug!("{} {} rows read from {}", records.len(), kind, path.display());

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            rows.push(self.reconcile(&record)?);
        }

        let report = SourceReport {
            kind,
            path: path.to_path_buf(),
            status: SourceStatus::Imported { rows },
        };
        info!(
            "{} import complete ({} created, {} already present).",
            kind.title(),
            report.created(),
            report.already_existed()
        );
        Ok(report)
    }

    fn skipped(kind: EntityKind, path: &Path, reason: String) -> SourceReport {
        SourceReport {
            kind,
            path: path.to_path_buf(),
            status: SourceStatus::Skipped { reason },
        }
    }

    /// Parse every row of a source, rejecting it as a whole on any shape problem.
    fn read_records<E: CatalogEntity, R: Read>(&self, input: R, path: &Path) -> Result<Vec<E>, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(csv::Trim::None)
            .from_reader(input);

        let check = check_headers(reader.headers()?.iter(), E::COLUMNS);
        if !check.is_valid() {
            return Err(CatalogError::MalformedSource {
                path: path.to_path_buf(),
                missing: check.missing,
            });
        }
        if !check.extra.is_empty() {
            warn!(
                "{}: ignoring unrecognised columns {:?}",
                path.display(),
                check.extra
            );
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<E>().enumerate() {
            let record = row?;
            if is_blank_key(record.key()) {
                return Err(CatalogError::MissingKey {
                    path: path.to_path_buf(),
                    row: index + 1,
                    column: E::KEY_COLUMN,
                });
            }
            records.push(record);
        }
        Ok(records)
    }

    /// The create-or-skip decision for one row.
    fn reconcile<E: CatalogEntity>(&self, record: &E) -> Result<RowReport, CatalogError> {
        for (spec, len) in oversized_fields(record) {
            warn!(
                "{} '{}': {} is {} characters (max {}), storing as-is",
                E::KIND.title(),
                escape_log(record.key()),
                spec.column,
                len,
                spec.max_len
            );
        }

        let outcome = if self.store.insert_if_absent(record)? {
            info!("  + Created {}: {}", E::KIND.title(), escape_log(record.key()));
            RowOutcome::Created
        } else {
            debug!("{} '{}' already present", E::KIND, escape_log(record.key()));
            RowOutcome::AlreadyExisted
        };

        Ok(RowReport {
            key: record.key().to_string(),
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::storage::CatalogStoreBuilder;
    use std::fs;
    use tempfile::TempDir;

    const MONSTER_HEADER: &str = "MonsterImg,MonsterName,MonsterHealth,MonsterDamage,MonsterHPRegen,MonsterArmour,MonsterSpeed,Class,MonsterType";

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).expect("write source");
        path
    }

    #[test]
    fn lemurian_is_stored_as_text() {
        let dir = TempDir::new().expect("tempdir");
        let store = CatalogStoreBuilder::new(dir.path().join("db")).open().expect("store");
        let path = write(
            &dir,
            "monsters.csv",
            &format!("{}\nlemurian.png,Lemurian,300,12,0,20,6 m/s,Melee,Normal\n", MONSTER_HEADER),
        );

        let report = Importer::new(&store)
            .import_source::<Monster>(&path)
            .expect("import");
        assert_eq!(report.created(), 1);
        assert_eq!(report.created_keys(), vec!["Lemurian"]);

        let lemurian: Monster = store.get("Lemurian").expect("stored");
        assert_eq!(lemurian.health, "300");
        assert_eq!(lemurian.speed, "6 m/s");
        assert_eq!(store.count(EntityKind::Monster), 1);
    }

    #[test]
    fn duplicate_key_within_source_keeps_first_row() {
        let dir = TempDir::new().expect("tempdir");
        let store = CatalogStoreBuilder::new(dir.path().join("db")).open().expect("store");
        let path = write(
            &dir,
            "monsters.csv",
            &format!(
                "{}\n,Beetle,80,12,0,0,6,Melee,Normal\n,Beetle,999,99,9,9,9,Melee,Elite\n",
                MONSTER_HEADER
            ),
        );

        let report = Importer::new(&store)
            .import_source::<Monster>(&path)
            .expect("import");
        assert_eq!(report.created(), 1);
        assert_eq!(report.already_existed(), 1);
        let beetle: Monster = store.get("Beetle").expect("stored");
        assert_eq!(beetle.health, "80");
        assert_eq!(beetle.image, "");
    }

    #[test]
    fn missing_column_rejects_source_without_writes() {
        let dir = TempDir::new().expect("tempdir");
        let store = CatalogStoreBuilder::new(dir.path().join("db")).open().expect("store");
        let path = write(
            &dir,
            "monsters.csv",
            "MonsterImg,MonsterName,MonsterHealth\nx.png,Wisp,35\n",
        );

        let err = Importer::new(&store)
            .import_source::<Monster>(&path)
            .expect_err("malformed");
        match err {
            CatalogError::MalformedSource { missing, .. } => {
                assert!(missing.contains(&"MonsterDamage".to_string()));
                assert!(missing.contains(&"MonsterType".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.count(EntityKind::Monster), 0);
    }

    #[test]
    fn blank_key_rejects_source_without_writes() {
        let dir = TempDir::new().expect("tempdir");
        let store = CatalogStoreBuilder::new(dir.path().join("db")).open().expect("store");
        let path = write(
            &dir,
            "monsters.csv",
            &format!("{}\n,Wisp,35,3,0,0,7,Ranged,Normal\n,  ,1,1,1,1,1,Melee,Normal\n", MONSTER_HEADER),
        );

        let err = Importer::new(&store)
            .import_source::<Monster>(&path)
            .expect_err("blank key");
        assert!(matches!(err, CatalogError::MissingKey { row: 2, column: "MonsterName", .. }));
        assert_eq!(store.count(EntityKind::Monster), 0);
    }

    #[test]
    fn short_row_is_a_csv_error() {
        let dir = TempDir::new().expect("tempdir");
        let store = CatalogStoreBuilder::new(dir.path().join("db")).open().expect("store");
        let path = write(&dir, "monsters.csv", &format!("{}\n,Wisp,35\n", MONSTER_HEADER));

        let err = Importer::new(&store)
            .import_source::<Monster>(&path)
            .expect_err("short row");
        assert!(matches!(err, CatalogError::Csv(_)));
    }

    #[test]
    fn tab_delimited_source() {
        let dir = TempDir::new().expect("tempdir");
        let store = CatalogStoreBuilder::new(dir.path().join("db")).open().expect("store");
        let header = MONSTER_HEADER.replace(',', "\t");
        let path = write(
            &dir,
            "monsters.tsv",
            &format!("{}\nimg\tStone Golem\t480\t20\t0\t20\t5 m/s\tRanged\tNormal\n", header),
        );

        let report = Importer::new(&store)
            .with_delimiter(b'\t')
            .import_source::<Monster>(&path)
            .expect("import");
        assert_eq!(report.created_keys(), vec!["Stone Golem"]);
    }

    #[test]
    fn directory_source_is_skipped() {
        let dir = TempDir::new().expect("tempdir");
        let store = CatalogStoreBuilder::new(dir.path().join("db")).open().expect("store");
        let subdir = dir.path().join("monsters");
        fs::create_dir(&subdir).expect("mkdir");
        let report = Importer::new(&store)
            .import_source::<Monster>(&subdir)
            .expect("skip is not an error");
        assert_eq!(
            report.status,
            SourceStatus::Skipped {
                reason: "not a regular file".into()
            }
        );
    }

    #[test]
    fn extra_columns_are_not_parsed() {
        let dir = TempDir::new().expect("tempdir");
        let store = CatalogStoreBuilder::new(dir.path().join("db")).open().expect("store");
        let path = write(
            &dir,
            "monsters.csv",
            &format!(
                "{},schema_version,Notes\nwisp.png,Lesser Wisp,35,3.5,0,0,7 m/s,Ranged,Normal,v2,floaty\n",
                MONSTER_HEADER
            ),
        );

        let report = Importer::new(&store)
            .import_source::<Monster>(&path)
            .expect("extra columns are ignored");
        assert_eq!(report.created_keys(), vec!["Lesser Wisp"]);
        let wisp: Monster = store.get("Lesser Wisp").expect("stored");
        assert_eq!(wisp.monster_type, "Normal");
    }

    #[test]
    fn missing_file_is_skipped() {
        let dir = TempDir::new().expect("tempdir");
        let store = CatalogStoreBuilder::new(dir.path().join("db")).open().expect("store");
        let report = Importer::new(&store)
            .import_source::<Item>(&dir.path().join("nope.csv"))
            .expect("skip is not an error");
        assert!(report.is_skipped());
        assert_eq!(report.created(), 0);
        assert_eq!(store.count(EntityKind::Item), 0);
    }
}

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_STAGES, SLOT_COUNT};

fn default_stage() -> u32 {
    1
}

fn default_unlocked() -> BTreeSet<u32> {
    BTreeSet::from([1])
}

/// Progress stored in one slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    #[serde(default = "default_stage")]
    pub stage: u32,
    /// Stages the slot may jump straight to
    #[serde(default = "default_unlocked")]
    pub unlocked: BTreeSet<u32>,
    /// Seconds since the Unix epoch
    #[serde(default)]
    pub timestamp: f64,
}

impl SaveRecord {
    /// Record for reaching `stage`: everything up to the next stage is unlocked
    pub fn for_stage(stage: u32, timestamp: f64) -> Self {
        let top = (stage + 1).min(MAX_STAGES);
        Self {
            stage,
            unlocked: (1..=top).collect(),
            timestamp,
        }
    }
}

/// Summary of one slot as shown in the slot menu
#[derive(Debug, Clone, PartialEq)]
pub struct SlotInfo {
    /// 1-based slot index
    pub index: usize,
    pub exists: bool,
    pub stage: Option<u32>,
    pub unlocked: BTreeSet<u32>,
    pub timestamp: Option<f64>,
}

impl SlotInfo {
    fn empty(index: usize) -> Self {
        Self {
            index,
            exists: false,
            stage: None,
            unlocked: default_unlocked(),
            timestamp: None,
        }
    }
}

/// Directory of slot files
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: usize) -> PathBuf {
        self.dir.join(format!("save_slot{}.json", slot))
    }

    fn check_slot(slot: usize) -> io::Result<()> {
        if (1..=SLOT_COUNT).contains(&slot) {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("slot {} out of range 1..={}", slot, SLOT_COUNT),
            ))
        }
    }

    /// Read a slot. Absent, unreadable, malformed and empty (`{}`) files all
    /// read as `None`.
    pub fn read(&self, slot: usize) -> Option<SaveRecord> {
        Self::check_slot(slot).ok()?;
        let path = self.slot_path(slot);
        let json = fs::read_to_string(&path).ok()?;
        let value: serde_json::Value = match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("Ignoring malformed {}: {}", path.display(), e);
                return None;
            }
        };
        if value.as_object().is_some_and(|fields| fields.is_empty()) {
            log::debug!("Ignoring empty {}", path.display());
            return None;
        }
        match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::debug!("Ignoring malformed {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Write a slot, creating the save directory if needed
    pub fn write(&self, slot: usize, record: &SaveRecord) -> io::Result<()> {
        Self::check_slot(slot)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(record)?;
        fs::write(self.slot_path(slot), json)
    }

    /// Every slot in index order
    pub fn list_slots(&self) -> Vec<SlotInfo> {
        (1..=SLOT_COUNT)
            .map(|index| match self.read(index) {
                Some(record) => SlotInfo {
                    index,
                    exists: true,
                    stage: Some(record.stage),
                    unlocked: record.unlocked,
                    timestamp: Some(record.timestamp),
                },
                None => SlotInfo::empty(index),
            })
            .collect()
    }

    /// Slot with the strictly greatest positive timestamp. Ties keep the
    /// lower index.
    pub fn most_recent_slot_index(&self) -> Option<usize> {
        let mut recent = None;
        let mut recent_ts = 0.0;
        for slot in self.list_slots() {
            let Some(ts) = slot.timestamp.filter(|_| slot.exists) else {
                continue;
            };
            if ts > recent_ts {
                recent_ts = ts;
                recent = Some(slot.index);
            }
        }
        recent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (SaveStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::new(dir.path().join("saves"));
        (store, dir)
    }

    #[test]
    fn write_then_read() {
        let (store, _dir) = test_store();
        let record = SaveRecord::for_stage(3, 1234.5);
        store.write(2, &record).unwrap();

        let loaded = store.read(2).unwrap();
        assert_eq!(loaded.stage, 3);
        assert_eq!(loaded.unlocked, BTreeSet::from([1, 2, 3, 4]));
        assert_eq!(loaded, record);
    }

    #[test]
    fn for_stage_caps_unlocked() {
        let record = SaveRecord::for_stage(MAX_STAGES, 0.0);
        assert_eq!(record.unlocked.len(), MAX_STAGES as usize);
        assert_eq!(record.unlocked.last(), Some(&MAX_STAGES));
    }

    #[test]
    fn missing_and_malformed_read_as_empty() {
        let (store, _dir) = test_store();
        assert!(store.read(1).is_none());

        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.slot_path(1), "{\"stage\": ").unwrap();
        assert!(store.read(1).is_none());

        let slots = store.list_slots();
        assert_eq!(slots.len(), SLOT_COUNT);
        assert!(!slots[0].exists);
        assert_eq!(slots[0].stage, None);
        assert_eq!(slots[0].unlocked, BTreeSet::from([1]));
        assert_eq!(slots[0].timestamp, None);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let (store, _dir) = test_store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.slot_path(3), r#"{"unlocked": [2, 1, 2]}"#).unwrap();

        let record = store.read(3).unwrap();
        assert_eq!(record.stage, 1);
        assert_eq!(record.unlocked, BTreeSet::from([1, 2]));
        assert_eq!(record.timestamp, 0.0);
    }

    #[test]
    fn empty_object_reads_as_empty_slot() {
        let (store, _dir) = test_store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.slot_path(2), "{}").unwrap();

        assert!(store.read(2).is_none());
        let slots = store.list_slots();
        assert!(!slots[1].exists);
        assert_eq!(slots[1].stage, None);
        assert_eq!(store.most_recent_slot_index(), None);
    }

    #[test]
    fn out_of_range_slot_rejected() {
        let (store, _dir) = test_store();
        let record = SaveRecord::for_stage(1, 1.0);
        assert!(store.write(0, &record).is_err());
        assert!(store.write(SLOT_COUNT + 1, &record).is_err());
        assert!(store.read(0).is_none());
    }

    #[test]
    fn most_recent_picks_greatest_timestamp() {
        let (store, _dir) = test_store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(
            store.slot_path(2),
            r#"{"stage":3,"unlocked":[1,2,3],"timestamp":1000.0}"#,
        )
        .unwrap();
        fs::write(
            store.slot_path(3),
            r#"{"stage":1,"unlocked":[1],"timestamp":500.0}"#,
        )
        .unwrap();
        assert_eq!(store.most_recent_slot_index(), Some(2));
    }

    #[test]
    fn most_recent_ignores_zero_timestamps() {
        let (store, _dir) = test_store();
        assert_eq!(store.most_recent_slot_index(), None);

        store.write(1, &SaveRecord::for_stage(2, 0.0)).unwrap();
        assert_eq!(store.most_recent_slot_index(), None);

        store.write(3, &SaveRecord::for_stage(2, 10.0)).unwrap();
        store.write(2, &SaveRecord::for_stage(2, 10.0)).unwrap();
        assert_eq!(store.most_recent_slot_index(), Some(2));
    }
}

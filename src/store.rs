// src/store.rs
//
// Local persistence. A small key-value layer (`KeyValueStore`) with change
// notification, and `RecordStore` on top of it, which owns the one stored
// blob (`PersistedState`) and merges extractions into it.
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, MutexGuard, Weak,
        atomic::{AtomicU64, Ordering},
    },
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    config::consts::{STORAGE_KEY, STORE_DIR, STORE_FILE},
    error::{Error, Result},
    model::{
        Activity, Category, Contact, Deal, Lead, PersistedState, Record,
        Timestamp, now_ms,
    },
};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/* ---------------- Change notification ---------------- */

/// One key's transition. `None` = absent.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageChange {
    pub key: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

type Listener = Arc<dyn Fn(&StorageChange) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: AtomicU64,
    list: Mutex<Vec<(u64, Listener)>>,
}

impl Listeners {
    fn add(self: &Arc<Self>, f: Listener) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.list).push((id, f));
        Subscription { id, hub: Arc::downgrade(self) }
    }

    fn notify(&self, change: &StorageChange) {
        // Snapshot so a listener may (un)subscribe while being called.
        let current: Vec<Listener> = lock(&self.list).iter().map(|(_, f)| f.clone()).collect();
        for f in current {
            f(change);
        }
    }

    fn len(&self) -> usize {
        lock(&self.list).len()
    }
}

/// Live registration; dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    hub: Weak<Listeners>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            lock(&hub.list).retain(|(id, _)| *id != self.id);
        }
    }
}

/* ---------------- Key-value layer ---------------- */

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn on_change(&self, f: Box<dyn Fn(&StorageChange) + Send + Sync>) -> Subscription;
}

/// Process-local store. Used by tests and `--dry-run`.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<Map<String, Value>>,
    listeners: Arc<Listeners>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(lock(&self.map).get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let old_value = lock(&self.map).insert(s!(key), value.clone());
        self.listeners.notify(&StorageChange { key: s!(key), old_value, new_value: Some(value) });
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let old_value = lock(&self.map).remove(key);
        if old_value.is_some() {
            self.listeners.notify(&StorageChange { key: s!(key), old_value, new_value: None });
        }
        Ok(())
    }

    fn on_change(&self, f: Box<dyn Fn(&StorageChange) + Send + Sync>) -> Subscription {
        self.listeners.add(Arc::from(f))
    }
}

/// One JSON object on disk, rewritten whole on every change.
pub struct FileStore {
    path: PathBuf,
    io: Mutex<()>,
    listeners: Arc<Listeners>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), io: Mutex::new(()), listeners: Arc::default() }
    }

    /// `.store/storage.json` under the working directory.
    pub fn default_location() -> Self {
        Self::open(Path::new(STORE_DIR).join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            _ => {
                loge!("Store: {} is not a JSON object, starting empty", self.path.display());
                Ok(Map::new())
            }
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let _io = lock(&self.io);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let old_value = {
            let _io = lock(&self.io);
            let mut map = self.read_all()?;
            let old = map.insert(s!(key), value.clone());
            self.write_all(&map)?;
            old
        };
        self.listeners.notify(&StorageChange { key: s!(key), old_value, new_value: Some(value) });
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let old_value = {
            let _io = lock(&self.io);
            let mut map = self.read_all()?;
            let old = map.remove(key);
            if old.is_some() {
                self.write_all(&map)?;
            }
            old
        };
        if old_value.is_some() {
            self.listeners.notify(&StorageChange { key: s!(key), old_value, new_value: None });
        }
        Ok(())
    }

    fn on_change(&self, f: Box<dyn Fn(&StorageChange) + Send + Sync>) -> Subscription {
        self.listeners.add(Arc::from(f))
    }
}

/* ---------------- Reconciliation ---------------- */

/// Per-category merge result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStats {
    /// Size of the category after the merge.
    pub total: usize,
    /// Records offered by the incoming batch.
    pub new_records: usize,
}

/// Only categories that were actually merged appear.
pub type MergeReport = std::collections::BTreeMap<Category, MergeStats>;

/// Overlay `incoming` onto `existing` by id. A replaced id keeps its original
/// position; new ids append in incoming order. Entries without an id are dropped.
pub fn dedup_merge<R: Record>(existing: Vec<R>, incoming: &[R]) -> Vec<R> {
    let mut out: Vec<R> = Vec::with_capacity(existing.len() + incoming.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in existing.into_iter().chain(incoming.iter().cloned()) {
        if record.id().is_empty() {
            continue;
        }
        match index.get(record.id()) {
            Some(&pos) => out[pos] = record,
            None => {
                index.insert(s!(record.id()), out.len());
                out.push(record);
            }
        }
    }
    out
}

/// Records of a loosely-shaped list. Items that are not objects, lack an id,
/// or do not fit the record shape are skipped.
fn parse_items<R: Record>(items: &[Value]) -> Vec<R> {
    items
        .iter()
        .filter(|v| v.get("id").and_then(Value::as_str).is_some_and(|id| !id.is_empty()))
        .filter_map(|v| match serde_json::from_value::<R>(v.clone()) {
            Ok(r) => Some(r),
            Err(e) => {
                logd!("Store: skipping malformed {} item: {}", R::CATEGORY, e);
                None
            }
        })
        .collect()
}

/// Owner of the persisted state. Every mutation is a full read-modify-write
/// of the root key, serialized within the process.
pub struct RecordStore<S: KeyValueStore> {
    kv: S,
    key: String,
    write: Mutex<()>,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, STORAGE_KEY)
    }

    pub fn with_key(kv: S, key: &str) -> Self {
        Self { kv, key: s!(key), write: Mutex::new(()) }
    }

    pub fn backend(&self) -> &S {
        &self.kv
    }

    fn save(&self, state: &PersistedState) -> Result<()> {
        self.kv.set(&self.key, serde_json::to_value(state)?)
    }

    /// Write the empty state if nothing is stored yet; return what is stored.
    pub fn initialize(&self) -> Result<PersistedState> {
        if let Some(v) = self.kv.get(&self.key)? {
            return Ok(serde_json::from_value(v)?);
        }
        let state = PersistedState::default();
        self.save(&state)?;
        logf!("Store: initialized");
        Ok(state)
    }

    pub fn load(&self) -> Result<PersistedState> {
        match self.kv.get(&self.key)? {
            Some(v) => Ok(serde_json::from_value(v)?),
            None => self.initialize(),
        }
    }

    pub fn records<R: Record>(&self) -> Result<Vec<R>> {
        Ok(R::list(&self.load()?.data).clone())
    }

    fn merge_list<R: Record>(state: &mut PersistedState, incoming: &[R], now: Timestamp, report: &mut MergeReport) {
        let list = R::list_mut(&mut state.data);
        *list = dedup_merge(std::mem::take(list), incoming);
        state.last_sync.set(R::CATEGORY, Some(now));
        report.insert(R::CATEGORY, MergeStats { total: list.len(), new_records: incoming.len() });
    }

    /// Merge a loosely-shaped save request.
    ///
    /// `board_type == "mixed"`: `data` is an object keyed by category; absent or
    /// non-list categories are left untouched (no sync stamp).
    /// Otherwise `board_type` names one category and `data` must be a list.
    pub fn merge_payload(&self, board_type: &str, data: &Value) -> Result<MergeReport> {
        let _w = lock(&self.write);
        let mut state = self.load()?;
        let now = now_ms();
        let mut report = MergeReport::new();

        if board_type.eq_ignore_ascii_case("mixed") {
            let Some(obj) = data.as_object() else {
                return Err(Error::MalformedSavePayload { board_type: s!(board_type) });
            };
            for cat in Category::ALL {
                match obj.get(cat.key()) {
                    Some(Value::Array(items)) => Self::merge_items(&mut state, cat, items, now, &mut report),
                    Some(_) => logd!("Store: {} is not a list, left untouched", cat),
                    None => {}
                }
            }
        } else {
            let cat = Category::from_key(board_type)
                .ok_or_else(|| Error::UnknownBoardType(s!(board_type)))?;
            let Some(items) = data.as_array() else {
                return Err(Error::MalformedSavePayload { board_type: s!(board_type) });
            };
            Self::merge_items(&mut state, cat, items, now, &mut report);
        }

        self.save(&state)?;
        logf!("Store: merged {} payload into {} categories", board_type, report.len());
        Ok(report)
    }

    fn merge_items(state: &mut PersistedState, cat: Category, items: &[Value], now: Timestamp, report: &mut MergeReport) {
        match cat {
            Category::Contacts => Self::merge_list(state, &parse_items::<Contact>(items), now, report),
            Category::Deals => Self::merge_list(state, &parse_items::<Deal>(items), now, report),
            Category::Leads => Self::merge_list(state, &parse_items::<Lead>(items), now, report),
            Category::Activities => Self::merge_list(state, &parse_items::<Activity>(items), now, report),
        }
        // Offered count includes items we could not keep.
        if let Some(stats) = report.get_mut(&cat) {
            stats.new_records = items.len();
        }
    }

    /// Remove one record; `false` when the id was not present.
    pub fn delete_record(&self, cat: Category, id: &str) -> Result<bool> {
        let _w = lock(&self.write);
        let mut state = self.load()?;
        let removed = match cat {
            Category::Contacts => retain_not(&mut state.data.contacts, id),
            Category::Deals => retain_not(&mut state.data.deals, id),
            Category::Leads => retain_not(&mut state.data.leads, id),
            Category::Activities => retain_not(&mut state.data.activities, id),
        };
        if removed {
            self.save(&state)?;
            logf!("Store: deleted {} {}", cat, id);
        }
        Ok(removed)
    }

    /// Empty one category and reset its sync time.
    pub fn clear_category(&self, cat: Category) -> Result<()> {
        let _w = lock(&self.write);
        let mut state = self.load()?;
        match cat {
            Category::Contacts => state.data.contacts.clear(),
            Category::Deals => state.data.deals.clear(),
            Category::Leads => state.data.leads.clear(),
            Category::Activities => state.data.activities.clear(),
        }
        state.last_sync.set(cat, None);
        self.save(&state)?;
        logf!("Store: cleared {}", cat);
        Ok(())
    }

    /// Drop the root key and start over.
    pub fn clear_all(&self) -> Result<PersistedState> {
        let _w = lock(&self.write);
        self.kv.remove(&self.key)?;
        logf!("Store: cleared all");
        self.initialize()
    }

    /// Called with the new state after every write of the root key.
    pub fn subscribe<F>(&self, f: F) -> Subscription
    where
        F: Fn(&PersistedState) + Send + Sync + 'static,
    {
        let key = self.key.clone();
        self.kv.on_change(Box::new(move |change| {
            if change.key != key {
                return;
            }
            let state = match &change.new_value {
                Some(v) => serde_json::from_value(v.clone()).unwrap_or_default(),
                None => PersistedState::default(),
            };
            f(&state);
        }))
    }
}

fn retain_not<R: Record>(list: &mut Vec<R>, id: &str) -> bool {
    let before = list.len();
    list.retain(|r| r.id() != id);
    list.len() != before
}

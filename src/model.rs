// src/model.rs
//
// Record shapes, the four-way partition produced by one extraction, and the
// persisted state the store owns. Field names serialize in camelCase so the
// stored blob and JSON exports share one shape.
use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Epoch milliseconds.
pub type Timestamp = i64;

pub fn now_ms() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

/// Persisted collection key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Contacts,
    Deals,
    Leads,
    Activities,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Contacts,
        Category::Deals,
        Category::Leads,
        Category::Activities,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Contacts => "contacts",
            Category::Deals => "deals",
            Category::Leads => "leads",
            Category::Activities => "activities",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Contacts => "Contacts",
            Category::Deals => "Deals",
            Category::Leads => "Leads",
            Category::Activities => "Activities",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        let key = key.trim().to_ascii_lowercase();
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Short badge text: the key's initial, upper-cased.
    pub fn badge(self) -> String {
        self.key()[..1].to_ascii_uppercase()
    }

    pub fn kind(self) -> RecordKind {
        match self {
            Category::Contacts => RecordKind::Contact,
            Category::Deals => RecordKind::Deal,
            Category::Leads => RecordKind::Lead,
            Category::Activities => RecordKind::Activity,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Inferred type of a single row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Contact,
    Deal,
    Lead,
    Activity,
}

impl RecordKind {
    pub fn category(self) -> Category {
        match self {
            RecordKind::Contact => Category::Contacts,
            RecordKind::Deal => Category::Deals,
            RecordKind::Lead => Category::Leads,
            RecordKind::Activity => Category::Activities,
        }
    }
}

/// Content-derived id: parts lower-cased, trimmed and joined with `-`.
/// Re-extracting the same row yields the same id, so merges replace.
pub fn stable_id(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Shared capability of the four record shapes.
pub trait Record: Clone + Serialize + DeserializeOwned {
    const CATEGORY: Category;

    fn id(&self) -> &str;

    /// Primary label (name or subject). Records without one are never kept.
    fn label(&self) -> &str;

    fn extracted_at(&self) -> Timestamp;

    /// Recompute `id` from content.
    fn assign_id(&mut self);

    fn list(p: &BoardPartition) -> &Vec<Self>;
    fn list_mut(p: &mut BoardPartition) -> &mut Vec<Self>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub account: String,
    pub title: String,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub extracted_at: Timestamp,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub stage: String,
    pub group: String,
    pub probability: String,
    pub close_date: String,
    pub owner: String,
    pub contact: String,
    pub extracted_at: Timestamp,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub company: String,
    pub status: String,
    pub email: String,
    pub phone: String,
    pub owner: String,
    pub extracted_at: Timestamp,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub subject: String,
    pub date: String,
    pub linked_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub extracted_at: Timestamp,
}

impl Record for Contact {
    const CATEGORY: Category = Category::Contacts;
    fn id(&self) -> &str { &self.id }
    fn label(&self) -> &str { &self.name }
    fn extracted_at(&self) -> Timestamp { self.extracted_at }
    fn assign_id(&mut self) { self.id = stable_id(&[&self.name, &self.email]); }
    fn list(p: &BoardPartition) -> &Vec<Self> { &p.contacts }
    fn list_mut(p: &mut BoardPartition) -> &mut Vec<Self> { &mut p.contacts }
}

impl Record for Deal {
    const CATEGORY: Category = Category::Deals;
    fn id(&self) -> &str { &self.id }
    fn label(&self) -> &str { &self.name }
    fn extracted_at(&self) -> Timestamp { self.extracted_at }
    fn assign_id(&mut self) { self.id = stable_id(&[&self.name, &self.contact]); }
    fn list(p: &BoardPartition) -> &Vec<Self> { &p.deals }
    fn list_mut(p: &mut BoardPartition) -> &mut Vec<Self> { &mut p.deals }
}

impl Record for Lead {
    const CATEGORY: Category = Category::Leads;
    fn id(&self) -> &str { &self.id }
    fn label(&self) -> &str { &self.name }
    fn extracted_at(&self) -> Timestamp { self.extracted_at }
    fn assign_id(&mut self) { self.id = stable_id(&[&self.name, &self.email]); }
    fn list(p: &BoardPartition) -> &Vec<Self> { &p.leads }
    fn list_mut(p: &mut BoardPartition) -> &mut Vec<Self> { &mut p.leads }
}

impl Record for Activity {
    const CATEGORY: Category = Category::Activities;
    fn id(&self) -> &str { &self.id }
    // Subject, or the activity type when the subject is blank.
    fn label(&self) -> &str {
        if self.subject.trim().is_empty() { &self.kind } else { &self.subject }
    }
    fn extracted_at(&self) -> Timestamp { self.extracted_at }
    fn assign_id(&mut self) { self.id = stable_id(&[&self.subject, &self.date]); }
    fn list(p: &BoardPartition) -> &Vec<Self> { &p.activities }
    fn list_mut(p: &mut BoardPartition) -> &mut Vec<Self> { &mut p.activities }
}

/// One built record of any shape.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyRecord {
    Contact(Contact),
    Deal(Deal),
    Lead(Lead),
    Activity(Activity),
}

impl AnyRecord {
    pub fn category(&self) -> Category {
        match self {
            AnyRecord::Contact(_) => Category::Contacts,
            AnyRecord::Deal(_) => Category::Deals,
            AnyRecord::Lead(_) => Category::Leads,
            AnyRecord::Activity(_) => Category::Activities,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AnyRecord::Contact(r) => r.label(),
            AnyRecord::Deal(r) => r.label(),
            AnyRecord::Lead(r) => r.label(),
            AnyRecord::Activity(r) => r.label(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AnyRecord::Contact(r) => r.id(),
            AnyRecord::Deal(r) => r.id(),
            AnyRecord::Lead(r) => r.id(),
            AnyRecord::Activity(r) => r.id(),
        }
    }
}

/// Records from one extraction pass, grouped by category.
/// Order inside each list is extraction order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardPartition {
    pub contacts: Vec<Contact>,
    pub deals: Vec<Deal>,
    pub leads: Vec<Lead>,
    pub activities: Vec<Activity>,
}

impl BoardPartition {
    /// Append to the matching list. Records with an empty label are dropped;
    /// returns whether the record was kept.
    pub fn push(&mut self, record: AnyRecord) -> bool {
        if record.label().trim().is_empty() {
            return false;
        }
        match record {
            AnyRecord::Contact(r) => self.contacts.push(r),
            AnyRecord::Deal(r) => self.deals.push(r),
            AnyRecord::Lead(r) => self.leads.push(r),
            AnyRecord::Activity(r) => self.activities.push(r),
        }
        true
    }

    pub fn count(&self, cat: Category) -> usize {
        match cat {
            Category::Contacts => self.contacts.len(),
            Category::Deals => self.deals.len(),
            Category::Leads => self.leads.len(),
            Category::Activities => self.activities.len(),
        }
    }

    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.count(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// "Extracted 5 records (2 contacts, 1 deals, 1 leads, 1 activities)"
    pub fn summary(&self) -> String {
        format!(
            "Extracted {} records ({} contacts, {} deals, {} leads, {} activities)",
            self.total(),
            self.contacts.len(),
            self.deals.len(),
            self.leads.len(),
            self.activities.len(),
        )
    }
}

/// Last successful merge per category; `None` = never synced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncTimes {
    pub contacts: Option<Timestamp>,
    pub deals: Option<Timestamp>,
    pub leads: Option<Timestamp>,
    pub activities: Option<Timestamp>,
}

impl SyncTimes {
    pub fn get(&self, cat: Category) -> Option<Timestamp> {
        match cat {
            Category::Contacts => self.contacts,
            Category::Deals => self.deals,
            Category::Leads => self.leads,
            Category::Activities => self.activities,
        }
    }

    pub fn set(&mut self, cat: Category, at: Option<Timestamp>) {
        let slot = match cat {
            Category::Contacts => &mut self.contacts,
            Category::Deals => &mut self.deals,
            Category::Leads => &mut self.leads,
            Category::Activities => &mut self.activities,
        };
        *slot = at;
    }
}

/// The single stored blob.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(flatten)]
    pub data: BoardPartition,
    pub last_sync: SyncTimes,
}

impl PersistedState {
    pub fn count(&self, cat: Category) -> usize {
        self.data.count(cat)
    }

    pub fn total(&self) -> usize {
        self.data.total()
    }
}

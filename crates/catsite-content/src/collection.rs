/// One handler for all three content types.
///
/// A [`Collection`] pairs the gateway client with a [`ContentKind`]; the kind
/// supplies the route and field names, so cats, food and toys share the
/// same fetch, sort, enumerate and lookup code.
use std::collections::HashMap;

use tracing::debug;

use crate::collation::TitleCollator;
use crate::gateway::{Fetched, GatewayClient};
use crate::model::{CollectionRecord, ContentKind, NormalizedSummary, StaticPath};

pub struct Collection<'a> {
    client: &'a GatewayClient,
    kind: ContentKind,
}

impl<'a> Collection<'a> {
    pub fn new(client: &'a GatewayClient, kind: ContentKind) -> Self {
        Self { client, kind }
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub async fn fetch(&self) -> Fetched<CollectionRecord> {
        self.client.fetch_records(self.kind).await
    }

    /// Every record as `{id, title, date}`, ordered by title.
    pub async fn sorted_summaries(&self) -> Vec<NormalizedSummary> {
        let records = self.fetch().await.into_records();
        sort_and_project(self.kind, &records)
    }

    /// Route keys for static path pre-generation, in gateway order.
    pub async fn static_paths(&self) -> Vec<StaticPath> {
        let records = self.fetch().await.into_records();
        static_paths(&records)
    }

    /// The raw record whose stringified id equals `id`, unmodified.
    pub async fn record(&self, id: &str) -> Option<CollectionRecord> {
        let records = self.fetch().await.into_records();
        let found = find_record(records, id);
        if found.is_none() {
            debug!(kind = %self.kind, id, "record not found");
        }
        found
    }

    /// Fetch once and index by id, for callers doing many lookups.
    pub async fn index(&self) -> CollectionIndex {
        CollectionIndex::from_records(self.fetch().await.into_records())
    }
}

/// Project records to summaries, sorted by the kind's title field.
///
/// The sort is stable, so records with equal titles keep gateway order.
/// A record without the title field gets an empty title.
pub fn sort_and_project(kind: ContentKind, records: &[CollectionRecord]) -> Vec<NormalizedSummary> {
    let mut summaries: Vec<NormalizedSummary> = records
        .iter()
        .map(|record| project(kind, record))
        .collect();
    let mut collator = TitleCollator::new();
    summaries.sort_by(|a, b| collator.compare(&a.title, &b.title));
    summaries
}

pub fn project(kind: ContentKind, record: &CollectionRecord) -> NormalizedSummary {
    NormalizedSummary {
        id: record.id_key(),
        title: record
            .field_str(kind.title_field())
            .unwrap_or_default()
            .to_string(),
        date: record.date.clone(),
    }
}

pub fn static_paths(records: &[CollectionRecord]) -> Vec<StaticPath> {
    records
        .iter()
        .map(|record| StaticPath::new(record.id_key()))
        .collect()
}

/// Linear scan for the first record whose stringified id equals `id`.
pub fn find_record(records: Vec<CollectionRecord>, id: &str) -> Option<CollectionRecord> {
    records.into_iter().find(|record| record.id_key() == id)
}

/// Records keyed by stringified id. When ids repeat, the first record wins.
#[derive(Debug, Default)]
pub struct CollectionIndex {
    by_id: HashMap<String, CollectionRecord>,
}

impl CollectionIndex {
    pub fn from_records(records: Vec<CollectionRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            by_id.entry(record.id_key()).or_insert(record);
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&CollectionRecord> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

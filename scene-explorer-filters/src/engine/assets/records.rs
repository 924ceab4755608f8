use bevy::asset::{AssetLoader, LoadContext, io::Reader};
use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// A single row of the partner records table.
///
/// `targets` holds every scene path the row names; the `path` column may list
/// several, separated by `;` or `,`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRecord {
    pub name: String,
    pub targets: Vec<String>,
    pub category: String,
    pub kind: String,
    pub contact: String,
}

/// All usable records from the CSV, in file order, keyed by display name.
/// Derives both `Asset` and `Resource`: the loaded asset is cloned into a
/// resource once ready so systems (and tests) read it without the asset store.
#[derive(Asset, TypePath, Resource, Debug, Clone, Default)]
pub struct FilterRegistry {
    records: Vec<FilterRecord>,
    by_name: HashMap<String, usize>,
}

impl FilterRegistry {
    pub fn from_records(records: impl IntoIterator<Item = FilterRecord>) -> Self {
        let mut registry = Self::default();
        for record in records {
            registry.push(record);
        }
        registry
    }

    /// Duplicate names replace the earlier row in place.
    fn push(&mut self, record: FilterRecord) {
        match self.by_name.get(&record.name) {
            Some(&idx) => self.records[idx] = record,
            None => {
                self.by_name.insert(record.name.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FilterRecord> {
        self.by_name.get(name).map(|&idx| &self.records[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records grouped by category, categories in first-appearance order.
    pub fn grouped_by_category(&self) -> Vec<(&str, Vec<&FilterRecord>)> {
        let mut groups: Vec<(&str, Vec<&FilterRecord>)> = Vec::new();
        for record in &self.records {
            match groups.iter_mut().find(|(cat, _)| *cat == record.category) {
                Some((_, members)) => members.push(record),
                None => groups.push((record.category.as_str(), vec![record])),
            }
        }
        groups
    }
}

/// Raw CSV row; every column optional so short rows decode and get vetted here.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    path: String,
    #[serde(default)]
    category: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    contact: String,
}

/// Split a `path` cell into individual scene paths.
pub fn split_targets(path: &str) -> Vec<String> {
    path.split([';', ','])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

/// Parse CSV text into a registry. Rows missing a name or any usable target
/// are skipped with a warning naming the line; nothing here is fatal.
pub fn parse_records(input: &str) -> FilterRegistry {
    let mut registry = FilterRegistry::default();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input.as_bytes());

    for (idx, row) in reader.deserialize::<RawRecord>().enumerate() {
        // Header occupies line 1.
        let line = idx + 2;
        let raw = match row {
            Ok(raw) => raw,
            Err(err) => {
                warn!("skipping unreadable records row {line}: {err}");
                continue;
            }
        };

        let targets = split_targets(&raw.path);
        if raw.name.is_empty() || targets.is_empty() {
            warn!(
                "skipping incomplete records row {line}: name='{}' path='{}'",
                raw.name, raw.path
            );
            continue;
        }

        registry.push(FilterRecord {
            name: raw.name,
            targets,
            category: if raw.category.is_empty() {
                "Other".to_string()
            } else {
                raw.category
            },
            kind: raw.kind,
            contact: raw.contact,
        });
    }

    registry
}

#[derive(Debug, Error)]
pub enum RecordsLoaderError {
    #[error("could not read records file: {0}")]
    Io(#[from] std::io::Error),
    #[error("records file is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Asset loader for `.csv` partner records.
#[derive(Default)]
pub struct FilterRecordsLoader;

impl AssetLoader for FilterRecordsLoader {
    type Asset = FilterRegistry;
    type Settings = ();
    type Error = RecordsLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<FilterRegistry, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let text = std::str::from_utf8(&bytes)?;
        let registry = parse_records(text);
        info!(
            "loaded {} filter records from {}",
            registry.len(),
            load_context.path().display()
        );
        Ok(registry)
    }

    fn extensions(&self) -> &[&str] {
        &["csv"]
    }
}

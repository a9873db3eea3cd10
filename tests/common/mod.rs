#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use tokio::sync::RwLock;

use pruefung_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{ListeningSet, ReadingSet, WritingTask},
    repositories::{
        InMemoryScoreStore, ListeningSetRepository, ReadingSetRepository, WritingTaskRepository,
    },
};

/// Matches a path id the way the Mongo repositories do: numeric ids hit the
/// display id, anything else the ObjectId hex.
fn matches_id(object_id: Option<ObjectId>, display_id: i64, id: &str) -> bool {
    match id.trim().parse::<i64>() {
        Ok(number) => number == display_id,
        Err(_) => object_id.map(|oid| oid.to_hex() == id.trim()).unwrap_or(false),
    }
}

pub struct InMemoryReadingSetRepository {
    sets: Arc<RwLock<HashMap<i64, ReadingSet>>>,
}

impl InMemoryReadingSetRepository {
    pub fn new() -> Self {
        Self {
            sets: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ReadingSetRepository for InMemoryReadingSetRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ReadingSet>> {
        let sets = self.sets.read().await;
        Ok(sets
            .values()
            .find(|s| matches_id(s.object_id, s.display_id, id))
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<ReadingSet>, i64)> {
        let sets = self.sets.read().await;
        let mut items: Vec<_> = sets.values().cloned().collect();
        items.sort_by_key(|s| s.display_id);

        let total = items.len() as i64;
        let start = offset.max(0) as usize;
        let end = (start + limit.max(0) as usize).min(items.len());

        let page = if start >= items.len() {
            vec![]
        } else {
            items[start..end].to_vec()
        };

        Ok((page, total))
    }

    async fn create(&self, mut set: ReadingSet) -> AppResult<ReadingSet> {
        let mut sets = self.sets.write().await;
        if sets.contains_key(&set.display_id) {
            return Err(AppError::AlreadyExists(format!(
                "Reading set with id '{}' already exists",
                set.display_id
            )));
        }

        set.object_id.get_or_insert_with(ObjectId::new);
        sets.insert(set.display_id, set.clone());
        Ok(set)
    }

    async fn update(&self, id: &str, mut set: ReadingSet) -> AppResult<ReadingSet> {
        let mut sets = self.sets.write().await;
        let existing = sets
            .values()
            .find(|s| matches_id(s.object_id, s.display_id, id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Reading set with id '{}' not found", id)))?;

        set.object_id = existing.object_id;
        sets.remove(&existing.display_id);
        sets.insert(set.display_id, set.clone());
        Ok(set)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut sets = self.sets.write().await;
        let key = sets
            .values()
            .find(|s| matches_id(s.object_id, s.display_id, id))
            .map(|s| s.display_id)
            .ok_or_else(|| AppError::NotFound(format!("Reading set with id '{}' not found", id)))?;
        sets.remove(&key);
        Ok(())
    }
}

pub struct InMemoryListeningSetRepository {
    sets: Vec<ListeningSet>,
}

impl InMemoryListeningSetRepository {
    pub fn with(sets: Vec<ListeningSet>) -> Self {
        Self { sets }
    }
}

#[async_trait]
impl ListeningSetRepository for InMemoryListeningSetRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ListeningSet>> {
        Ok(self
            .sets
            .iter()
            .find(|s| matches_id(s.object_id, i64::MIN, id))
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<ListeningSet>> {
        Ok(self.sets.clone())
    }
}

pub struct InMemoryWritingTaskRepository {
    tasks: Vec<WritingTask>,
}

impl InMemoryWritingTaskRepository {
    pub fn with(tasks: Vec<WritingTask>) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl WritingTaskRepository for InMemoryWritingTaskRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<WritingTask>> {
        Ok(self
            .tasks
            .iter()
            .find(|t| matches_id(t.object_id, t.display_id, id))
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<WritingTask>> {
        Ok(self.tasks.clone())
    }
}

/// A reading set as it is stored, with German field names and mixed id
/// types. `teile.teil2` is a single object rather than an array.
pub fn stored_reading_set() -> ReadingSet {
    serde_json::from_value(json!({
        "id": 1,
        "thema": "Wohnen",
        "themaTr": "Living",
        "teile": {
            "teil1": [{
                "titel": "Überschriften zuordnen",
                "Überschriften": [
                    { "id": "a", "text": "Mieten steigen" },
                    { "id": "b", "text": "Neuer Park eröffnet" }
                ],
                "Texte": [
                    { "id": 1, "text": "Die Stadt hat gestern...", "antwort": "b", "fazit": "Park" },
                    { "id": 2, "text": "Wohnungen werden teurer...", "antwort": "a", "fazit": "Miete" }
                ]
            }],
            "teil2": {
                "titel": "Zeitungsartikel",
                "text": "Familie Weber zieht um.",
                "fragen": [{
                    "id": 6,
                    "text": "Warum zieht die Familie um?",
                    "options": [{ "id": "a", "text": "Mehr Platz" }, { "id": "b", "text": "Neue Arbeit" }],
                    "antwort": "a",
                    "begründung": "Die Wohnung ist zu klein."
                }],
                "fazit": "Umzug wegen Platzmangel."
            },
            "teil3": [{
                "titel": "Anzeigen",
                "situationen": [
                    { "id": 11, "text": "Sie suchen ein Zimmer." },
                    { "id": 12, "text": "Sie verkaufen ein Sofa." }
                ],
                "anzeigen": [
                    { "id": "a", "text": "WG-Zimmer frei", "antwort": "11", "fazit": "Zimmer" },
                    { "id": "b", "text": "Möbel gesucht", "antwort": 12.0, "fazit": "Sofa" }
                ]
            }]
        },
        "sprachb": {
            "teil1": [{
                "text": "Ich ___ seit Mai in Köln.",
                "fragen": [{
                    "id": 21,
                    "options": [{ "id": "a", "text": "wohne" }, { "id": "b", "text": "wohnen" }],
                    "antwort": "a",
                    "begründung": "1. Person Singular"
                }]
            }],
            "teil2": [{
                "text": "Lückentext",
                "options": [
                    { "id": "A", "text": "deshalb", "antwort": "0" },
                    { "id": "B", "text": "obwohl", "antwort": 1 }
                ]
            }]
        }
    }))
    .expect("stored reading set fixture should deserialize")
}

/// A listening set whose options carry numeric codes.
pub fn stored_listening_set(object_id: ObjectId) -> ListeningSet {
    serde_json::from_value(json!({
        "teil1": [{
            "id": 1,
            "text": "Wohin fährt Herr Klein?",
            "options": [{ "id": "a", "text": "Nach Berlin", "code": 1 }, { "id": "b", "text": "Nach Bonn", "code": 2 }],
            "antwort": 2,
            "begründung": "Er sagt: nach Bonn."
        }],
        "teil2": [{
            "id": 2,
            "text": "Was kostet das Ticket?",
            "options": [{ "id": "a", "code": 1 }, { "id": "b", "code": 2 }],
            "antwort": 1
        }],
        "teil3": null
    }))
    .map(|mut set: ListeningSet| {
        set.object_id = Some(object_id);
        set
    })
    .expect("stored listening set fixture should deserialize")
}

pub fn test_state(
    reading: InMemoryReadingSetRepository,
    listening: Vec<ListeningSet>,
) -> Arc<AppState> {
    Arc::new(AppState::from_parts(
        Config::test_config(),
        Arc::new(reading),
        Arc::new(InMemoryListeningSetRepository::with(listening)),
        Arc::new(InMemoryWritingTaskRepository::with(vec![WritingTask {
            display_id: 1,
            topic: "Umzug".to_string(),
            ..WritingTask::default()
        }])),
        Arc::new(InMemoryScoreStore::new()),
    ))
}

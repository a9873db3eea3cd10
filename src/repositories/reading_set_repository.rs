use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{id_filter, Database},
    errors::{AppError, AppResult},
    models::domain::ReadingSet,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadingSetRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ReadingSet>>;
    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<ReadingSet>, i64)>;
    async fn create(&self, set: ReadingSet) -> AppResult<ReadingSet>;
    async fn update(&self, id: &str, set: ReadingSet) -> AppResult<ReadingSet>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoReadingSetRepository {
    collection: Collection<ReadingSet>,
}

impl MongoReadingSetRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for reading sets collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("display_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for reading sets collection");
        Ok(())
    }
}

#[async_trait]
impl ReadingSetRepository for MongoReadingSetRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ReadingSet>> {
        let set = self.collection.find_one(id_filter(id)?).await?;
        Ok(set)
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<ReadingSet>, i64)> {
        let total = self.collection.count_documents(doc! {}).await? as i64;

        let items: Vec<ReadingSet> = self
            .collection
            .find(doc! {})
            .sort(doc! { "id": 1 })
            .skip(offset.max(0) as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((items, total))
    }

    async fn create(&self, mut set: ReadingSet) -> AppResult<ReadingSet> {
        let existing = self
            .collection
            .find_one(doc! { "id": set.display_id })
            .await?;
        if existing.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Reading set with id '{}' already exists",
                set.display_id
            )));
        }

        set.object_id.get_or_insert_with(ObjectId::new);
        self.collection.insert_one(&set).await?;
        Ok(set)
    }

    async fn update(&self, id: &str, mut set: ReadingSet) -> AppResult<ReadingSet> {
        let existing = self
            .collection
            .find_one(id_filter(id)?)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reading set with id '{}' not found", id)))?;

        // The stored _id is immutable, so the replacement keeps it.
        set.object_id = existing.object_id;
        let filter = match existing.object_id {
            Some(object_id) => doc! { "_id": object_id },
            None => doc! { "id": existing.display_id },
        };

        let result = self.collection.replace_one(filter, &set).await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Reading set with id '{}' not found",
                id
            )));
        }

        Ok(set)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(id_filter(id)?).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Reading set with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::{id_filter, Database},
    errors::AppResult,
    models::domain::WritingTask,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WritingTaskRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<WritingTask>>;
    async fn list(&self) -> AppResult<Vec<WritingTask>>;
}

pub struct MongoWritingTaskRepository {
    collection: Collection<WritingTask>,
}

impl MongoWritingTaskRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl WritingTaskRepository for MongoWritingTaskRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<WritingTask>> {
        let task = self.collection.find_one(id_filter(id)?).await?;
        Ok(task)
    }

    async fn list(&self) -> AppResult<Vec<WritingTask>> {
        let tasks: Vec<WritingTask> = self
            .collection
            .find(doc! {})
            .sort(doc! { "id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(tasks)
    }
}

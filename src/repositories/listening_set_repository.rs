use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::{id_filter, Database},
    errors::AppResult,
    models::domain::ListeningSet,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListeningSetRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ListeningSet>>;
    async fn list(&self) -> AppResult<Vec<ListeningSet>>;
}

pub struct MongoListeningSetRepository {
    collection: Collection<ListeningSet>,
}

impl MongoListeningSetRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl ListeningSetRepository for MongoListeningSetRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ListeningSet>> {
        let set = self.collection.find_one(id_filter(id)?).await?;
        Ok(set)
    }

    async fn list(&self) -> AppResult<Vec<ListeningSet>> {
        let cursor = self.collection.find(doc! {}).await?;
        let sets: Vec<ListeningSet> = cursor.try_collect().await?;
        Ok(sets)
    }
}

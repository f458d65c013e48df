use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use common::entities::IngestionRun;

use crate::errors::StoreError;

const COLLECTION_NAME: &str = "ingestion_runs";

pub(crate) struct IngestionRuns {
    collection: Collection<IngestionRun>,
}

impl IngestionRuns {
    pub(crate) async fn new(db: &Database) -> Result<Self, StoreError> {
        let collection = db.collection::<IngestionRun>(COLLECTION_NAME);

        collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "id": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;
        collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "retailer_id": 1, "started_at": 1 })
                    .build(),
            )
            .await?;

        Ok(Self { collection })
    }

    pub(crate) async fn insert(&self, run: &IngestionRun) -> Result<(), StoreError> {
        self.collection.insert_one(run).await?;
        Ok(())
    }

    pub(crate) async fn replace(&self, run: &IngestionRun) -> Result<(), StoreError> {
        let updated = self
            .collection
            .replace_one(doc! { "id": &run.id }, run)
            .await?;
        if updated.matched_count == 0 {
            return Err(StoreError::UnknownId {
                entity: "ingestion run",
                id: run.id.clone(),
            });
        }
        Ok(())
    }
}

use mongodb::bson::doc;
use mongodb::{Collection, Database, IndexModel};

use common::entities::PriceObservation;

use crate::errors::StoreError;

const COLLECTION_NAME: &str = "price_observations";

/// Append-only price history. Rows are never updated after insert; removal
/// only happens as part of a listing cascade.
pub(crate) struct PriceObservations {
    collection: Collection<PriceObservation>,
}

impl PriceObservations {
    pub(crate) async fn new(db: &Database) -> Result<Self, StoreError> {
        let collection = db.collection::<PriceObservation>(COLLECTION_NAME);

        collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "retailer_listing_id": 1, "captured_at": 1 })
                    .build(),
            )
            .await?;

        Ok(Self { collection })
    }

    pub(crate) async fn insert(&self, observation: &PriceObservation) -> Result<(), StoreError> {
        self.collection.insert_one(observation).await?;
        Ok(())
    }

    pub(crate) async fn for_listing(
        &self,
        retailer_listing_id: &str,
    ) -> Result<Vec<PriceObservation>, StoreError> {
        let mut cursor = self
            .collection
            .find(doc! { "retailer_listing_id": retailer_listing_id })
            .sort(doc! { "captured_at": 1 })
            .await?;
        let mut results = Vec::new();
        while cursor.advance().await? {
            results.push(cursor.deserialize_current()?);
        }
        Ok(results)
    }

    pub(crate) async fn delete_for_listing(
        &self,
        retailer_listing_id: &str,
    ) -> Result<(), StoreError> {
        self.collection
            .delete_many(doc! { "retailer_listing_id": retailer_listing_id })
            .await?;
        Ok(())
    }
}

use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use common::entities::LatestPrice;

use crate::errors::StoreError;

const COLLECTION_NAME: &str = "latest_prices";

/// Projection of the newest price per retailer listing.
pub(crate) struct LatestPrices {
    collection: Collection<LatestPrice>,
}

impl LatestPrices {
    pub(crate) async fn new(db: &Database) -> Result<Self, StoreError> {
        let collection = db.collection::<LatestPrice>(COLLECTION_NAME);

        collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "retailer_listing_id": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;

        Ok(Self { collection })
    }

    pub(crate) async fn upsert(&self, latest: &LatestPrice) -> Result<(), StoreError> {
        self.collection
            .replace_one(
                doc! { "retailer_listing_id": &latest.retailer_listing_id },
                latest,
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    pub(crate) async fn for_listing(
        &self,
        retailer_listing_id: &str,
    ) -> Result<Option<LatestPrice>, StoreError> {
        Ok(self
            .collection
            .find_one(doc! { "retailer_listing_id": retailer_listing_id })
            .await?)
    }

    pub(crate) async fn delete_for_listing(
        &self,
        retailer_listing_id: &str,
    ) -> Result<(), StoreError> {
        self.collection
            .delete_one(doc! { "retailer_listing_id": retailer_listing_id })
            .await?;
        Ok(())
    }
}

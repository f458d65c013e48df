use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use common::entities::ProductOverride;

use crate::errors::StoreError;

const COLLECTION_NAME: &str = "product_overrides";

/// Manual listing→canonical mappings written by admin tooling. The core
/// only reads these.
pub(crate) struct ProductOverrides {
    collection: Collection<ProductOverride>,
}

impl ProductOverrides {
    pub(crate) async fn new(db: &Database) -> Result<Self, StoreError> {
        let collection = db.collection::<ProductOverride>(COLLECTION_NAME);

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

    pub(crate) async fn insert(&self, mapping: &ProductOverride) -> Result<(), StoreError> {
        self.collection.insert_one(mapping).await?;
        Ok(())
    }

    pub(crate) async fn for_listing(
        &self,
        retailer_listing_id: &str,
    ) -> Result<Option<ProductOverride>, StoreError> {
        Ok(self
            .collection
            .find_one(doc! { "retailer_listing_id": retailer_listing_id })
            .await?)
    }
}

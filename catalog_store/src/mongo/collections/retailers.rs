use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use common::entities::Retailer;

use crate::errors::StoreError;

const COLLECTION_NAME: &str = "retailers";

/// Seeded externally; the ingestion core only looks retailers up by slug.
pub(crate) struct Retailers {
    collection: Collection<Retailer>,
}

impl Retailers {
    pub(crate) async fn new(db: &Database) -> Result<Self, StoreError> {
        let collection = db.collection::<Retailer>(COLLECTION_NAME);

        collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "slug": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;

        Ok(Self { collection })
    }

    pub(crate) async fn insert(&self, retailer: &Retailer) -> Result<(), StoreError> {
        self.collection.insert_one(retailer).await?;
        Ok(())
    }

    pub(crate) async fn by_slug(&self, slug: &str) -> Result<Option<Retailer>, StoreError> {
        Ok(self.collection.find_one(doc! { "slug": slug }).await?)
    }
}

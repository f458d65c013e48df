use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use common::entities::RetailerListing;

use crate::errors::StoreError;

const COLLECTION_NAME: &str = "retailer_listings";

pub(crate) struct RetailerListings {
    collection: Collection<RetailerListing>,
}

impl RetailerListings {
    pub(crate) async fn new(db: &Database) -> Result<Self, StoreError> {
        let collection = db.collection::<RetailerListing>(COLLECTION_NAME);

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
                    .keys(doc! { "retailer_id": 1, "source_product_id": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;
        collection
            .create_index(IndexModel::builder().keys(doc! { "product_id": 1 }).build())
            .await?;

        Ok(Self { collection })
    }

    pub(crate) async fn by_source(
        &self,
        retailer_id: i64,
        source_product_id: &str,
    ) -> Result<Option<RetailerListing>, StoreError> {
        Ok(self
            .collection
            .find_one(doc! { "retailer_id": retailer_id, "source_product_id": source_product_id })
            .await?)
    }

    pub(crate) async fn for_canonical(
        &self,
        product_id: &str,
    ) -> Result<Vec<RetailerListing>, StoreError> {
        let mut cursor = self.collection.find(doc! { "product_id": product_id }).await?;
        let mut results = Vec::new();
        while cursor.advance().await? {
            results.push(cursor.deserialize_current()?);
        }
        Ok(results)
    }

    pub(crate) async fn insert(&self, listing: &RetailerListing) -> Result<(), StoreError> {
        if let Err(err) = self.collection.insert_one(listing).await {
            if is_duplicate_key(&err) {
                return Err(StoreError::DuplicateListing {
                    retailer_id: listing.retailer_id,
                    source_product_id: listing.source_product_id.clone(),
                });
            }
            return Err(err.into());
        }
        Ok(())
    }

    pub(crate) async fn replace(&self, listing: &RetailerListing) -> Result<(), StoreError> {
        let updated = self
            .collection
            .replace_one(doc! { "id": &listing.id }, listing)
            .await?;
        if updated.matched_count == 0 {
            return Err(StoreError::UnknownId {
                entity: "retailer listing",
                id: listing.id.clone(),
            });
        }
        Ok(())
    }

    pub(crate) async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.collection.delete_one(doc! { "id": id }).await?;
        Ok(())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}

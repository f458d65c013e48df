use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use common::entities::CanonicalProduct;
use common::vertical::Vertical;

use crate::errors::StoreError;
use crate::mongo::collections::case_insensitive;

const COLLECTION_NAME: &str = "canonical_products";

pub(crate) struct CanonicalProducts {
    collection: Collection<CanonicalProduct>,
}

impl CanonicalProducts {
    pub(crate) async fn new(db: &Database) -> Result<Self, StoreError> {
        let collection = db.collection::<CanonicalProduct>(COLLECTION_NAME);

        collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "id": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;
        collection
            .create_index(IndexModel::builder().keys(doc! { "gtin": 1 }).build())
            .await?;
        // the fuzzy tier scans a (vertical, brand, category) shelf and the
        // model tier probes (brand, mpn/model); both compare case-insensitively
        for keys in [
            doc! { "vertical": 1, "brand": 1, "category": 1 },
            doc! { "brand": 1, "model_number": 1 },
            doc! { "brand": 1, "mpn": 1 },
        ] {
            collection
                .create_index(
                    IndexModel::builder()
                        .keys(keys)
                        .options(IndexOptions::builder().collation(case_insensitive()).build())
                        .build(),
                )
                .await?;
        }

        Ok(Self { collection })
    }

    pub(crate) async fn by_id(&self, id: &str) -> Result<Option<CanonicalProduct>, StoreError> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }

    pub(crate) async fn by_gtin(
        &self,
        vertical: Vertical,
        gtin: &str,
    ) -> Result<Option<CanonicalProduct>, StoreError> {
        Ok(self
            .collection
            .find_one(doc! { "vertical": vertical.to_string(), "gtin": gtin })
            .await?)
    }

    pub(crate) async fn by_model(
        &self,
        vertical: Vertical,
        brand: &str,
        identifier: &str,
    ) -> Result<Option<CanonicalProduct>, StoreError> {
        Ok(self
            .collection
            .find_one(doc! {
                "vertical": vertical.to_string(),
                "brand": brand,
                "$or": [ { "mpn": identifier }, { "model_number": identifier } ],
            })
            .collation(case_insensitive())
            .await?)
    }

    pub(crate) async fn by_shelf(
        &self,
        vertical: Vertical,
        brand: &str,
        category: &str,
        limit: usize,
    ) -> Result<Vec<CanonicalProduct>, StoreError> {
        let mut cursor = self
            .collection
            .find(doc! {
                "vertical": vertical.to_string(),
                "brand": brand,
                "category": category,
            })
            .collation(case_insensitive())
            .limit(limit as i64)
            .await?;

        let mut results = Vec::new();
        while cursor.advance().await? {
            results.push(cursor.deserialize_current()?);
        }
        Ok(results)
    }

    pub(crate) async fn all(&self) -> Result<Vec<CanonicalProduct>, StoreError> {
        let mut cursor = self.collection.find(doc! {}).await?;
        let mut results = Vec::new();
        while cursor.advance().await? {
            results.push(cursor.deserialize_current()?);
        }
        Ok(results)
    }

    pub(crate) async fn insert(&self, product: &CanonicalProduct) -> Result<(), StoreError> {
        self.collection.insert_one(product).await?;
        Ok(())
    }

    pub(crate) async fn replace(&self, product: &CanonicalProduct) -> Result<(), StoreError> {
        let updated = self
            .collection
            .replace_one(doc! { "id": &product.id }, product)
            .await?;
        if updated.matched_count == 0 {
            return Err(StoreError::UnknownId {
                entity: "canonical product",
                id: product.id.clone(),
            });
        }
        Ok(())
    }
}

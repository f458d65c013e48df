use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("duplicate retailer listing for retailer {retailer_id} source {source_product_id}")]
    DuplicateListing {
        retailer_id: i64,
        source_product_id: String,
    },
    #[error("unknown {entity} id {id}")]
    UnknownId { entity: &'static str, id: String },
}

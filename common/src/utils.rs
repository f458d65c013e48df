use chrono::{DateTime, Utc};
use uuid::Uuid;

pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

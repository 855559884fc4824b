use chrono::{DateTime, TimeZone, Utc};
use uuid::{uuid, Uuid};

pub mod contact_message;

pub const UUID1: Uuid = uuid!("eb1cd87a-4475-4d68-a2c2-0216bdaac8f7");
pub const UUID2: Uuid = uuid!("21f3f3d2-1e01-4e0a-a4f9-b06c76c53b1c");

pub fn time(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

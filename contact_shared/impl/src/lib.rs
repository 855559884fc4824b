use chrono::{DateTime, Utc};
use contact_shared_contracts::{IdService, TimeService};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct IdServiceImpl;

impl IdService for IdServiceImpl {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

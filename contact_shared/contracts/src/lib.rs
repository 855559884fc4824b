use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of fresh entity identifiers.
///
/// Split out of the feature services so the publish path can pre-generate
/// the id it acknowledges, and so tests can pin it.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait IdService: Send + Sync + 'static {
    fn generate(&self) -> Uuid;
}

/// The clock every persisted timestamp is read from.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg(feature = "mock")]
impl MockIdService {
    pub fn with_generate(mut self, id: Uuid) -> Self {
        self.expect_generate().once().return_const(id);
        self
    }
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_now(mut self, time: DateTime<Utc>) -> Self {
        self.expect_now().once().return_const(time);
        self
    }
}

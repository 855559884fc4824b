use contact_core_message_contracts::{
    ContactMessageCreateError, ContactMessageFeatureService, RequestIdentity,
};
use contact_demo::contact_message::BAR;
use contact_persistence_contracts::{contact_message::MockContactMessageRepository, MockDatabase};
use contact_shared_contracts::{MockIdService, MockTimeService};
use contact_utils::assert_matches;
use pretty_assertions::assert_eq;

use crate::tests::{form_for, Sut};

#[tokio::test]
async fn ok() {
    // Arrange
    let db = MockDatabase::build(true);
    let id = MockIdService::new().with_generate(*BAR.id);
    let time = MockTimeService::new().with_now(BAR.time_created);

    let contact_message_repo = MockContactMessageRepository::new().with_create(BAR.clone());

    let sut = Sut {
        db,
        id,
        time,
        contact_message_repo,
        ..Sut::default()
    };

    // Act
    let result = sut.create(form_for(&BAR), RequestIdentity::default()).await;

    // Assert
    assert_eq!(result.unwrap(), *BAR);
}

#[tokio::test]
async fn ok_stores_request_identity() {
    // Arrange
    let mut expected = BAR.clone();
    expected.sender.ip = "203.0.113.7".into();
    expected.sender.user_agent = "Mozilla/5.0".into();

    let db = MockDatabase::build(true);
    let id = MockIdService::new().with_generate(*BAR.id);
    let time = MockTimeService::new().with_now(BAR.time_created);

    let contact_message_repo = MockContactMessageRepository::new().with_create(expected.clone());

    let sut = Sut {
        db,
        id,
        time,
        contact_message_repo,
        ..Sut::default()
    };

    let identity = RequestIdentity {
        ip: Some("203.0.113.7".into()),
        user_agent: Some("Mozilla/5.0".into()),
    };

    // Act
    let result = sut.create(form_for(&BAR), identity).await;

    // Assert
    assert_eq!(result.unwrap(), expected);
}

#[tokio::test]
async fn repository_error() {
    // Arrange
    let db = MockDatabase::build(false);
    let id = MockIdService::new().with_generate(*BAR.id);
    let time = MockTimeService::new().with_now(BAR.time_created);

    let contact_message_repo = MockContactMessageRepository::new().with_create_error(BAR.clone());

    let sut = Sut {
        db,
        id,
        time,
        contact_message_repo,
        ..Sut::default()
    };

    // Act
    let result = sut.create(form_for(&BAR), RequestIdentity::default()).await;

    // Assert
    assert_matches!(result, Err(ContactMessageCreateError::Other(_)));
}

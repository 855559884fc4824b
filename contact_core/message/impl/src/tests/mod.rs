use contact_auth_contracts::MockApiAuthService;
use contact_bus_contracts::MockEventPublisher;
use contact_core_message_contracts::ContactMessageCreatedEvent;
use contact_forms::{ContactMessageCreationForm, SenderCreationForm};
use contact_models::message::ContactMessage;
use contact_persistence_contracts::{
    contact_message::MockContactMessageRepository, MockDatabase, MockTransaction,
};
use contact_shared_contracts::{MockIdService, MockTimeService};

use crate::ContactMessageFeatureServiceImpl;

mod create;

type Sut = ContactMessageFeatureServiceImpl<
    MockDatabase,
    MockApiAuthService,
    MockIdService,
    MockTimeService,
    MockEventPublisher<ContactMessageCreatedEvent>,
    MockContactMessageRepository<MockTransaction>,
>;

/// Reconstructs the creation form a message would have been built from.
fn form_for(message: &ContactMessage) -> ContactMessageCreationForm {
    ContactMessageCreationForm {
        message: message.message.clone(),
        reason: message.reason,
        sender: SenderCreationForm {
            alias: message.sender.alias.clone(),
            phone: message.sender.phone.clone(),
            email: message.sender.email.clone(),
        },
    }
}

use std::sync::Arc;

use contact_api_rest::{RestServer, RestServerConfig};
use contact_auth_impl::ApiAuthServiceImpl;
use contact_bus_memory::MemoryTopic;
use contact_config::Config;
use contact_core_message_impl::{
    consumers::{spawn_consumers, ConsumerConfig},
    ContactMessageFeatureServiceImpl,
};
use contact_email_contracts::EmailService;
use contact_persistence_contracts::Database;
use contact_persistence_postgres::contact_message::PostgresContactMessageRepository;
use contact_shared_impl::{IdServiceImpl, TimeServiceImpl};
use tracing::info;

use crate::{database, email};

// Events buffered per subscriber before a slow consumer starts skipping.
const TOPIC_CAPACITY: usize = 256;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to database");
    let database = database::connect(&config.database).await?;
    database.ping().await?;

    info!("Applying pending migrations");
    let mut applied = false;
    for name in database.run_migrations(None).await? {
        info!("Applied {name}");
        applied = true;
    }
    if !applied {
        info!("No migrations pending");
    }

    info!("Connecting to smtp server");
    let email = email::connect(&config.email).await?;
    email.ping().await?;

    let topic = MemoryTopic::new(TOPIC_CAPACITY);
    let persist_events = topic.subscribe();
    let notify_events = topic.subscribe();

    let service = ContactMessageFeatureServiceImpl {
        db: database,
        auth: ApiAuthServiceImpl::new(&config.auth.api_token),
        id: IdServiceImpl,
        time: TimeServiceImpl,
        publisher: topic,
        contact_message_repo: PostgresContactMessageRepository,
    };

    spawn_consumers(
        Arc::new(service.clone()),
        Arc::new(email),
        ConsumerConfig {
            notification_email: config.contact.notification_email.clone(),
        },
        persist_events,
        notify_events,
    );

    let server = RestServer {
        contact_message: service,
        config: RestServerConfig {
            synchronous_create: config.contact.synchronous_create,
            real_ip_header: config.http.real_ip_header.as_deref().map(Arc::from),
        },
    };

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}

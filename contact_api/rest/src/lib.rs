use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::Router;
use contact_core_message_contracts::ContactMessageFeatureService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

mod extractors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<ContactMessage> {
    pub contact_message: ContactMessage,
    pub config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    /// Persist submissions within the request instead of publishing them to
    /// the topic.
    pub synchronous_create: bool,
    /// Header carrying the original client address when running behind a
    /// reverse proxy.
    pub real_ip_header: Option<Arc<str>>,
}

impl<ContactMessage: ContactMessageFeatureService> RestServer<ContactMessage> {
    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;

        let router = self.router();
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = routes::contact::router(
            Arc::new(self.contact_message),
            self.config.synchronous_create,
        )
        .layer(CorsLayer::permissive());

        // client ip resolution has to wrap the trace layer, its span reads
        // the extension
        let router = middlewares::trace::add(router);
        middlewares::client_ip::add(self.config.real_ip_header)(router)
    }
}

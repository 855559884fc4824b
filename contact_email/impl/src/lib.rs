use anyhow::anyhow;
use contact_email_contracts::{Email, EmailService};
use contact_models::email_address::EmailAddress;
use contact_utils::Apply;
use lettre::{
    message::{header, Mailbox, MessageBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    pub async fn new(url: &str, from: EmailAddress) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build();

        Ok(Self { from, transport })
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = Message::builder()
            .from(Mailbox::from(self.from.0.clone()))
            .to(Mailbox::from(email.recipient.0))
            .apply_map(
                email.reply_to.map(|reply_to| Mailbox::from(reply_to.0)),
                MessageBuilder::reply_to,
            )
            .subject(email.subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(email.body)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

//! Outbox dispatcher's publish sink: a direct exchange, fixed routing key.
//! The exchange and routing key are the contract; the broker itself is out
//! of core scope.

use anyhow::{anyhow, Result};
use lapin::{
    options::{BasicPublishOptions, ExchangeDeclareOptions},
    types::FieldTable,
    BasicProperties, Connection, ConnectionProperties, ExchangeKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hive_types::config::BrokerConfig;

const EMAIL_EXCHANGE: &str = "hive.notifications";
const EMAIL_ROUTING_KEY: &str = "identity.email";

/// Wire shape of the broker payload: `{recipientEmail,
/// subject, templateCode, variables}`. Also the shape the outbox stores
/// its `EmailNotification` rows in, so the dispatcher can deserialize a
/// claimed row's payload directly into this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotificationPayload {
    pub recipient_email: String,
    pub subject: String,
    pub template_code: String,
    pub variables: std::collections::HashMap<String, String>,
}

#[derive(Clone)]
pub struct BrokerPublisher {
    connection: std::sync::Arc<Connection>,
}

impl BrokerPublisher {
    pub async fn connect(config: &BrokerConfig) -> Result<Self> {
        let uri = format!(
            "amqp://{}:{}@{}:{}{}",
            config.username, config.password, config.host, config.port, config.virtual_host
        );
        let connection = Connection::connect(&uri, ConnectionProperties::default())
            .await
            .map_err(|e| anyhow!("failed to connect to broker: {e}"))?;

        let channel = connection
            .create_channel()
            .await
            .map_err(|e| anyhow!("failed to open channel: {e}"))?;
        channel
            .exchange_declare(
                EMAIL_EXCHANGE,
                ExchangeKind::Direct,
                ExchangeDeclareOptions { durable: true, ..Default::default() },
                FieldTable::default(),
            )
            .await
            .map_err(|e| anyhow!("failed to declare exchange: {e}"))?;

        Ok(Self { connection: std::sync::Arc::new(connection) })
    }

    /// Publishes one outbox row's payload. `message_id` is the outbox row's
    /// own id, giving the downstream consumer a stable idempotency key.
    pub async fn publish_email_notification(
        &self,
        message_id: Uuid,
        payload: &EmailNotificationPayload,
    ) -> Result<()> {
        let channel = self
            .connection
            .create_channel()
            .await
            .map_err(|e| anyhow!("failed to open channel: {e}"))?;

        let body = serde_json::to_vec(payload).map_err(|e| anyhow!("failed to serialize payload: {e}"))?;
        let properties = BasicProperties::default()
            .with_message_id(message_id.to_string().into())
            .with_content_type("application/json".into());

        channel
            .basic_publish(
                EMAIL_EXCHANGE,
                EMAIL_ROUTING_KEY,
                BasicPublishOptions::default(),
                &body,
                properties,
            )
            .await
            .map_err(|e| anyhow!("publish failed: {e}"))?
            .await
            .map_err(|e| anyhow!("publish confirm failed: {e}"))?;

        Ok(())
    }
}

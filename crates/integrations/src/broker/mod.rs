mod publisher;

pub use publisher::{BrokerPublisher, EmailNotificationPayload};

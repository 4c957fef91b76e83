use anyhow::Context;
use serde::Deserialize;
use std::sync::Mutex;
use tracing::info;

/// The managed pub/sub service this core hands notifications to. `publish`
/// returns the delivery receipt id assigned by the service.
#[async_trait::async_trait]
pub trait INotificationPublisher: Send + Sync {
    async fn list_topics(&self) -> anyhow::Result<Vec<String>>;
    async fn publish(&self, topic: &str, message: &str) -> anyhow::Result<String>;
}

/// Resolve the topics belonging to a user. Topic identifiers embed the
/// owning username by convention; matching is case-insensitive containment.
pub async fn topics_for_user(
    publisher: &dyn INotificationPublisher,
    username: &str,
) -> anyhow::Result<Vec<String>> {
    let needle = username.to_lowercase();
    let topics = publisher
        .list_topics()
        .await
        .with_context(|| format!("Could not filter through the subscriptions for {}", username))?;

    Ok(topics
        .into_iter()
        .filter(|topic| topic.to_lowercase().contains(&needle))
        .collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishedMessage {
    pub topic: String,
    pub message: String,
}

/// In-memory publisher for tests: records everything published and exposes
/// it for assertions.
pub struct InMemoryNotificationPublisher {
    topics: Mutex<Vec<String>>,
    published: Mutex<Vec<PublishedMessage>>,
}

impl InMemoryNotificationPublisher {
    pub fn new() -> Self {
        Self {
            topics: Mutex::new(Vec::new()),
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn add_topic(&self, topic: &str) {
        self.topics.lock().unwrap().push(topic.to_string());
    }

    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published.lock().unwrap().clone()
    }
}

impl Default for InMemoryNotificationPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotificationPublisher for InMemoryNotificationPublisher {
    async fn list_topics(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.topics.lock().unwrap().clone())
    }

    async fn publish(&self, topic: &str, message: &str) -> anyhow::Result<String> {
        let mut published = self.published.lock().unwrap();
        published.push(PublishedMessage {
            topic: topic.to_string(),
            message: message.to_string(),
        });
        Ok(format!("msg-{}", published.len()))
    }
}

/// Publisher backed by the pub/sub gateway in front of the managed
/// notification service.
pub struct GatewayNotificationPublisher {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ListTopicsResponse {
    topics: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    message_id: String,
}

impl GatewayNotificationPublisher {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl INotificationPublisher for GatewayNotificationPublisher {
    async fn list_topics(&self) -> anyhow::Result<Vec<String>> {
        let res: ListTopicsResponse = self
            .client
            .get(format!("{}/topics", self.base_url))
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .context("Notification gateway unreachable")?
            .error_for_status()
            .context("Notification gateway rejected the topic listing")?
            .json()
            .await
            .context("Malformed topic listing from notification gateway")?;
        Ok(res.topics)
    }

    async fn publish(&self, topic: &str, message: &str) -> anyhow::Result<String> {
        let res: PublishResponse = self
            .client
            .post(format!("{}/topics/{}/publish", self.base_url, topic))
            .header("x-api-key", &self.api_key)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .context("Notification gateway unreachable")?
            .error_for_status()
            .context("Notification gateway rejected the publish")?
            .json()
            .await
            .context("Malformed publish receipt from notification gateway")?;
        info!("Published notification to topic {}: {}", topic, res.message_id);
        Ok(res.message_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn matches_topics_case_insensitively() {
        let publisher = InMemoryNotificationPublisher::new();
        publisher.add_topic("reminders-Alice-daily");
        publisher.add_topic("reminders-Bob-daily");
        publisher.add_topic("system-health");

        let topics = topics_for_user(&publisher, "alice").await.unwrap();
        assert_eq!(topics, vec!["reminders-Alice-daily".to_string()]);

        let topics = topics_for_user(&publisher, "eve").await.unwrap();
        assert!(topics.is_empty());
    }
}

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;

/// Lookup into the managed identity pool. The scheduled send job reports the
/// email of every user it processed.
#[async_trait::async_trait]
pub trait IUserDirectory: Send + Sync {
    async fn find_email(&self, username: &str) -> Option<String>;
}

/// In-memory directory for tests.
pub struct InMemoryUserDirectory {
    emails: Mutex<HashMap<String, String>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            emails: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_email(&self, username: &str, email: &str) {
        self.emails
            .lock()
            .unwrap()
            .insert(username.to_string(), email.to_string());
    }
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IUserDirectory for InMemoryUserDirectory {
    async fn find_email(&self, username: &str) -> Option<String> {
        self.emails.lock().unwrap().get(username).cloned()
    }
}

/// Directory backed by the identity provider's admin API.
pub struct HttpUserDirectory {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    email: String,
}

impl HttpUserDirectory {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl IUserDirectory for HttpUserDirectory {
    async fn find_email(&self, username: &str) -> Option<String> {
        let record: UserRecord = self
            .client
            .get(format!("{}/users/{}", self.base_url, username))
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?
            .json()
            .await
            .ok()?;
        Some(record.email)
    }
}

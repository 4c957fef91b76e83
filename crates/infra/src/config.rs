use remind_domain::DateTimeConfig;
use tracing::{info, warn};

/// Where the pub/sub gateway lives and how we authenticate against it.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How incoming date strings are interpreted. Inputs without a zone are
    /// assumed to be in this timezone before conversion to UTC.
    pub datetime: DateTimeConfig,
    /// Pub/sub gateway for user notifications. When unset, notifications
    /// stay in-process (useful for local development).
    pub notification_gateway: Option<GatewaySettings>,
    /// Identity pool lookup endpoint used by the send job to report user
    /// emails.
    pub user_directory_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let mut datetime = DateTimeConfig::default();
        if let Ok(tz) = std::env::var("TIMEZONE") {
            match tz.parse() {
                Ok(tz) => datetime.timezone = tz,
                Err(_) => warn!(
                    "The given TIMEZONE: {} is not valid, falling back to UTC.",
                    tz
                ),
            }
        }

        let notification_gateway = match std::env::var("NOTIFICATION_GATEWAY_URL") {
            Ok(url) => Some(GatewaySettings {
                url,
                api_key: std::env::var("NOTIFICATION_GATEWAY_KEY").unwrap_or_default(),
            }),
            Err(_) => {
                info!("Did not find NOTIFICATION_GATEWAY_URL environment variable. Notifications will not leave this process.");
                None
            }
        };

        let user_directory_url = std::env::var("USER_DIRECTORY_URL").ok();

        Self {
            port,
            datetime,
            notification_gateway,
            user_directory_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, GatewaySettings};
pub use repos::{DeleteResult, IReminderRepo, Repos};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{FixedSys, ISys, RealSys};
use tracing::info;

#[derive(Clone)]
pub struct RemindContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotificationPublisher>,
    pub directory: Arc<dyn IUserDirectory>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl RemindContext {
    async fn create(params: ContextParams) -> Self {
        let config = Config::new();
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");

        let notifier: Arc<dyn INotificationPublisher> = match &config.notification_gateway {
            Some(gateway) => Arc::new(GatewayNotificationPublisher::new(
                gateway.url.clone(),
                gateway.api_key.clone(),
            )),
            None => Arc::new(InMemoryNotificationPublisher::new()),
        };
        let directory: Arc<dyn IUserDirectory> = match &config.user_directory_url {
            Some(url) => Arc::new(HttpUserDirectory::new(url.clone())),
            None => Arc::new(InMemoryUserDirectory::new()),
        };

        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
            directory,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> RemindContext {
    RemindContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

/// Context wired entirely against in-memory fakes, for tests.
pub fn setup_context_inmemory() -> RemindContext {
    RemindContext {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        sys: Arc::new(RealSys {}),
        notifier: Arc::new(InMemoryNotificationPublisher::new()),
        directory: Arc::new(InMemoryUserDirectory::new()),
    }
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    info!("Running migrations ...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::{stats::policies::AggregationPolicy, training::scoring::ScoringPolicy};

pub mod entities;
pub mod ports;
pub mod services;
pub mod validation;

#[derive(Clone, Debug)]
pub struct BrigadeConfig {
    pub database: DatabaseConfig,
    pub training: TrainingPolicy,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    /// Full connection string; takes precedence over the discrete fields.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn database_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.username, self.password, self.host, self.port, self.name
            ),
        }
    }
}

/// Scoring and rollup rules applied by the session engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrainingPolicy {
    pub scoring: ScoringPolicy,
    pub aggregation: AggregationPolicy,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

use brigade_core::domain::{
    common::{BrigadeConfig, DatabaseConfig, TrainingPolicy},
    stats::policies::AggregationPolicy,
    training::scoring::ScoringPolicy,
};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "brigade", version, about = "Staff training store for restaurant brigades")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub training: TrainingArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create tables and indexes; safe to run repeatedly.
    Migrate,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DatabaseArgs {
    #[arg(long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "brigade")]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        default_value = "brigade",
        hide_env_values = true
    )]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "brigade")]
    pub name: String,

    /// Full connection string, overrides the discrete settings above.
    #[arg(long = "database-url", env = "DATABASE_URL", hide_env_values = true)]
    pub url: Option<String>,

    #[arg(
        long = "database-max-connections",
        env = "DATABASE_MAX_CONNECTIONS",
        default_value_t = 10
    )]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScoringArg {
    Weighted,
    Unweighted,
}

impl From<ScoringArg> for ScoringPolicy {
    fn from(arg: ScoringArg) -> Self {
        match arg {
            ScoringArg::Weighted => ScoringPolicy::DifficultyWeighted,
            ScoringArg::Unweighted => ScoringPolicy::Unweighted,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct TrainingArgs {
    #[arg(
        long = "scoring-policy",
        env = "SCORING_POLICY",
        value_enum,
        default_value_t = ScoringArg::Weighted
    )]
    pub scoring: ScoringArg,

    /// Count the elapsed time of abandoned sessions towards training time.
    #[arg(long = "count-abandoned-time", env = "COUNT_ABANDONED_TIME")]
    pub count_abandoned_time: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// Emit logs as JSON lines.
    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for BrigadeConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.database.host,
                port: args.database.port,
                username: args.database.user,
                password: args.database.password,
                name: args.database.name,
                url: args.database.url,
                max_connections: args.database.max_connections,
            },
            training: TrainingPolicy {
                scoring: args.training.scoring.into(),
                aggregation: AggregationPolicy {
                    count_abandoned_time: args.training.count_abandoned_time,
                },
            },
        }
    }
}

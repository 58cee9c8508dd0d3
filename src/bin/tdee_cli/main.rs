// ABOUTME: tdee-cli - command-line front end for the adaptive expenditure engine
// ABOUTME: Creates profiles, records logs, runs estimations, and prints strategy and trends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Create a profile (prints its id)
//! tdee-cli profile create --initial-expenditure 2500 --weight 80 --sex male \
//!     --goal-type lose-fat --approach cut
//!
//! # Record a day and re-estimate the window it falls in
//! tdee-cli log --profile <ID> --date 2025-03-01 --calories 2100 --weight 79.6
//!
//! # Estimate over logs not yet covered by a window
//! tdee-cli estimate catch-up --profile <ID>
//!
//! # Current calorie and protein targets
//! tdee-cli strategy --profile <ID>
//!
//! # Expenditure history with confidence, and the smoothed weight trend
//! tdee-cli series --profile <ID> --json
//! tdee-cli trend --profile <ID>
//! ```

mod commands;
mod helpers;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tdee_engine::{
    config::environment::{DatabaseConfig, DatabaseUrl, ServerConfig},
    database_plugins::sqlite::SqliteDatabase,
    errors::AppResult,
    logging::LoggingConfig,
    models::{Approach, GoalType, MeasurementSystem, Sex},
    services::ExpenditureService,
};
use tracing::info;
use uuid::Uuid;

use helpers::display::OutputFormat;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "tdee-cli",
    about = "Adaptive TDEE estimation CLI",
    long_about = "Record daily intake and body weight, maintain expenditure estimation windows, and derive calorie and protein targets."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Profile management commands
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Record or edit one day's intake and weight
    Log {
        /// Profile ID
        #[arg(long)]
        profile: Uuid,

        /// Log date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Caloric intake in kcal
        #[arg(long)]
        calories: Option<f64>,

        /// Body weight in the profile's unit
        #[arg(long)]
        weight: Option<f64>,
    },

    /// Estimation runs
    Estimate {
        #[command(subcommand)]
        action: EstimateCommand,
    },

    /// Show calorie and protein targets
    Strategy {
        /// Profile ID
        #[arg(long)]
        profile: Uuid,
    },

    /// Show estimation windows with confidence, newest first
    Series {
        /// Profile ID
        #[arg(long)]
        profile: Uuid,
    },

    /// Show logged weights with their moving average
    Trend {
        /// Profile ID
        #[arg(long)]
        profile: Uuid,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ProfileCommand {
    /// Create a profile and its goal
    Create {
        /// Starting expenditure estimate in kcal/day
        #[arg(long)]
        initial_expenditure: f64,

        /// Starting body weight in the chosen unit
        #[arg(long)]
        weight: f64,

        /// Biological sex (male, female)
        #[arg(long)]
        sex: Sex,

        /// Unit system (metric, imperial)
        #[arg(long, default_value = "metric")]
        measurement_system: MeasurementSystem,

        /// Goal type (build-muscle, lose-fat, maintain)
        #[arg(long)]
        goal_type: GoalType,

        /// Approach (bulk, cut, maintain)
        #[arg(long)]
        approach: Approach,

        /// Weekly weight change target; defaults to the recommended pace
        #[arg(long, allow_hyphen_values = true)]
        weekly_target: Option<f64>,
    },

    /// Override the weekly weight change target
    SetTarget {
        /// Profile ID
        #[arg(long)]
        profile: Uuid,

        /// Weekly change in the profile's unit (negative to lose)
        #[arg(long, allow_hyphen_values = true)]
        target: f64,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum EstimateCommand {
    /// Estimate over complete logs newer than the latest window
    CatchUp {
        /// Profile ID
        #[arg(long)]
        profile: Uuid,
    },

    /// Recompute the window containing a date
    Retroactive {
        /// Profile ID
        #[arg(long)]
        profile: Uuid,

        /// Edited date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = cli.database_url.as_deref() {
        config.database = DatabaseConfig {
            url: DatabaseUrl::parse_url(url)?,
            ..config.database
        };
    }

    info!("Connecting to database: {}", config.database.url);
    let database = SqliteDatabase::from_config(&config.database).await?;
    let service = ExpenditureService::with_config(database, config.estimation);
    let format = OutputFormat::from_flag(cli.json);

    match cli.command {
        Command::Profile { action } => match action {
            ProfileCommand::Create {
                initial_expenditure,
                weight,
                sex,
                measurement_system,
                goal_type,
                approach,
                weekly_target,
            } => {
                commands::profile::create(
                    &service,
                    commands::profile::NewProfile {
                        initial_expenditure,
                        weight,
                        sex,
                        measurement_system,
                        goal_type,
                        approach,
                        weekly_target,
                    },
                    format,
                )
                .await?;
            }
            ProfileCommand::SetTarget { profile, target } => {
                commands::profile::set_target(&service, profile, target, format).await?;
            }
        },
        Command::Log {
            profile,
            date,
            calories,
            weight,
        } => {
            commands::estimation::log(&service, profile, date, calories, weight, format).await?;
        }
        Command::Estimate { action } => match action {
            EstimateCommand::CatchUp { profile } => {
                commands::estimation::catch_up(&service, profile, format).await?;
            }
            EstimateCommand::Retroactive { profile, date } => {
                commands::estimation::retroactive(&service, profile, date, format).await?;
            }
        },
        Command::Strategy { profile } => {
            commands::estimation::strategy(&service, profile, format).await?;
        }
        Command::Series { profile } => {
            commands::estimation::series(&service, profile, format).await?;
        }
        Command::Trend { profile } => {
            commands::estimation::trend(&service, profile, format).await?;
        }
    }

    Ok(())
}

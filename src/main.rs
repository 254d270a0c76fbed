// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tree Quest command line
//!
//! Manages the local marker file and prints derived profile and coverage
//! state as JSON, the same data a map front end renders.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tree_quest::{
    config::{self, Config, ConfigError},
    models::Coordinate,
    services::{CoverageZoneBuilder, FileRosterLoader, FriendsRoster, RefreshOutcome},
    AppState,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "tree-quest", version, about = "Discover and map trees")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List markers, newest first
    List,
    /// Record a tree
    Add {
        #[arg(long, allow_hyphen_values = true, value_parser = parse_degrees)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true, value_parser = parse_degrees)]
        lon: f64,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Delete a marker by id
    Remove { id: Uuid },
    /// Delete every marker
    Clear,
    /// Show level, progress and achievements
    Profile,
    /// Cluster markers into coverage zones
    Zones {
        /// Zone radius in meters
        #[arg(long, value_parser = parse_radius)]
        radius: Option<f64>,
        /// Merge distance in meters (default 0.6 × radius)
        #[arg(long, value_parser = parse_merge_distance)]
        merge_distance: Option<f64>,
    },
    /// Load a roster exported as JSON and show it
    Friends {
        #[arg(long)]
        file: PathBuf,
        /// Show only the friend with this id
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(Serialize)]
struct ProfileReport<'a> {
    #[serde(flatten)]
    progress: &'a tree_quest::services::ProfileProgress,
    unlocked: Vec<&'static str>,
    locked: Vec<&'static str>,
    language: &'static str,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let cli = Cli::parse();
    let config = Config::from_env()?;
    tracing::info!(path = %config.marker_path().display(), "Using marker file");

    let mut state = AppState::load(config).await;

    match cli.command {
        Command::List => print_json(state.store.markers())?,
        Command::Add { lat, lon, note } => {
            let marker = state
                .store
                .add_marker(Coordinate::new(lat, lon), note.trim())?
                .clone();
            state.store.flush().await;
            print_json(&marker)?;
        }
        Command::Remove { id } => {
            if !state.store.remove_marker(id) {
                tracing::warn!(%id, "No marker with that id");
            }
            state.store.flush().await;
        }
        Command::Clear => {
            state.store.remove_all();
            state.store.flush().await;
        }
        Command::Profile => {
            state.refresh_profile();
            let report = ProfileReport {
                progress: state.profile.progress(),
                unlocked: state.profile.unlocked_achievements().iter().map(|a| a.id).collect(),
                locked: state.profile.locked_achievements().iter().map(|a| a.id).collect(),
                language: state.config.language.code(),
            };
            print_json(&report)?;
        }
        Command::Zones {
            radius,
            merge_distance,
        } => {
            let mut builder = match radius {
                Some(r) => CoverageZoneBuilder::new(r),
                None => state.coverage,
            };
            if let Some(distance) = merge_distance {
                builder = builder.with_merge_distance(distance);
            }
            print_json(&builder.build_from_markers(state.store.markers()))?;
        }
        Command::Friends { file, id } => {
            let loader = Arc::new(FileRosterLoader::new(file));
            let roster = FriendsRoster::new(Arc::new(|| true), loader);
            if roster.refresh().await == RefreshOutcome::Failed {
                let message = roster.last_error().unwrap_or_default();
                return Err(message.into());
            }
            match id {
                Some(id) => print_json(&roster.friend(&id))?,
                None => print_json(&roster.friends())?,
            }
        }
    }

    Ok(())
}

fn parse_degrees(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err("must be a finite number".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_radius(raw: &str) -> Result<f64, ConfigError> {
    config::parse_distance("--radius", raw)
}

fn parse_merge_distance(raw: &str) -> Result<f64, ConfigError> {
    config::parse_distance("--merge-distance", raw)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tree_quest=info".parse()?)
                .add_directive("warn".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_rejects_non_finite_coordinates() {
        assert!(Cli::try_parse_from(["tree-quest", "add", "--lat", "NaN", "--lon", "18"]).is_err());
        assert!(Cli::try_parse_from(["tree-quest", "add", "--lat", "59", "--lon", "inf"]).is_err());
        assert!(Cli::try_parse_from(["tree-quest", "add", "--lat", "-33.9", "--lon", "18.4"]).is_ok());
    }

    #[test]
    fn test_zones_distances_match_env_validation() {
        for bad in ["0", "-5", "NaN", "inf", "wide"] {
            assert!(Cli::try_parse_from(["tree-quest", "zones", "--radius", bad]).is_err());
            assert!(
                Cli::try_parse_from(["tree-quest", "zones", "--merge-distance", bad]).is_err()
            );
        }

        let cli = Cli::try_parse_from(["tree-quest", "zones", "--radius", "200"]).unwrap();
        assert!(matches!(cli.command, Command::Zones { radius: Some(r), .. } if r == 200.0));
    }
}

//! CLI module for the team registry
//!
//! Single `serve` subcommand that runs the HTTP API.

pub mod serve;

use clap::{Parser, Subcommand};

/// Team Registry - CRUD API for team records with logo ingestion
#[derive(Parser)]
#[command(name = "team-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}

//! CLI module for the user management service

pub mod serve;

use clap::{Parser, Subcommand};

/// User management service - accounts and JWT session tokens over HTTP
#[derive(Parser)]
#[command(name = "user-management")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default)
    Serve(serve::ServeArgs),
}

impl Cli {
    /// The requested command, defaulting to `serve`
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Serve(serve::ServeArgs::default()))
    }
}

pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::reports::ReportClient;

#[derive(Parser)]
#[command(name = "reports")]
#[command(about = "Reports CLI - run BI looks and queries for the project backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run saved looks, saved queries and ad-hoc queries")]
    Report {
        #[command(subcommand)]
        cmd: commands::report::ReportCommands,
    },

    #[command(about = "Look up members")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Project statistics")]
    Project {
        #[command(subcommand)]
        cmd: commands::project::ProjectCommands,
    },

    #[command(about = "Authenticate against the identity endpoint and show the credential expiry")]
    Token,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Report { cmd } => commands::report::handle(&ReportClient::from_env()?, cmd, output_format).await,
        Commands::User { cmd } => commands::user::handle(&ReportClient::from_env()?, cmd, output_format).await,
        Commands::Project { cmd } => commands::project::handle(&ReportClient::from_env()?, cmd, output_format).await,
        Commands::Token => commands::token::handle(output_format).await,
    }
}

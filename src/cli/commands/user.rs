use clap::Subcommand;
use crate::cli::{utils, OutputFormat};
use crate::reports::ReportClient;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Find a member by email address")]
    Email {
        #[arg(help = "Email address")]
        email: String,
    },

    #[command(about = "Find a member by handle")]
    Handle {
        #[arg(help = "Member handle")]
        handle: String,
    },
}

pub async fn handle(client: &ReportClient, cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let payload = match cmd {
        UserCommands::Email { email } => client.find_user_by_email(&email).await?,
        UserCommands::Handle { handle } => client.find_user_by_handle(&handle).await?,
    };

    utils::output_payload(&output_format, &payload)
}

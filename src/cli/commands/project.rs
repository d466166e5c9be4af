use clap::Subcommand;
use crate::cli::{utils, OutputFormat};
use crate::reports::ReportClient;

#[derive(Subcommand)]
pub enum ProjectCommands {
    #[command(about = "Registration and submission counts per track")]
    RegStats {
        #[arg(help = "Direct project id")]
        project_id: u64,
    },
}

pub async fn handle(client: &ReportClient, cmd: ProjectCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let payload = match cmd {
        ProjectCommands::RegStats { project_id } => client.find_project_reg_submissions(project_id).await?,
    };

    utils::output_payload(&output_format, &payload)
}

use clap::Subcommand;
use crate::cli::{utils, OutputFormat};
use crate::reports::{Filters, ReportClient};

#[derive(Subcommand)]
pub enum ReportCommands {
    #[command(about = "Run a saved look")]
    Look {
        #[arg(help = "Look id")]
        id: u64,
    },

    #[command(about = "Run a saved query")]
    Query {
        #[arg(help = "Query id")]
        id: u64,
    },

    #[command(about = "Run an ad-hoc query against the main model")]
    Adhoc {
        #[arg(help = "Query id")]
        query_id: u64,
        #[arg(long, help = "Explore view to query")]
        view: Option<String>,
        #[arg(long = "field", help = "Field to return, in output order (repeatable)")]
        fields: Vec<String>,
        #[arg(long = "filter", value_parser = utils::parse_filter, help = "Equality filter as field=value (repeatable)")]
        filters: Vec<(String, String)>,
    },
}

pub async fn handle(client: &ReportClient, cmd: ReportCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let payload = match cmd {
        ReportCommands::Look { id } => client.run_fixed_report(id).await?,
        ReportCommands::Query { id } => client.run_saved_query(id).await?,
        ReportCommands::Adhoc { query_id, view, fields, filters } => {
            let fields = if fields.is_empty() { None } else { Some(fields) };
            let filters: Filters = filters.into_iter().collect();
            client.run_ad_hoc_query(query_id, view, fields, filters).await?
        }
    };

    utils::output_payload(&output_format, &payload)
}

use clap::Subcommand;

use super::admin::report;
use crate::cli::config::CliSettings;
use crate::cli::OutputFormat;
use crate::client::ContentClient;

#[derive(Subcommand, Debug)]
pub enum ContentCommands {
    #[command(about = "Fetch a lesson by id")]
    Lesson { id: String },

    #[command(about = "List lessons for an action")]
    Lessons {
        #[arg(help = "Lesson action, e.g. reading")]
        action: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    #[command(about = "Fetch a unit test by id")]
    UnitTest { id: String },
}

pub async fn handle(cmd: ContentCommands, token: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let settings = CliSettings::from_env()?;
    let token = settings.resolve_token(token)?;
    let client = ContentClient::new(&settings.content_url, settings.timeout)?;

    let result = match cmd {
        ContentCommands::Lesson { id } => client.fetch_lesson(&token, &id).await,
        ContentCommands::Lessons { action, page } => client.fetch_lessons_by_action(&token, &action, page).await,
        ContentCommands::UnitTest { id } => client.fetch_unit_test(&token, &id).await,
    };

    report(result, &output_format)
}

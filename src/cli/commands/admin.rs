use clap::Subcommand;

use crate::cli::config::CliSettings;
use crate::cli::utils::{output_error, output_payload};
use crate::cli::OutputFormat;
use crate::client::{ActionError, AdminClient};

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    #[command(about = "Fetch a single invoice")]
    Invoice {
        #[arg(help = "Invoice id, e.g. in_123")]
        id: String,
    },

    #[command(about = "Monthly revenue chart")]
    Revenue,

    #[command(about = "Recent transactions")]
    Transactions {
        #[arg(long, help = "Number of transactions (server default 50, max 100)")]
        limit: Option<u64>,
    },
}

pub async fn handle(cmd: AdminCommands, token: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let settings = CliSettings::from_env()?;
    let token = settings.resolve_token(token)?;
    let client = AdminClient::new(&settings.api_url, settings.timeout)?;

    let result = match cmd {
        AdminCommands::Invoice { id } => client
            .fetch_invoice(&token, &id)
            .await
            .and_then(|invoice| to_value(&invoice)),
        AdminCommands::Revenue => client
            .fetch_revenue_chart(&token)
            .await
            .and_then(|chart| to_value(&chart)),
        AdminCommands::Transactions { limit } => client
            .fetch_transactions(&token, limit)
            .await
            .and_then(|txns| to_value(&txns)),
    };

    report(result, &output_format)
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ActionError> {
    serde_json::to_value(value).map_err(|e| ActionError::Decode(e.to_string()))
}

/// Print a fetched payload, or the action error with its upstream status
pub(crate) fn report(result: Result<serde_json::Value, ActionError>, output_format: &OutputFormat) -> anyhow::Result<()> {
    match result {
        Ok(data) => output_payload(output_format, &data),
        Err(err) => {
            if let OutputFormat::Json = output_format {
                let code = match &err {
                    ActionError::Status { status, .. } => Some(status.as_str().to_string()),
                    _ => None,
                };
                output_error(output_format, &err.to_string(), code.as_deref())?;
            }
            Err(err.into())
        }
    }
}

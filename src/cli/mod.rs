pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "Lingo CLI - Command-line access to the Lingo admin and content APIs")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Session token (defaults to LINGO_TOKEN)")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint a development session token")]
    Token(commands::token::TokenArgs),

    #[command(about = "Admin payments API")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },

    #[command(about = "Lessons and unit tests from the content API")]
    Content {
        #[command(subcommand)]
        cmd: commands::content::ContentCommands,
    },

    #[command(about = "Show layout attributes for a locale")]
    Locale {
        #[arg(help = "Locale code, e.g. en or ar")]
        locale: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// `--text` wins when both flags are given
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json && !cli.text {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token(args) => commands::token::handle(args, output_format),
        Commands::Admin { cmd } => commands::admin::handle(cmd, cli.token, output_format).await,
        Commands::Content { cmd } => commands::content::handle(cmd, cli.token, output_format).await,
        Commands::Locale { locale } => commands::locale::handle(&locale, output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transactions_with_limit() {
        let cli = Cli::try_parse_from(["lingo", "--json", "admin", "transactions", "--limit", "10"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        assert!(matches!(
            cli.command,
            Commands::Admin {
                cmd: commands::admin::AdminCommands::Transactions { limit: Some(10) }
            }
        ));
    }

    #[test]
    fn text_output_is_the_default() {
        let cli = Cli::try_parse_from(["lingo", "locale", "ar"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Text));
        assert!(cli.token.is_none());
    }

    #[test]
    fn text_flag_overrides_json() {
        let cli = Cli::try_parse_from(["lingo", "--json", "--text", "locale", "en"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Text));
    }
}

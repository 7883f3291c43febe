pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "gestdocu")]
#[command(about = "GestDocu CLI - administration for the GestDocu API")]
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
    #[command(name = "init-db", about = "Create the database tables if they do not exist")]
    InitDb,

    #[command(about = "User account management")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Print the client/case/dossier/document hierarchy")]
    Hierarchy {
        #[arg(long, help = "Use the in-memory demo dataset instead of the database")]
        demo: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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
        Commands::InitDb => commands::db::init(output_format).await,
        Commands::User { cmd } => commands::user::handle(cmd, output_format).await,
        Commands::Hierarchy { demo } => commands::hierarchy::handle(demo, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_create() {
        let cli = Cli::try_parse_from([
            "gestdocu", "--json", "user", "create", "ana", "--password", "Xk9#vLp2q", "--email", "ana@example.com",
        ])
        .unwrap();
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::User {
                cmd: commands::user::UserCommands::Create { .. }
            }
        ));
    }

    #[test]
    fn parses_init_db_and_hierarchy() {
        let cli = Cli::try_parse_from(["gestdocu", "init-db"]).unwrap();
        assert!(matches!(cli.command, Commands::InitDb));
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Text);

        let cli = Cli::try_parse_from(["gestdocu", "hierarchy", "--demo"]).unwrap();
        assert!(matches!(cli.command, Commands::Hierarchy { demo: true }));
    }
}

// estate - operations CLI for the Estate API
//
// `key` mirrors POST /auth/key so realtor/admin accounts can be provisioned
// out-of-band without a running server.

use anyhow::Context;
use clap::{Parser, Subcommand};

use estate_api_rust::auth::product_key;
use estate_api_rust::database::manager::DatabaseManager;
use estate_api_rust::database::models::user::UserRole;

#[derive(Parser)]
#[command(name = "estate")]
#[command(about = "Estate CLI - provisioning and operations helpers for the Estate API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Generate a product key authorizing a privileged signup")]
    Key {
        #[arg(long, help = "Email the key is bound to")]
        email: String,
        #[arg(long, help = "Role the key is bound to (REALTOR or ADMIN)")]
        role: String,
    },

    #[command(about = "Apply pending database migrations")]
    Migrate,

    #[command(about = "Check a running server's health endpoint")]
    Health {
        #[arg(long, default_value = "http://127.0.0.1:3000", help = "Server base URL")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Commands::Key { email, role } => {
            let role: UserRole = role.parse().map_err(anyhow::Error::msg)?;
            let key = product_key::generate(&email, role)?;
            println!("{}", key);
        }

        Commands::Migrate => {
            DatabaseManager::run_migrations()
                .await
                .context("failed to apply migrations")?;
            println!("migrations applied");
        }

        Commands::Health { url } => {
            let response = reqwest::get(format!("{}/health", url))
                .await
                .with_context(|| format!("failed to reach {}", url))?;
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            println!("{} {}", status, body);
        }
    }

    Ok(())
}

use clap::Subcommand;
use serde_json::json;

use crate::cli::commands::open_database;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::services::UserService;
use crate::validation;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user")]
    Create {
        #[arg(help = "Email address (must be unique)")]
        email: String,
    },

    #[command(about = "List all users")]
    List,
}

pub async fn handle(cmd: UserCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let mut conn = db.pool().acquire().await?;

    match cmd {
        UserCommands::Create { email } => {
            let email = validation::user_email(&email)?;
            let user = UserService::create(&mut conn, &email).await?;
            match output_format {
                OutputFormat::Json => println!("{}", json!(user)),
                OutputFormat::Text => println!("Created user {} <{}>", user.id, user.email),
            }
        }
        UserCommands::List => {
            let users = UserService::list(&mut conn).await?;
            match output_format {
                OutputFormat::Json => println!("{}", json!(users)),
                OutputFormat::Text if users.is_empty() => println!("No users"),
                OutputFormat::Text => {
                    for user in &users {
                        println!("{:>6}  {}", user.id, user.email);
                    }
                }
            }
        }
    }

    drop(conn);
    db.close().await;
    Ok(())
}

//! Identity management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use claimdesk_core::config::AppConfig;
use claimdesk_core::error::AppError;
use claimdesk_database::{IdentityStore, Stores};
use claimdesk_entity::user::{User, UserFilter, UserRole, normalize_email};
use claimdesk_service::RegisterUser;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an identity
    Create {
        /// Login email
        #[arg(short, long)]
        email: Option<String>,
        /// Full name
        #[arg(short, long)]
        name: Option<String>,
        /// Role: admin, police, or insurance_agent
        #[arg(short, long, default_value = "admin")]
        role: UserRole,
        /// Company id, required for insurance agents
        #[arg(long)]
        company: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List identities
    List {
        /// Filter by role
        #[arg(short, long)]
        role: Option<UserRole>,
        /// Filter by company
        #[arg(long)]
        company: Option<String>,
    },
    /// Reactivate an identity
    Enable {
        /// Login email
        email: String,
    },
    /// Deactivate an identity
    Disable {
        /// Login email
        email: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    role: String,
    company: String,
    active: bool,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email.clone(),
            name: u.name.clone(),
            role: u.role.to_string(),
            company: u.company_id.clone().unwrap_or_default(),
            active: u.is_active,
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let stores = Stores::postgres(db.pool().clone());
    let identities = stores.identities.as_ref();

    match &args.command {
        UserCommand::Create {
            email,
            name,
            role,
            company,
            password,
        } => {
            let email = match email {
                Some(e) => e.clone(),
                None => prompt("Email")?,
            };
            let name = match name {
                Some(n) => n.clone(),
                None => prompt("Full name")?,
            };
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let admin = super::admin_service(config, stores.identities.clone())?;
            let user = admin
                .create(RegisterUser {
                    email,
                    password,
                    name,
                    role: *role,
                    company_id: company.clone(),
                })
                .await?;

            output::print_success(&format!(
                "{} '{}' created (id: {})",
                user.role, user.email, user.id
            ));
        }
        UserCommand::List { role, company } => {
            let filter = UserFilter {
                role: *role,
                company_id: company.clone(),
            };
            let users = identities.list(&filter).await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
        UserCommand::Enable { email } => {
            let user = set_active(identities, email, true).await?;
            output::print_success(&format!("User '{}' enabled", user.email));
        }
        UserCommand::Disable { email } => {
            let user = set_active(identities, email, false).await?;
            output::print_success(&format!("User '{}' disabled", user.email));
        }
    }

    db.close().await;
    Ok(())
}

async fn set_active(
    identities: &dyn IdentityStore,
    email: &str,
    active: bool,
) -> Result<User, AppError> {
    let user = identities
        .find_by_email(&normalize_email(email))
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;
    identities.set_active(user.id, active).await
}

fn prompt(label: &str) -> Result<String, AppError> {
    dialoguer::Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

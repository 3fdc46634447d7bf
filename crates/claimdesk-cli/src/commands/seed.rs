//! Demo identities for development and acceptance testing.

use std::sync::Arc;

use claimdesk_core::config::AppConfig;
use claimdesk_core::error::AppError;
use claimdesk_database::IdentityStore;
use claimdesk_database::Stores;
use claimdesk_database::migration::run_migrations;
use claimdesk_entity::user::{UserRole, normalize_email};
use claimdesk_service::{AdminUserService, RegisterUser};

use crate::output;

struct DemoIdentity {
    email: &'static str,
    password: &'static str,
    name: &'static str,
    role: UserRole,
    company_id: Option<&'static str>,
}

const DEMO_IDENTITIES: &[DemoIdentity] = &[
    DemoIdentity {
        email: "admin@raise.ke",
        password: "Admin@123",
        name: "System Administrator",
        role: UserRole::Admin,
        company_id: None,
    },
    DemoIdentity {
        email: "john.doe@kenyainsurance.co.ke",
        password: "Officer@123",
        name: "John Doe",
        role: UserRole::InsuranceAgent,
        company_id: Some("INS001"),
    },
    DemoIdentity {
        email: "jane.smith@kenyainsurance.co.ke",
        password: "Officer@123",
        name: "Jane Smith",
        role: UserRole::InsuranceAgent,
        company_id: Some("INS001"),
    },
    DemoIdentity {
        email: "michael.brown@eastafricainsurance.co.ke",
        password: "Officer@123",
        name: "Michael Brown",
        role: UserRole::InsuranceAgent,
        company_id: Some("INS002"),
    },
    DemoIdentity {
        email: "sarah.wilson@eastafricainsurance.co.ke",
        password: "Officer@123",
        name: "Sarah Wilson",
        role: UserRole::InsuranceAgent,
        company_id: Some("INS002"),
    },
    DemoIdentity {
        email: "officer1@police.go.ke",
        password: "Police@123",
        name: "James Kamau",
        role: UserRole::Police,
        company_id: None,
    },
    DemoIdentity {
        email: "officer2@police.go.ke",
        password: "Police@123",
        name: "Mary Wanjiku",
        role: UserRole::Police,
        company_id: None,
    },
    DemoIdentity {
        email: "officer3@police.go.ke",
        password: "Police@123",
        name: "Peter Ochieng",
        role: UserRole::Police,
        company_id: None,
    },
    DemoIdentity {
        email: "officer4@police.go.ke",
        password: "Police@123",
        name: "Grace Muthoni",
        role: UserRole::Police,
        company_id: None,
    },
];

/// Counts from one seeding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub created: usize,
    pub skipped: usize,
}

/// Insert every demo identity whose email is not registered yet.
pub async fn seed_identities(
    admin: &AdminUserService,
    identities: &dyn IdentityStore,
) -> Result<SeedSummary, AppError> {
    let mut summary = SeedSummary::default();

    for demo in DEMO_IDENTITIES {
        if identities
            .find_by_email(&normalize_email(demo.email))
            .await?
            .is_some()
        {
            summary.skipped += 1;
            continue;
        }

        admin
            .create(RegisterUser {
                email: demo.email.to_string(),
                password: demo.password.to_string(),
                name: demo.name.to_string(),
                role: demo.role,
                company_id: demo.company_id.map(String::from),
            })
            .await?;
        summary.created += 1;
    }

    tracing::info!(created = summary.created, skipped = summary.skipped, "Demo identities seeded");
    Ok(summary)
}

/// Seed the configured database.
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    run_migrations(db.pool()).await?;

    let stores = Stores::postgres(db.pool().clone());
    let admin = super::admin_service(config, Arc::clone(&stores.identities))?;
    let summary = seed_identities(&admin, stores.identities.as_ref()).await?;
    db.close().await;

    output::print_success(&format!(
        "Seeded {} identities ({} already present)",
        summary.created, summary.skipped
    ));
    Ok(())
}

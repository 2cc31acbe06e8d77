use std::sync::Arc;

use sqlx::PgPool;

use crate::planning::PlanningGenerator;
use crate::services::{EmailConfig, EmailService};

/// Shared application state. Every dependency is injected at startup;
/// handlers derive request-scoped services from it.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub generator: Arc<dyn PlanningGenerator>,
    email_service: Option<EmailService>,
}

impl AppState {
    pub fn new(db: PgPool, generator: Arc<dyn PlanningGenerator>) -> Self {
        let email_service = EmailConfig::from_env().map(EmailService::new);
        if email_service.is_none() {
            tracing::warn!("email non configuré, les invitations sont désactivées");
        }

        Self {
            db,
            generator,
            email_service,
        }
    }

    pub fn email_service(&self) -> Option<&EmailService> {
        self.email_service.as_ref()
    }
}

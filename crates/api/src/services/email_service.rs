use html_escape::encode_text;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error (status {status}): {body}")]
    ApiError { status: u16, body: String },
}

#[derive(Clone)]
pub struct EmailConfig {
    pub scw_secret_key: String,
    pub scw_project_id: String,
    pub scw_region: String,
    pub sender_email: String,
    pub sender_name: String,
    pub frontend_base_url: String,
}

impl EmailConfig {
    pub fn from_env() -> Option<Self> {
        let scw_secret_key = std::env::var("SCW_SECRET_KEY").ok()?;
        let scw_project_id = std::env::var("SCW_DEFAULT_PROJECT_ID").ok()?;
        let sender_email = std::env::var("SCW_SENDER_EMAIL").ok()?;

        Some(Self {
            scw_secret_key,
            scw_project_id,
            scw_region: std::env::var("SCW_REGION").unwrap_or_else(|_| "fr-par".to_string()),
            sender_email,
            sender_name: std::env::var("SCW_SENDER_NAME")
                .unwrap_or_else(|_| "Tournoi Planner".to_string()),
            frontend_base_url: std::env::var("FRONTEND_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        })
    }
}

/// Transactional email sender. Only used to invite unknown users looked up
/// by email.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
    client: reqwest::Client,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        html: &str,
        text: &str,
    ) -> Result<(), EmailError> {
        let url = format!(
            "https://api.scaleway.com/transactional-email/v1alpha1/regions/{}/emails",
            self.config.scw_region
        );

        let body = json!({
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name,
            },
            "to": [{ "email": to_email }],
            "subject": subject,
            "html": html,
            "text": text,
            "project_id": self.config.scw_project_id,
        });

        let response = self
            .client
            .post(&url)
            .header("X-Auth-Token", &self.config.scw_secret_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::ApiError { status, body });
        }

        info!("Email sent to {} ({})", to_email, subject);
        Ok(())
    }

    /// Invite someone who was looked up by email but has no profile yet.
    pub async fn send_invitation(&self, to_email: &str) -> Result<(), EmailError> {
        let signup_link = format!("{}/inscription", self.config.frontend_base_url);
        let safe_link = encode_text(&signup_link);

        let html = format!(
            "<p>Bonjour,</p>\
             <p>Un organisateur de tournoi souhaite vous ajouter à une équipe, mais aucun \
             compte n'existe pour cette adresse.</p>\
             <p><a href=\"{safe_link}\">Créez votre compte</a> pour rejoindre l'équipe.</p>"
        );
        let text = format!(
            "Bonjour,\n\nUn organisateur de tournoi souhaite vous ajouter à une équipe, \
             mais aucun compte n'existe pour cette adresse.\n\nCréez votre compte : {signup_link}"
        );

        self.send_email(to_email, "Invitation à rejoindre un tournoi", &html, &text)
            .await
    }
}

/// Fire-and-forget invitation helper. Logs errors but never fails.
pub fn spawn_invitation(email_service: EmailService, to_email: String) {
    tokio::spawn(async move {
        if let Err(e) = email_service.send_invitation(&to_email).await {
            warn!("Failed to send invitation to {}: {}", to_email, e);
        }
    });
}

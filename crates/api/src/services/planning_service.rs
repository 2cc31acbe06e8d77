use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use infra::db::Db;
use infra::models::{GeneratedMatchRow, PlanningRow, PouleRow};
use infra::repos::{
    generated_matches, plannings, poules, GeneratedMatchRepo, NewPlanning, PlanningRepo, PouleRepo,
};

use crate::error::AppError;
use crate::planning::{build_planning_prompt, normalize, PlanningGenerator};
use crate::services::tournament_service::{TournamentService, TournamentWithTeams};

pub const STATUS_GENERATED: &str = "generated";

#[derive(Debug, Serialize)]
pub struct PlanningWithDetails {
    pub planning: PlanningRow,
    pub matches: Vec<GeneratedMatchRow>,
    pub poules: Vec<PouleRow>,
}

/// Orchestrates planning generation: eligibility validation, AI invocation,
/// normalization, and the transactional persistence of the result.
#[derive(Clone)]
pub struct PlanningService {
    db: Db,
    generator: Arc<dyn PlanningGenerator>,
}

impl PlanningService {
    pub fn new(db: Db, generator: Arc<dyn PlanningGenerator>) -> Self {
        Self { db, generator }
    }

    /// Generate and persist a planning for one tournament.
    ///
    /// The planning row, its matches and its poules are written in a single
    /// transaction: either all of them land or none do. No uniqueness is
    /// enforced per tournament; a second call creates a second planning.
    pub async fn generate_planning(&self, tournament_id: Uuid) -> Result<PlanningRow, AppError> {
        let details = TournamentService::new(self.db.clone())
            .get_tournament_with_teams(tournament_id)
            .await?;

        validate_for_planning(&details)?;

        let prompt = build_planning_prompt(&details.tournament.tournament, &details.teams);
        let payload = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let normalized = normalize(&payload);
        let planning_data = serde_json::to_value(&payload)
            .map_err(|e| AppError::Internal(format!("serialisation du planning: {e}")))?;

        let new_planning = NewPlanning {
            tournament_id,
            type_tournoi: payload.type_tournoi().to_string(),
            status: STATUS_GENERATED.to_string(),
            planning_data,
            total_matches: normalized.matches.len() as i32,
            ai_comments: payload.commentaires().map(|c| c.to_string()),
        };

        let mut tx = self.db.begin().await?;
        let planning = plannings::insert_planning(&mut *tx, new_planning).await?;
        let matches =
            generated_matches::insert_matches(&mut *tx, planning.id, &normalized.matches).await?;
        let inserted_poules = poules::insert_poules(&mut *tx, planning.id, &normalized.poules).await?;
        tx.commit().await?;

        info!(
            planning_id = %planning.id,
            %tournament_id,
            matches = matches.len(),
            poules = inserted_poules.len(),
            "planning généré et persisté"
        );
        Ok(planning)
    }

    pub async fn get_planning_status(&self, planning_id: Uuid) -> Result<String, AppError> {
        PlanningRepo::new(self.db.clone())
            .get_status(planning_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Planning non trouvé".to_string()))
    }

    /// Delete the existing planning (matches and poules follow by cascade)
    /// and generate a fresh one for the same tournament.
    pub async fn regenerate_planning(&self, planning_id: Uuid) -> Result<PlanningRow, AppError> {
        let repo = PlanningRepo::new(self.db.clone());

        let existing = repo
            .get(planning_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Planning non trouvé".to_string()))?;

        repo.delete(planning_id).await?;
        info!(%planning_id, tournament_id = %existing.tournament_id, "ancien planning supprimé");

        self.generate_planning(existing.tournament_id).await
    }

    /// Planning + its matches (schedule order) + its poules. Empty match or
    /// poule lists are fine; only a missing planning row is an error.
    pub async fn get_planning_with_details(
        &self,
        planning_id: Uuid,
    ) -> Result<PlanningWithDetails, AppError> {
        let planning = PlanningRepo::new(self.db.clone())
            .get(planning_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Planning non trouvé".to_string()))?;

        let matches = GeneratedMatchRepo::new(self.db.clone())
            .list_by_planning(planning_id)
            .await?;
        let poules = PouleRepo::new(self.db.clone())
            .list_by_planning(planning_id)
            .await?;

        Ok(PlanningWithDetails {
            planning,
            matches,
            poules,
        })
    }

    /// Unconditional overwrite; no check that the transition is legal.
    pub async fn update_planning_status(
        &self,
        planning_id: Uuid,
        status: &str,
    ) -> Result<(), AppError> {
        let updated = PlanningRepo::new(self.db.clone())
            .update_status(planning_id, status)
            .await?;
        if !updated {
            return Err(AppError::NotFound("Planning non trouvé".to_string()));
        }

        info!(%planning_id, status, "statut du planning mis à jour");
        Ok(())
    }
}

/// Eligibility rules checked before the generator is ever invoked.
fn validate_for_planning(details: &TournamentWithTeams) -> Result<(), AppError> {
    let tournament = &details.tournament.tournament;

    if details.teams.len() < 2 {
        return Err(AppError::Validation(
            "Au moins 2 équipes sont nécessaires pour générer un planning".to_string(),
        ));
    }
    if details.teams.len() as i32 > tournament.max_teams {
        return Err(AppError::Validation(format!(
            "Trop d'équipes inscrites ({} > {})",
            details.teams.len(),
            tournament.max_teams
        )));
    }
    if tournament.courts_available <= 0 {
        return Err(AppError::Validation(
            "Nombre de terrains invalide".to_string(),
        ));
    }
    if tournament.tournament_type.is_empty() {
        return Err(AppError::Validation("Type de tournoi manquant".to_string()));
    }

    Ok(())
}

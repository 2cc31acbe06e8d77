use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

use infra::db::Db;
use infra::models::{TeamMemberRow, TeamMemberWithEmailRow, TeamRow, TournamentRow};
use infra::repos::{
    CreateTeamData, CreateTournamentData, NewTeamMember, TeamMemberRepo, TeamRepo, TournamentRepo,
};

use crate::error::AppError;

/// Tournament enriched with the derived team count (never stored).
#[derive(Debug, Clone, Serialize)]
pub struct TournamentWithCount {
    #[serde(flatten)]
    pub tournament: TournamentRow,
    pub registered_teams: i64,
}

#[derive(Debug, Serialize)]
pub struct TournamentWithTeams {
    pub tournament: TournamentWithCount,
    pub teams: Vec<TeamRow>,
    pub teams_count: i64,
    pub has_minimum_teams: bool,
    pub can_start: bool,
}

#[derive(Debug, Serialize)]
pub struct TeamWithMembers {
    #[serde(flatten)]
    pub team: TeamRow,
    pub members: Vec<TeamMemberWithEmailRow>,
}

/// CRUD over tournaments and teams plus the composed read paths.
#[derive(Clone)]
pub struct TournamentService {
    db: Db,
}

impl TournamentService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get_tournaments(&self) -> Result<Vec<TournamentWithCount>, AppError> {
        let tournaments = TournamentRepo::new(self.db.clone()).list().await?;

        let ids: Vec<Uuid> = tournaments.iter().map(|t| t.id).collect();
        let counts: HashMap<Uuid, i64> = TeamRepo::new(self.db.clone())
            .count_by_tournaments(&ids)
            .await?
            .into_iter()
            .collect();

        Ok(tournaments
            .into_iter()
            .map(|t| {
                let registered_teams = counts.get(&t.id).copied().unwrap_or(0);
                TournamentWithCount {
                    tournament: t,
                    registered_teams,
                }
            })
            .collect())
    }

    pub async fn get_tournament_by_id(&self, id: Uuid) -> Result<TournamentWithCount, AppError> {
        let tournament = TournamentRepo::new(self.db.clone())
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournoi non trouvé".to_string()))?;

        let registered_teams = TeamRepo::new(self.db.clone())
            .count_by_tournament(id)
            .await?;

        Ok(TournamentWithCount {
            tournament,
            registered_teams,
        })
    }

    pub async fn get_tournament_teams(&self, tournament_id: Uuid) -> Result<Vec<TeamRow>, AppError> {
        Ok(TeamRepo::new(self.db.clone())
            .list_by_tournament(tournament_id)
            .await?)
    }

    pub async fn create_tournament(
        &self,
        data: CreateTournamentData,
    ) -> Result<TournamentRow, AppError> {
        let tournament = TournamentRepo::new(self.db.clone()).create(data).await?;
        info!(tournament_id = %tournament.id, name = %tournament.name, "tournoi créé");
        Ok(tournament)
    }

    /// Tournament + its teams + the readiness flags used before planning.
    /// A tournament without any team is reported as not found, like a
    /// missing tournament.
    pub async fn get_tournament_with_teams(
        &self,
        id: Uuid,
    ) -> Result<TournamentWithTeams, AppError> {
        let tournament = self.get_tournament_by_id(id).await?;
        let teams = self.get_tournament_teams(id).await?;

        if teams.is_empty() {
            return Err(AppError::NotFound(
                "Aucune équipe inscrite à ce tournoi".to_string(),
            ));
        }

        let teams_count = teams.len() as i64;
        let has_minimum_teams = teams_count >= 2;
        let can_start = has_minimum_teams && tournament.tournament.status == "ready";

        Ok(TournamentWithTeams {
            tournament,
            teams,
            teams_count,
            has_minimum_teams,
            can_start,
        })
    }

    pub async fn update_tournament_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<TournamentRow, AppError> {
        let updated = TournamentRepo::new(self.db.clone())
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournoi non trouvé".to_string()))?;

        info!(tournament_id = %id, status, "statut du tournoi mis à jour");
        Ok(updated)
    }

    /// Create a team; when a captain is set, a membership row is added in an
    /// explicit second step. A failure of that step is logged and does not
    /// undo the team creation.
    pub async fn create_team(&self, data: CreateTeamData) -> Result<TeamRow, AppError> {
        let team = TeamRepo::new(self.db.clone()).create(data).await?;

        if let Some(captain_id) = team.captain_id {
            let membership = NewTeamMember {
                team_id: team.id,
                user_id: captain_id,
                role: "captain".to_string(),
                position: None,
                status: "active".to_string(),
            };
            match TeamMemberRepo::new(self.db.clone()).create(membership).await {
                Ok(_) => info!(team_id = %team.id, %captain_id, "capitaine ajouté à l'équipe"),
                Err(e) => {
                    warn!(team_id = %team.id, "ajout du capitaine échoué (équipe créée): {e}")
                }
            }
        }

        info!(team_id = %team.id, name = %team.name, "équipe créée");
        Ok(team)
    }

    pub async fn get_team_by_id(&self, id: Uuid) -> Result<TeamRow, AppError> {
        TeamRepo::new(self.db.clone())
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Équipe non trouvée".to_string()))
    }

    pub async fn delete_team_by_id(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = TeamRepo::new(self.db.clone()).delete(id).await?;
        if !deleted {
            return Err(AppError::NotFound("Équipe non trouvée".to_string()));
        }

        info!(team_id = %id, "équipe supprimée");
        Ok(())
    }

    pub async fn get_teams(&self, tournament_id: Option<Uuid>) -> Result<Vec<TeamRow>, AppError> {
        Ok(TeamRepo::new(self.db.clone()).list(tournament_id).await?)
    }

    /// Teams with their rosters, each member enriched with the profile email.
    pub async fn get_teams_with_members(
        &self,
        tournament_id: Option<Uuid>,
    ) -> Result<Vec<TeamWithMembers>, AppError> {
        let teams = self.get_teams(tournament_id).await?;
        let member_repo = TeamMemberRepo::new(self.db.clone());

        let mut result = Vec::with_capacity(teams.len());
        for team in teams {
            let members = member_repo.list_by_team_with_email(team.id).await?;
            result.push(TeamWithMembers { team, members });
        }

        Ok(result)
    }

    pub async fn add_team_members(
        &self,
        members: Vec<NewTeamMember>,
    ) -> Result<Vec<TeamMemberRow>, AppError> {
        let added = TeamMemberRepo::new(self.db.clone())
            .create_many(&members)
            .await?;

        info!(count = added.len(), "joueurs ajoutés à l'équipe");
        Ok(added)
    }
}

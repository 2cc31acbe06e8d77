mod common;

use common::*;
use serde_json::json;
use uuid::Uuid;

use api::error::AppError;
use api::services::TournamentService;
use infra::repos::{CreateTeamData, CreateTournamentData, TeamMemberRepo};

fn tournament_data(organizer_id: Uuid) -> CreateTournamentData {
    CreateTournamentData {
        name: "Tournoi de volley".to_string(),
        description: Some("Tournoi d'été".to_string()),
        tournament_type: "round_robin".to_string(),
        max_teams: 8,
        courts_available: 2,
        start_date: "2025-07-15".parse().unwrap(),
        start_time: Some("09:00:00".parse().unwrap()),
        match_duration_minutes: 15,
        break_duration_minutes: 5,
        constraints: json!({"indoor": true}),
        organizer_id,
        status: "draft".to_string(),
    }
}

fn team_data(tournament_id: Uuid, name: &str, captain_id: Option<Uuid>) -> CreateTeamData {
    CreateTeamData {
        name: name.to_string(),
        description: String::new(),
        tournament_id,
        captain_id,
        contact_email: String::new(),
        contact_phone: String::new(),
        skill_level: "amateur".to_string(),
        notes: String::new(),
    }
}

#[tokio::test]
async fn test_create_tournament_round_trip() {
    let app_state = setup_test_db().await;
    let service = TournamentService::new(app_state.db.clone());

    let organizer_id = create_test_profile(&app_state, "organizer").await;
    let data = tournament_data(organizer_id);

    let created = service.create_tournament(data.clone()).await.unwrap();

    assert_eq!(created.name, data.name);
    assert_eq!(created.description, data.description);
    assert_eq!(created.tournament_type, data.tournament_type);
    assert_eq!(created.max_teams, data.max_teams);
    assert_eq!(created.courts_available, data.courts_available);
    assert_eq!(created.start_date, data.start_date);
    assert_eq!(created.start_time, data.start_time);
    assert_eq!(created.match_duration_minutes, data.match_duration_minutes);
    assert_eq!(created.break_duration_minutes, data.break_duration_minutes);
    assert_eq!(created.constraints, data.constraints);
    assert_eq!(created.organizer_id, data.organizer_id);
    assert_eq!(created.status, "draft");

    let fetched = service.get_tournament_by_id(created.id).await.unwrap();
    assert_eq!(fetched.tournament.id, created.id);
    assert_eq!(fetched.registered_teams, 0);
}

#[tokio::test]
async fn test_with_teams_flags_require_two_teams() {
    let app_state = setup_test_db().await;
    let service = TournamentService::new(app_state.db.clone());

    let organizer_id = create_test_profile(&app_state, "organizer").await;
    let tournament_id =
        create_test_tournament(&app_state, organizer_id, "round_robin", "ready", 8).await;
    create_test_team(&app_state, tournament_id, "Équipe Solo").await;

    let details = service
        .get_tournament_with_teams(tournament_id)
        .await
        .unwrap();

    assert_eq!(details.teams_count, 1);
    assert!(!details.has_minimum_teams);
    // Even with status "ready", a single team is not enough.
    assert!(!details.can_start);
}

#[tokio::test]
async fn test_with_teams_can_start_when_ready() {
    let app_state = setup_test_db().await;
    let service = TournamentService::new(app_state.db.clone());

    let organizer_id = create_test_profile(&app_state, "organizer").await;
    let tournament_id =
        create_test_tournament(&app_state, organizer_id, "round_robin", "ready", 8).await;
    create_test_team(&app_state, tournament_id, "Équipe A").await;
    create_test_team(&app_state, tournament_id, "Équipe B").await;

    let details = service
        .get_tournament_with_teams(tournament_id)
        .await
        .unwrap();

    assert!(details.has_minimum_teams);
    assert!(details.can_start);
    // Teams come back ordered by name.
    assert_eq!(details.teams[0].name, "Équipe A");
    assert_eq!(details.teams[1].name, "Équipe B");
}

#[tokio::test]
async fn test_with_teams_missing_tournament_is_not_found() {
    let app_state = setup_test_db().await;
    let service = TournamentService::new(app_state.db.clone());

    let result = service.get_tournament_with_teams(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_create_team_with_captain_adds_membership() {
    let app_state = setup_test_db().await;
    let service = TournamentService::new(app_state.db.clone());

    let organizer_id = create_test_profile(&app_state, "organizer").await;
    let captain_id = create_test_profile(&app_state, "captain").await;
    let tournament_id =
        create_test_tournament(&app_state, organizer_id, "round_robin", "draft", 8).await;

    let team = service
        .create_team(team_data(tournament_id, "Équipe Capitaine", Some(captain_id)))
        .await
        .unwrap();

    let members = TeamMemberRepo::new(app_state.db.clone())
        .list_by_team(team.id)
        .await
        .unwrap();

    let captains: Vec<_> = members.iter().filter(|m| m.role == "captain").collect();
    assert_eq!(captains.len(), 1);
    assert_eq!(captains[0].user_id, captain_id);
    assert_eq!(captains[0].status, "active");
}

#[tokio::test]
async fn test_create_team_without_captain_has_no_members() {
    let app_state = setup_test_db().await;
    let service = TournamentService::new(app_state.db.clone());

    let organizer_id = create_test_profile(&app_state, "organizer").await;
    let tournament_id =
        create_test_tournament(&app_state, organizer_id, "round_robin", "draft", 8).await;

    let team = service
        .create_team(team_data(tournament_id, "Équipe Libre", None))
        .await
        .unwrap();

    let members = TeamMemberRepo::new(app_state.db.clone())
        .list_by_team(team.id)
        .await
        .unwrap();
    assert!(members.is_empty());
}

#[tokio::test]
async fn test_delete_team_cascades_members() {
    let app_state = setup_test_db().await;
    let service = TournamentService::new(app_state.db.clone());

    let organizer_id = create_test_profile(&app_state, "organizer").await;
    let captain_id = create_test_profile(&app_state, "captain").await;
    let tournament_id =
        create_test_tournament(&app_state, organizer_id, "round_robin", "draft", 8).await;

    let team = service
        .create_team(team_data(tournament_id, "Équipe Éphémère", Some(captain_id)))
        .await
        .unwrap();

    service.delete_team_by_id(team.id).await.unwrap();

    let result = service.get_team_by_id(team.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let members = TeamMemberRepo::new(app_state.db.clone())
        .list_by_team(team.id)
        .await
        .unwrap();
    assert!(members.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_team_is_not_found() {
    let app_state = setup_test_db().await;
    let service = TournamentService::new(app_state.db.clone());

    let result = service.delete_team_by_id(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_teams_with_members_carry_profile_email() {
    let app_state = setup_test_db().await;
    let service = TournamentService::new(app_state.db.clone());

    let organizer_id = create_test_profile(&app_state, "organizer").await;
    let captain_id = create_test_profile(&app_state, "captain.roster").await;
    let tournament_id =
        create_test_tournament(&app_state, organizer_id, "round_robin", "draft", 8).await;

    service
        .create_team(team_data(tournament_id, "Équipe Roster", Some(captain_id)))
        .await
        .unwrap();

    let teams = service
        .get_teams_with_members(Some(tournament_id))
        .await
        .unwrap();

    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].members.len(), 1);
    assert!(teams[0].members[0].email.contains("captain.roster"));
}

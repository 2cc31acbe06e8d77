mod common;

use std::sync::Arc;

use common::*;
use uuid::Uuid;

use api::error::AppError;
use api::services::PlanningService;
use infra::repos::{GeneratedMatchRepo, PouleRepo};

async fn seeded_tournament(app_state: &api::AppState, teams: usize) -> Uuid {
    let organizer_id = create_test_profile(app_state, "organizer").await;
    let tournament_id =
        create_test_tournament(app_state, organizer_id, "round_robin", "ready", 8).await;
    for i in 0..teams {
        create_test_team(app_state, tournament_id, &format!("Équipe {}", i + 1)).await;
    }
    tournament_id
}

#[tokio::test]
async fn test_generate_planning_round_robin() {
    let app_state = setup_test_db().await;
    let tournament_id = seeded_tournament(&app_state, 2).await;

    let planner = Arc::new(CountingPlanner::round_robin(1));
    let service = PlanningService::new(app_state.db.clone(), planner.clone());

    let planning = service.generate_planning(tournament_id).await.unwrap();

    assert_eq!(planning.tournament_id, tournament_id);
    assert_eq!(planning.type_tournoi, "round_robin");
    assert_eq!(planning.status, "generated");
    assert_eq!(planning.total_matches, 1);
    assert_eq!(planning.ai_comments.as_deref(), Some("Planning de test"));
    assert_eq!(planner.calls(), 1);

    let details = service.get_planning_with_details(planning.id).await.unwrap();
    assert_eq!(details.matches.len(), 1);
    assert_eq!(details.matches[0].phase, "round_robin");
    assert_eq!(details.matches[0].journee, Some(1));
    assert!(details.poules.is_empty());
}

#[tokio::test]
async fn test_generate_planning_needs_two_teams() {
    let app_state = setup_test_db().await;
    let tournament_id = seeded_tournament(&app_state, 1).await;

    let planner = Arc::new(CountingPlanner::round_robin(1));
    let service = PlanningService::new(app_state.db.clone(), planner.clone());

    let result = service.generate_planning(tournament_id).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    // The generator must never be invoked for an ineligible tournament.
    assert_eq!(planner.calls(), 0);
}

#[tokio::test]
async fn test_generate_planning_unknown_tournament() {
    let app_state = setup_test_db().await;

    let planner = Arc::new(CountingPlanner::round_robin(1));
    let service = PlanningService::new(app_state.db.clone(), planner.clone());

    let result = service.generate_planning(Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(planner.calls(), 0);
}

#[tokio::test]
async fn test_generate_planning_too_many_teams() {
    let app_state = setup_test_db().await;
    let organizer_id = create_test_profile(&app_state, "organizer").await;
    let tournament_id =
        create_test_tournament(&app_state, organizer_id, "round_robin", "ready", 2).await;
    for i in 0..3 {
        create_test_team(&app_state, tournament_id, &format!("Équipe {}", i + 1)).await;
    }

    let planner = Arc::new(CountingPlanner::round_robin(1));
    let service = PlanningService::new(app_state.db.clone(), planner.clone());

    let result = service.generate_planning(tournament_id).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(planner.calls(), 0);
}

#[tokio::test]
async fn test_generator_failure_persists_nothing() {
    let app_state = setup_test_db().await;
    let tournament_id = seeded_tournament(&app_state, 2).await;

    let service = PlanningService::new(app_state.db.clone(), Arc::new(FailingPlanner));

    let result = service.generate_planning(tournament_id).await;
    assert!(matches!(result, Err(AppError::Upstream(_))));

    let plannings = infra::repos::PlanningRepo::new(app_state.db.clone())
        .list_by_tournament(tournament_id)
        .await
        .unwrap();
    assert!(plannings.is_empty());
}

#[tokio::test]
async fn test_generate_twice_creates_two_plannings() {
    let app_state = setup_test_db().await;
    let tournament_id = seeded_tournament(&app_state, 2).await;

    let planner = Arc::new(CountingPlanner::round_robin(1));
    let service = PlanningService::new(app_state.db.clone(), planner.clone());

    let first = service.generate_planning(tournament_id).await.unwrap();
    let second = service.generate_planning(tournament_id).await.unwrap();

    // No dedup: each call creates its own planning with its own matches.
    assert_ne!(first.id, second.id);

    let match_repo = GeneratedMatchRepo::new(app_state.db.clone());
    assert_eq!(match_repo.list_by_planning(first.id).await.unwrap().len(), 1);
    assert_eq!(match_repo.list_by_planning(second.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_generate_planning_with_poules() {
    let app_state = setup_test_db().await;
    let tournament_id = seeded_tournament(&app_state, 2).await;

    let planner = Arc::new(CountingPlanner::new(poules_payload()));
    let service = PlanningService::new(app_state.db.clone(), planner.clone());

    let planning = service.generate_planning(tournament_id).await.unwrap();

    assert_eq!(planning.type_tournoi, "poules_elimination");
    // One pool match + the finale.
    assert_eq!(planning.total_matches, 2);

    let details = service.get_planning_with_details(planning.id).await.unwrap();
    assert_eq!(details.poules.len(), 1);
    assert_eq!(details.poules[0].nb_equipes, 2);
    assert_eq!(details.poules[0].nb_matches, 1);

    let phases: Vec<&str> = details.matches.iter().map(|m| m.phase.as_str()).collect();
    assert!(phases.contains(&"poules"));
    assert!(phases.contains(&"finale"));

    // Bracket opponents stay symbolic; they are never resolved to teams.
    let finale = details
        .matches
        .iter()
        .find(|m| m.phase == "finale")
        .unwrap();
    assert_eq!(finale.equipe_a, "1er_poule_a");
    assert!(finale.poule_id.is_none());
}

#[tokio::test]
async fn test_planning_status_lifecycle() {
    let app_state = setup_test_db().await;
    let tournament_id = seeded_tournament(&app_state, 2).await;

    let planner = Arc::new(CountingPlanner::round_robin(2));
    let service = PlanningService::new(app_state.db.clone(), planner.clone());

    let planning = service.generate_planning(tournament_id).await.unwrap();

    let status = service.get_planning_status(planning.id).await.unwrap();
    assert_eq!(status, "generated");

    // The overwrite is deliberately permissive: any string is accepted.
    service
        .update_planning_status(planning.id, "statut_inconnu")
        .await
        .unwrap();
    let status = service.get_planning_status(planning.id).await.unwrap();
    assert_eq!(status, "statut_inconnu");
}

#[tokio::test]
async fn test_planning_status_unknown_id_is_not_found() {
    let app_state = setup_test_db().await;

    let service = PlanningService::new(app_state.db.clone(), Arc::new(FailingPlanner));

    let result = service.get_planning_status(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_regenerate_unknown_planning_is_not_found() {
    let app_state = setup_test_db().await;

    let planner = Arc::new(CountingPlanner::round_robin(1));
    let service = PlanningService::new(app_state.db.clone(), planner.clone());

    let result = service.regenerate_planning(Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    // Nothing was deleted and nothing was generated.
    assert_eq!(planner.calls(), 0);
}

#[tokio::test]
async fn test_regenerate_replaces_planning_and_rows() {
    let app_state = setup_test_db().await;
    let tournament_id = seeded_tournament(&app_state, 2).await;

    let planner = Arc::new(CountingPlanner::round_robin(1));
    let service = PlanningService::new(app_state.db.clone(), planner.clone());

    let old = service.generate_planning(tournament_id).await.unwrap();
    let new = service.regenerate_planning(old.id).await.unwrap();

    assert_ne!(old.id, new.id);
    assert_eq!(new.tournament_id, tournament_id);

    // The old planning is gone, together with its matches and poules.
    let result = service.get_planning_with_details(old.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let match_repo = GeneratedMatchRepo::new(app_state.db.clone());
    assert!(match_repo.list_by_planning(old.id).await.unwrap().is_empty());
    let poule_repo = PouleRepo::new(app_state.db.clone());
    assert!(poule_repo.list_by_planning(old.id).await.unwrap().is_empty());

    assert_eq!(match_repo.list_by_planning(new.id).await.unwrap().len(), 1);
}

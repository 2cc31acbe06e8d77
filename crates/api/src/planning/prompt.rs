use infra::models::{TeamRow, TournamentRow};

/// Contract fixed for the model: strict JSON, discriminated by
/// `type_tournoi`, shapes matching the payload module.
pub const SYSTEM_PROMPT: &str = "\
Tu es un assistant specialise dans la planification de tournois sportifs.\n\
Tu reponds UNIQUEMENT avec un objet JSON valide, sans texte autour.\n\
\n\
Pour un tournoi \"round_robin\", le JSON a la forme :\n\
{\n\
  \"type_tournoi\": \"round_robin\",\n\
  \"matchs_round_robin\": [\n\
    {\"match_id\": \"rr_j1_m1\", \"equipe_a\": \"...\", \"equipe_b\": \"...\",\n\
     \"terrain\": 1, \"horaire\": \"2024-06-15T09:00:00Z\", \"journee\": 1}\n\
  ],\n\
  \"final_ranking\": [],\n\
  \"commentaires\": \"...\"\n\
}\n\
\n\
Pour un tournoi \"poules_elimination\", le JSON a la forme :\n\
{\n\
  \"type_tournoi\": \"poules_elimination\",\n\
  \"poules\": [\n\
    {\"poule_id\": \"poule_a\", \"nom_poule\": \"Poule A\",\n\
     \"equipes\": [\"...\"],\n\
     \"matchs\": [{\"match_id\": \"poule_a_m1\", \"equipe_a\": \"...\",\n\
                  \"equipe_b\": \"...\", \"terrain\": 1,\n\
                  \"horaire\": \"2024-06-15T09:00:00Z\"}]}\n\
  ],\n\
  \"phase_elimination_apres_poules\": {\n\
    \"demi_finale_1\": {\"match_id\": \"demi_1\", \"equipe_a\": \"1er_poule_a\",\n\
                       \"equipe_b\": \"2e_poule_b\", \"terrain\": 1,\n\
                       \"horaire\": \"2024-06-15T15:00:00Z\"},\n\
    \"finale\": {\"match_id\": \"finale_1\", \"equipe_a\": \"winner_demi_1\",\n\
                \"equipe_b\": \"winner_demi_2\", \"terrain\": 1,\n\
                \"horaire\": \"2024-06-15T17:00:00Z\"}\n\
  },\n\
  \"final_ranking\": [],\n\
  \"commentaires\": \"...\"\n\
}\n\
\n\
Les equipes dont l'identite depend d'un resultat precedent sont designees\n\
par un jeton symbolique (\"1er_poule_a\", \"winner_demi_1\"), jamais inventees.\n\
Les horaires sont au format ISO 8601 UTC et respectent la duree des matchs,\n\
les pauses et le nombre de terrains.";

/// Build the user prompt from the tournament configuration and its teams.
pub fn build_planning_prompt(tournament: &TournamentRow, teams: &[TeamRow]) -> String {
    let team_names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();

    let mut prompt = format!(
        "Genere le planning du tournoi suivant :\n\
         - Nom : {name}\n\
         - Type : {tournament_type}\n\
         - Equipes ({count}) : {teams}\n\
         - Terrains disponibles : {courts}\n\
         - Date de debut : {date}\n",
        name = tournament.name,
        tournament_type = tournament.tournament_type,
        count = team_names.len(),
        teams = team_names.join(", "),
        courts = tournament.courts_available,
        date = tournament.start_date,
    );

    if let Some(start_time) = tournament.start_time {
        prompt.push_str(&format!("- Heure de debut : {start_time}\n"));
    }

    prompt.push_str(&format!(
        "- Duree d'un match : {} minutes\n- Pause entre matchs : {} minutes\n",
        tournament.match_duration_minutes, tournament.break_duration_minutes,
    ));

    if let Some(constraints) = tournament.constraints.as_object() {
        if !constraints.is_empty() {
            prompt.push_str(&format!(
                "- Contraintes : {}\n",
                serde_json::Value::Object(constraints.clone())
            ));
        }
    }

    prompt.push_str("\nRetourne uniquement le JSON selon ton format habituel.");
    prompt
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Planning payload produced by the AI collaborator, discriminated by
/// `type_tournoi`. Unknown discriminants fail decoding and are reported as
/// an upstream failure by the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type_tournoi")]
pub enum AiPlanningData {
    #[serde(rename = "round_robin")]
    RoundRobin(RoundRobinPlanning),
    #[serde(rename = "poules_elimination")]
    PoulesElimination(PoulesPlanning),
}

impl AiPlanningData {
    pub fn type_tournoi(&self) -> &'static str {
        match self {
            AiPlanningData::RoundRobin(_) => "round_robin",
            AiPlanningData::PoulesElimination(_) => "poules_elimination",
        }
    }

    pub fn commentaires(&self) -> Option<&str> {
        match self {
            AiPlanningData::RoundRobin(p) => p.commentaires.as_deref(),
            AiPlanningData::PoulesElimination(p) => p.commentaires.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRobinPlanning {
    #[serde(default, deserialize_with = "lenient_items")]
    pub matchs_round_robin: Vec<AiMatch>,
    #[serde(default)]
    pub final_ranking: Vec<serde_json::Value>,
    #[serde(default)]
    pub commentaires: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoulesPlanning {
    #[serde(default, deserialize_with = "lenient_items")]
    pub poules: Vec<AiPoule>,
    /// Round name ("finale", "demi_finale_1", ...) to match, in payload
    /// order. Entries are decoded leniently by the normalizer.
    #[serde(default)]
    pub phase_elimination_apres_poules: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub final_ranking: Vec<serde_json::Value>,
    #[serde(default)]
    pub commentaires: Option<String>,
}

/// One scheduled match as the AI describes it. Team fields are names or
/// symbolic tokens ("1er_poule_a", "winner_demi_1") and are never resolved
/// to team ids here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiMatch {
    pub match_id: String,
    pub equipe_a: String,
    pub equipe_b: String,
    pub terrain: i32,
    pub horaire: DateTime<Utc>,
    #[serde(default)]
    pub journee: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiPoule {
    pub poule_id: String,
    pub nom_poule: String,
    #[serde(default)]
    pub equipes: Vec<String>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub matchs: Vec<AiMatch>,
}

/// Per-record tolerant list decoding: an undecodable entry is logged and
/// skipped, it never aborts the batch.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    let mut items = Vec::with_capacity(raw.len());
    for value in raw {
        match serde_json::from_value::<T>(value) {
            Ok(item) => items.push(item),
            Err(e) => tracing::warn!("entree de planning invalide ignoree: {e}"),
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_round_robin_payload() {
        let value = json!({
            "type_tournoi": "round_robin",
            "matchs_round_robin": [
                {
                    "match_id": "rr_j1_m1",
                    "equipe_a": "Équipe 1",
                    "equipe_b": "Équipe 2",
                    "terrain": 1,
                    "horaire": "2024-06-15T09:00:00Z",
                    "journee": 1
                },
                {
                    "match_id": "rr_j1_m2",
                    "equipe_a": "Équipe 3",
                    "equipe_b": "Équipe 4",
                    "terrain": 2,
                    "horaire": "2024-06-15T09:00:00Z",
                    "journee": 1
                }
            ],
            "commentaires": "Planning test round robin"
        });

        let payload: AiPlanningData = serde_json::from_value(value).unwrap();
        let AiPlanningData::RoundRobin(plan) = payload else {
            panic!("expected round robin variant");
        };
        assert_eq!(plan.matchs_round_robin.len(), 2);
        assert_eq!(plan.matchs_round_robin[0].match_id, "rr_j1_m1");
        assert_eq!(plan.matchs_round_robin[0].journee, Some(1));
        assert_eq!(plan.commentaires.as_deref(), Some("Planning test round robin"));
    }

    #[test]
    fn decodes_poules_payload_with_bracket() {
        let value = json!({
            "type_tournoi": "poules_elimination",
            "poules": [
                {
                    "poule_id": "poule_a",
                    "nom_poule": "Poule A",
                    "equipes": ["Équipe 1", "Équipe 2"],
                    "matchs": [
                        {
                            "match_id": "poule_a_m1",
                            "equipe_a": "Équipe 1",
                            "equipe_b": "Équipe 2",
                            "terrain": 1,
                            "horaire": "2024-06-15T09:00:00Z"
                        }
                    ]
                }
            ],
            "phase_elimination_apres_poules": {
                "finale": {
                    "match_id": "finale_1",
                    "equipe_a": "1er_poule_a",
                    "equipe_b": "1er_poule_b",
                    "terrain": 1,
                    "horaire": "2024-06-15T15:00:00Z"
                }
            }
        });

        let payload: AiPlanningData = serde_json::from_value(value).unwrap();
        assert_eq!(payload.type_tournoi(), "poules_elimination");
        let AiPlanningData::PoulesElimination(plan) = payload else {
            panic!("expected poules variant");
        };
        assert_eq!(plan.poules.len(), 1);
        assert_eq!(plan.poules[0].equipes.len(), 2);
        assert_eq!(plan.phase_elimination_apres_poules.len(), 1);
        assert!(plan.commentaires.is_none());
    }

    #[test]
    fn invalid_match_entry_is_skipped_not_fatal() {
        let value = json!({
            "type_tournoi": "round_robin",
            "matchs_round_robin": [
                {
                    "match_id": "rr_j1_m1",
                    "equipe_a": "Équipe 1",
                    "equipe_b": "Équipe 2",
                    "terrain": 1,
                    "horaire": "2024-06-15T09:00:00Z"
                },
                { "match_id": "broken" }
            ]
        });

        let payload: AiPlanningData = serde_json::from_value(value).unwrap();
        let AiPlanningData::RoundRobin(plan) = payload else {
            panic!("expected round robin variant");
        };
        assert_eq!(plan.matchs_round_robin.len(), 1);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let payload: AiPlanningData =
            serde_json::from_value(json!({ "type_tournoi": "round_robin" })).unwrap();
        let AiPlanningData::RoundRobin(plan) = payload else {
            panic!("expected round robin variant");
        };
        assert!(plan.matchs_round_robin.is_empty());
    }

    #[test]
    fn unknown_discriminant_is_an_error() {
        let result: Result<AiPlanningData, _> =
            serde_json::from_value(json!({ "type_tournoi": "suisse" }));
        assert!(result.is_err());
    }
}

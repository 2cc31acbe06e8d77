use infra::repos::{NewGeneratedMatch, NewPoule};

use super::payload::{AiMatch, AiPlanningData};

pub const PHASE_ROUND_ROBIN: &str = "round_robin";
pub const PHASE_POULES: &str = "poules";

/// Relational shape of a planning payload, ready for batch insertion.
#[derive(Debug, Default)]
pub struct NormalizedPlanning {
    pub matches: Vec<NewGeneratedMatch>,
    pub poules: Vec<NewPoule>,
}

/// Flatten the polymorphic AI payload into match and poule records.
///
/// Phases are emitted in a fixed precedence (round_robin, then poules, then
/// the elimination bracket) and the payload's own ordering is preserved
/// inside each phase, so insert order is deterministic. Team references stay
/// opaque strings; symbolic tokens like "1er_poule_a" are not resolved here.
pub fn normalize(payload: &AiPlanningData) -> NormalizedPlanning {
    let mut normalized = NormalizedPlanning::default();

    match payload {
        AiPlanningData::RoundRobin(plan) => {
            for m in &plan.matchs_round_robin {
                normalized
                    .matches
                    .push(to_match(m, PHASE_ROUND_ROBIN, None));
            }
        }
        AiPlanningData::PoulesElimination(plan) => {
            for poule in &plan.poules {
                normalized.poules.push(NewPoule {
                    poule_id: poule.poule_id.clone(),
                    nom_poule: poule.nom_poule.clone(),
                    equipes: poule.equipes.clone(),
                    nb_equipes: poule.equipes.len() as i32,
                    nb_matches: poule.matchs.len() as i32,
                });

                for m in &poule.matchs {
                    normalized
                        .matches
                        .push(to_match(m, PHASE_POULES, Some(poule.poule_id.clone())));
                }
            }

            // Bracket entries are keyed by round name; the key becomes the
            // phase. Undecodable entries are skipped, not fatal.
            for (round, value) in &plan.phase_elimination_apres_poules {
                match serde_json::from_value::<AiMatch>(value.clone()) {
                    Ok(m) => normalized.matches.push(to_match(&m, round, None)),
                    Err(e) => {
                        tracing::warn!("match d'elimination invalide ignore ({round}): {e}")
                    }
                }
            }
        }
    }

    normalized
}

fn to_match(m: &AiMatch, phase: &str, poule_id: Option<String>) -> NewGeneratedMatch {
    NewGeneratedMatch {
        match_id_ai: m.match_id.clone(),
        equipe_a: m.equipe_a.clone(),
        equipe_b: m.equipe_b.clone(),
        terrain: m.terrain,
        horaire_prevu: m.horaire,
        phase: phase.to_string(),
        journee: m.journee,
        poule_id,
    }
}

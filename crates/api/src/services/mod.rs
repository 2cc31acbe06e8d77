pub mod email_service;
pub mod planning_service;
pub mod tournament_service;

pub use email_service::{spawn_invitation, EmailConfig, EmailService};
pub use planning_service::{PlanningService, PlanningWithDetails};
pub use tournament_service::{
    TeamWithMembers, TournamentService, TournamentWithCount, TournamentWithTeams,
};

pub mod generated_matches;
pub mod plannings;
pub mod poules;
pub mod profiles;
pub mod team_members;
pub mod teams;
pub mod tournaments;

pub use generated_matches::{GeneratedMatchRepo, NewGeneratedMatch};
pub use plannings::{NewPlanning, PlanningRepo};
pub use poules::{NewPoule, PouleRepo};
pub use profiles::ProfileRepo;
pub use team_members::{NewTeamMember, TeamMemberRepo};
pub use teams::{CreateTeamData, TeamRepo};
pub use tournaments::{CreateTournamentData, TournamentRepo};

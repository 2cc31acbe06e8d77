pub mod generator;
pub mod normalizer;
pub mod payload;
pub mod prompt;

pub use generator::{GeneratorError, OpenAiConfig, OpenAiPlanner, PlanningGenerator};
pub use normalizer::{normalize, NormalizedPlanning};
pub use payload::{AiMatch, AiPlanningData, AiPoule};
pub use prompt::build_planning_prompt;

pub mod idea;
pub mod results;

pub use idea::IdeaText;
pub use results::{PlanResult, RoastResult};

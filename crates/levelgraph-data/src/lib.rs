pub mod loader;
pub mod plan;
pub mod schema;

pub use loader::{DataLoadError, Format};
pub use plan::{LevelingPlan, load_plan, parse_plan};

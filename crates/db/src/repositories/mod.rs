//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod scenario_repo;
pub mod user_repo;
pub mod user_scenario_repo;

pub use scenario_repo::ScenarioRepo;
pub use user_repo::UserRepo;
pub use user_scenario_repo::UserScenarioRepo;

pub mod constants;
pub mod elo_model;
pub mod prediction_tracker;
pub mod rating_tracker;
pub mod rating_update;
pub mod registry;
pub mod structures;
pub mod team_resolver;

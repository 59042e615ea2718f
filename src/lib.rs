pub mod args;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod results;
pub mod runner;
pub mod utils;

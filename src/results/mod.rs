pub mod loader;
pub mod result_structs;
pub mod tournament_parser;

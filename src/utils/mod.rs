pub mod progress_utils;
pub mod state_names;
pub mod test_utils;

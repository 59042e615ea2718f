use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Science Olympiad competition division. Each division is rated independently.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Division {
    B,
    C
}

impl Division {
    /// Result files for a division end in `_<division>.yaml`, e.g. `2024-02-03_mit_invitational_c.yaml`.
    pub fn file_suffix(&self) -> String {
        format!("_{}.yaml", self.to_string().to_lowercase())
    }

    /// Output directory name, e.g. `statesC`.
    pub fn output_dir_name(&self) -> String {
        format!("states{}", self)
    }
}

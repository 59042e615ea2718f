pub mod category_rating;
pub mod division;
pub mod history_entry;
pub mod participant;
pub mod ranking_entry;
pub mod rating_key;
pub mod team_meta;
pub mod tie_score;
pub mod tournament_descriptor;
pub mod tournament_kind;
pub mod tournament_record;

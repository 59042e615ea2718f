use serde::{Deserialize, Serialize};

/// One tournament result document as published on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentDocument {
    #[serde(rename = "Tournament")]
    pub tournament: Option<TournamentInfo>,
    #[serde(rename = "Teams", default)]
    pub teams: Vec<Team>,
    #[serde(rename = "Events", default)]
    pub events: Vec<Event>,
    #[serde(rename = "Placings", default)]
    pub placings: Vec<Placing>
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TournamentInfo {
    pub name: Option<String>,
    #[serde(rename = "start date")]
    pub start_date: Option<String>,
    pub year: Option<SeasonYear>,
    /// e.g. `Nationals`, `States`, `Invitational`
    pub level: Option<String>
}

/// `year` is usually an integer but some files quote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeasonYear {
    Number(i64),
    Text(String)
}

impl SeasonYear {
    pub fn as_season(&self) -> Option<String> {
        match self {
            SeasonYear::Number(year) => Some(year.to_string()),
            SeasonYear::Text(text) => {
                let trimmed = text.trim();
                trimmed.parse::<i64>().ok().map(|year| year.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub number: i64,
    pub school: String,
    pub state: Option<String>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub name: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placing {
    pub team: i64,
    pub event: String,
    pub place: Option<u32>
}

impl Placing {
    /// A place of 0 is treated the same as no place at all.
    pub fn scored_place(&self) -> Option<u32> {
        self.place.filter(|place| *place > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{SeasonYear, TournamentDocument};

    #[test]
    fn test_parse_document() {
        let yaml = r#"
Tournament:
  name: MIT Invitational
  start date: 2024-01-27
  year: 2024
  level: Invitational
Teams:
  - number: 1
    school: Troy High School
    state: CA
  - number: 2
    school: Solon High School
    state: OH
Events:
  - name: Anatomy and Physiology
Placings:
  - team: 1
    event: Anatomy and Physiology
    place: 1
  - team: 2
    event: Anatomy and Physiology
    place: null
"#;

        let document: TournamentDocument = serde_yaml::from_str(yaml).unwrap();
        let info = document.tournament.unwrap();

        assert_eq!(info.name.as_deref(), Some("MIT Invitational"));
        assert_eq!(info.start_date.as_deref(), Some("2024-01-27"));
        assert_eq!(info.year, Some(SeasonYear::Number(2024)));
        assert_eq!(document.teams.len(), 2);
        assert_eq!(document.placings[0].scored_place(), Some(1));
        assert_eq!(document.placings[1].scored_place(), None);
    }

    #[test]
    fn test_quoted_year() {
        assert_eq!(SeasonYear::Text(" 2019 ".to_string()).as_season(), Some("2019".to_string()));
        assert_eq!(SeasonYear::Text("next".to_string()).as_season(), None);
    }
}

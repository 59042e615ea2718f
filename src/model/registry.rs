use indexmap::IndexSet;

/// Interning tables for team, event and tournament names. An id is the name's
/// insertion index, so ids are dense, stable for the run and never reused.
///
/// One registry is owned per division run; nothing here is global.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    teams: IndexSet<String>,
    events: IndexSet<String>,
    tournaments: IndexSet<String>
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn team_id(&mut self, name: &str) -> usize {
        intern(&mut self.teams, name)
    }

    pub fn event_id(&mut self, name: &str) -> usize {
        intern(&mut self.events, name)
    }

    pub fn tournament_id(&mut self, name: &str) -> usize {
        intern(&mut self.tournaments, name)
    }

    pub fn tournament_name(&self, id: usize) -> Option<&str> {
        self.tournaments.get_index(id).map(String::as_str)
    }

    pub fn teams(&self) -> Vec<String> {
        self.teams.iter().cloned().collect()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.iter().cloned().collect()
    }

    pub fn tournaments(&self) -> Vec<String> {
        self.tournaments.iter().cloned().collect()
    }
}

fn intern(set: &mut IndexSet<String>, name: &str) -> usize {
    match set.get_index_of(name) {
        Some(id) => id,
        None => set.insert_full(name.to_owned()).0
    }
}

use std::{fs, path::Path, sync::Once};

static INIT: Once = Once::new();

/// Initialize test environment with RUST_LOG=WARN
pub fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("RUST_LOG", "warn");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Writes a result file with one event. `teams` is `(school, state, place)`,
/// numbered from 1 in the order given; a `None` place is a no-show.
pub fn write_result_file(dir: &Path, filename: &str, level: &str, teams: &[(&str, &str, Option<u32>)]) {
    let mut yaml = format!(
        "Tournament:\n  name: {}\n  year: 2024\n  level: {}\nTeams:\n",
        filename.replace('_', " "),
        level
    );
    for (i, (school, state, _)) in teams.iter().enumerate() {
        yaml.push_str(&format!("  - number: {}\n    school: {}\n    state: {}\n", i + 1, school, state));
    }
    yaml.push_str("Events:\n  - name: Anatomy\nPlacings:\n");
    for (i, (_, _, place)) in teams.iter().enumerate() {
        let place = place.map(|p| p.to_string()).unwrap_or_else(|| "null".to_string());
        yaml.push_str(&format!("  - team: {}\n    event: Anatomy\n    place: {}\n", i + 1, place));
    }

    fs::write(dir.join(format!("{}.yaml", filename)), yaml).unwrap();
}

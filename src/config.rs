use std::{fs, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProcessorError, Result};

/// Every tunable of the rating engine plus the run-mode switches.
///
/// Values are layered: [`Config::default`], then an optional JSON file
/// (see [`Config::from_file`]), then command-line overrides
/// (see [`Config::set`]). Later layers win.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub starting_elo: f64,
    pub elo_floor: f64,
    /// Controls the magnitude of rating changes. Higher is more volatile.
    pub elo_performance_scaling_factor: f64,
    /// Slope of the competitiveness multiplier around a 1500 field average.
    pub tournament_competitiveness_factor: f64,
    pub top_teams_fraction: f64,

    pub first_tournament_volatility: f64,
    pub second_tournament_volatility: f64,
    pub normal_volatility: f64,

    pub state_tournament_multiplier: f64,
    pub national_tournament_multiplier: f64,
    pub state_trend_multiplier: f64,
    pub national_trend_multiplier: f64,

    pub elo_damping_scale: f64,
    pub elo_damping_strength: f64,
    pub max_elo_loss: f64,

    pub jv_loss_threshold: f64,
    /// Varsity teams rated below this never get demoted. 0 disables the gate.
    pub jv_min_rating: f64,

    pub trend_window: usize,
    pub trend_scale: f64,
    pub trend_weight: f64,

    pub rank_weight_exponent: f64,
    pub state_loss_weight: f64,
    pub national_loss_weight: f64,

    /// Only the most recent N seasons are rated. 0 keeps everything.
    pub seasons_to_include: u32,
    pub link_prefix: String,

    pub skip_output: bool,
    pub print_loss: bool,
    pub metrics_out: Option<PathBuf>,
    pub enable_logging: bool,
    pub parallel_divisions: bool
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_elo: 1500.0,
            elo_floor: 100.0,
            elo_performance_scaling_factor: 140.0,
            tournament_competitiveness_factor: 0.5,
            top_teams_fraction: 0.7,
            first_tournament_volatility: 1.5,
            second_tournament_volatility: 1.1,
            normal_volatility: 1.0,
            state_tournament_multiplier: 4.0,
            national_tournament_multiplier: 7.0,
            state_trend_multiplier: 1.0,
            national_trend_multiplier: 1.0,
            elo_damping_scale: 100.0,
            elo_damping_strength: 0.3,
            max_elo_loss: 200.0,
            jv_loss_threshold: 90.0,
            jv_min_rating: 0.0,
            trend_window: 3,
            trend_scale: 50.0,
            trend_weight: 0.1,
            rank_weight_exponent: 1.0,
            state_loss_weight: 1.0,
            national_loss_weight: 1.0,
            seasons_to_include: 0,
            link_prefix: "https://www.duosmium.org/results/".to_string(),
            skip_output: false,
            print_loss: false,
            metrics_out: None,
            enable_logging: false,
            parallel_divisions: false
        }
    }
}

impl Config {
    /// Reads a JSON object of overrides. Missing keys keep their defaults and
    /// keys this struct does not know (e.g. a tuner's `bestLoss`) are ignored.
    pub fn from_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|source| ProcessorError::Io {
            path: path.to_path_buf(),
            source
        })?;

        Ok(serde_json::from_str(&contents)?)
    }

    /// Applies a single `key=value` override. The key may be camelCase or
    /// kebab-case; the value is read as a bool, then a number, then a string.
    pub fn set(&mut self, key: &str, raw_value: &str) -> Result<()> {
        let key = to_camel(key);
        let mut current = serde_json::to_value(&*self)?;
        let Some(fields) = current.as_object_mut().filter(|fields| fields.contains_key(&key)) else {
            return Err(ProcessorError::UnknownConfigKey(key));
        };

        fields.insert(key.clone(), infer_value(raw_value));

        *self = serde_json::from_value(current).map_err(|_| ProcessorError::InvalidConfigValue {
            key,
            value: raw_value.to_string()
        })?;

        Ok(())
    }

    /// Applies `key=value` pairs in order.
    pub fn apply_overrides(&mut self, pairs: &[String]) -> Result<()> {
        for pair in pairs {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (pair.trim(), "true")
            };
            self.set(key, value)?;
        }

        Ok(())
    }
}

fn infer_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }

    if let Some(number) = raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        return Value::Number(number);
    }

    Value::String(raw.to_string())
}

fn to_camel(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = false;

    for c in input.chars() {
        if c == '-' || c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}

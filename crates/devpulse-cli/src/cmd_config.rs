use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use devpulse_core::DashboardConfig;
use serde_json::{Map, Value};

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Set a config value
    Set {
        /// Config key (e.g. heatmapDays)
        key: String,
        /// Config value (true/false/number/string, or a JSON array)
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
}

// ── Dispatch ──

pub fn run(cmd: ConfigCmd, repo_root: &Path) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Set { key, value } => set(repo_root, &key, &value),
        ConfigCmd::Get { key } => get(repo_root, &key),
        ConfigCmd::List => list(repo_root),
    }
}

/// Keys accepted by `config set`.
pub const KEYS: &[&str] = &[
    "heatmapDays",
    "summaryDays",
    "weeks",
    "months",
    "repoDays",
    "topRepos",
    "recentActivities",
    "source",
    "levelThresholds",
    "weekStart",
];

pub fn config_path(repo_root: &Path) -> PathBuf {
    repo_root.join(".devpulse").join("config.json")
}

// ── Storage ──

/// Read config from `.devpulse/config.json`. Returns empty map if file doesn't exist.
fn read_config(path: &Path) -> anyhow::Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let content = std::fs::read_to_string(path)?;
    let val: Value = serde_json::from_str(&content)?;
    match val {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

/// Write `data` to `path` through a temp file in the same directory.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("no parent dir for {}", path.display()))?;
    std::fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

fn write_config(path: &Path, config: &Map<String, Value>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    write_atomic(path, json.as_bytes())
}

/// Turn a stored map into a validated config, filling unset keys with defaults.
fn resolve(map: &Map<String, Value>) -> anyhow::Result<DashboardConfig> {
    let config: DashboardConfig = serde_json::from_value(Value::Object(map.clone()))?;
    config.validate()?;
    Ok(config)
}

/// Effective config for `repo_root`: file values over defaults.
pub fn load(repo_root: &Path) -> anyhow::Result<DashboardConfig> {
    let path = config_path(repo_root);
    let map = read_config(&path)?;
    resolve(&map).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}

/// Parse a string value into an appropriate JSON value (bool/number/array/string).
fn parse_value(s: &str) -> Value {
    match s {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Ok(n) = s.parse::<i64>() {
                Value::Number(n.into())
            } else if let Ok(f) = s.parse::<f64>() {
                serde_json::json!(f)
            } else if s.starts_with('[') {
                serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string()))
            } else {
                Value::String(s.to_string())
            }
        }
    }
}

// ── Command Implementations ──

/// `devpulse config set <key> <value>`
pub fn set(repo_root: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    if !KEYS.contains(&key) {
        anyhow::bail!("unknown config key '{key}' (expected one of: {})", KEYS.join(", "));
    }
    let path = config_path(repo_root);
    let mut config = read_config(&path)?;
    config.insert(key.to_string(), parse_value(value));
    resolve(&config).map_err(|e| anyhow::anyhow!("rejected {key} = {value}: {e}"))?;
    write_config(&path, &config)?;
    tracing::debug!(path = %path.display(), key, "config updated");
    println!("{key} = {value}");
    Ok(())
}

/// `devpulse config get <key>`
pub fn get(repo_root: &Path, key: &str) -> anyhow::Result<()> {
    let config = read_config(&config_path(repo_root))?;
    match config.get(key) {
        Some(val) => println!("{val}"),
        None => println!("(not set)"),
    }
    Ok(())
}

/// `devpulse config list`
pub fn list(repo_root: &Path) -> anyhow::Result<()> {
    let config = read_config(&config_path(repo_root))?;
    if config.is_empty() {
        println!("(no config set)");
    } else {
        for (k, v) in &config {
            println!("{k} = {v}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use devpulse_core::{LevelThresholds, WeekStart};
    use serde_json::json;

    #[test]
    fn parse_value_types() {
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("30"), json!(30));
        assert_eq!(parse_value("[2,5,8]"), json!([2, 5, 8]));
        assert_eq!(parse_value("github"), json!("github"));
    }

    #[test]
    fn load_defaults_without_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(load(tmp.path()).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn set_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        set(tmp.path(), "heatmapDays", "90").unwrap();
        set(tmp.path(), "weekStart", "monday").unwrap();
        set(tmp.path(), "levelThresholds", "[2,5,8]").unwrap();
        set(tmp.path(), "source", "github").unwrap();

        let config = load(tmp.path()).unwrap();
        assert_eq!(config.heatmap_days, 90);
        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.level_thresholds, LevelThresholds::new([2, 5, 8]).unwrap());
        assert_eq!(config.source_filter(), Some("github"));
        assert_eq!(config.weeks, 24);
    }

    #[test]
    fn set_rejects_invalid_values() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(set(tmp.path(), "heatmapDays", "0").is_err());
        assert!(set(tmp.path(), "months", "25").is_err());
        assert!(set(tmp.path(), "levelThresholds", "[9,3,19]").is_err());
        assert!(set(tmp.path(), "noSuchKey", "1").is_err());
        assert!(!config_path(tmp.path()).exists());
    }

    #[test]
    fn invalid_file_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = config_path(tmp.path());
        write_atomic(&path, br#"{"weeks": 99}"#).unwrap();
        let err = load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }
}

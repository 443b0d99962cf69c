//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracker_core::FallbackPolicy;

/// Largest accepted `header_rows` value.
const MAX_HEADER_ROWS: usize = 20;

/// TOML-backed file configuration for tracker defaults.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// Reference sheet CSV export.
    pub metadata_file: Option<PathBuf>,
    /// JSON file holding the user's collection.
    pub store_file: Option<PathBuf>,
    /// Banner/header rows to skip at the top of the sheet.
    pub header_rows: Option<usize>,
    /// Substring fallback policy for metadata lookups.
    pub fallback_policy: Option<FallbackPolicy>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(header_rows) = self.header_rows
            && header_rows > MAX_HEADER_ROWS
        {
            bail!(
                "Invalid config value for `header_rows`: {header_rows}. Expected range: 0..={MAX_HEADER_ROWS}"
            );
        }
        Ok(())
    }
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the tracing filter level for this setting.
    #[must_use]
    pub fn filter_level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/tracker/config.toml`
/// 2. `$HOME/.config/tracker/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("tracker")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("tracker")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let line_no = line_index + 1;

        match key {
            "metadata_file" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `metadata_file` value on line {line_no}"))?;
                cfg.metadata_file = Some(PathBuf::from(parsed));
            }
            "store_file" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `store_file` value on line {line_no}"))?;
                cfg.store_file = Some(PathBuf::from(parsed));
            }
            "header_rows" => {
                let parsed = parse_integer_usize(value)
                    .with_context(|| format!("Invalid `header_rows` value on line {line_no}"))?;
                cfg.header_rows = Some(parsed);
            }
            "fallback_policy" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `fallback_policy` value on line {line_no}"))?;
                let policy = parsed.parse::<FallbackPolicy>().map_err(|_| {
                    anyhow::anyhow!(
                        "Invalid `fallback_policy` value '{parsed}' on line {line_no}: expected one of: first, closest"
                    )
                })?;
                cfg.fallback_policy = Some(policy);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `verbosity` value on line {line_no}"))?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_no}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_usize(raw_value: &str) -> Result<usize> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    usize::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_all_fields() {
        let cfg = parse_config_str(
            r#"
# tracker defaults
metadata_file = "/data/neetcode.csv"
store_file = "/data/me.json"   # per-user
header_rows = 2
fallback_policy = "closest"
verbosity = "verbose"
"#,
        )
        .unwrap();

        assert_eq!(cfg.metadata_file, Some(PathBuf::from("/data/neetcode.csv")));
        assert_eq!(cfg.store_file, Some(PathBuf::from("/data/me.json")));
        assert_eq!(cfg.header_rows, Some(2));
        assert_eq!(cfg.fallback_policy, Some(FallbackPolicy::Closest));
        assert_eq!(cfg.verbosity, Some(VerbositySetting::Verbose));
    }

    #[test]
    fn test_parse_config_empty_is_default() {
        let cfg = parse_config_str("\n# nothing\n").unwrap();
        assert!(cfg.metadata_file.is_none());
        assert!(cfg.header_rows.is_none());
    }

    #[test]
    fn test_parse_config_hash_inside_string_kept() {
        let cfg = parse_config_str(r#"store_file = "/tmp/a#b.json""#).unwrap();
        assert_eq!(cfg.store_file, Some(PathBuf::from("/tmp/a#b.json")));
    }

    #[test]
    fn test_parse_config_unknown_key_rejected() {
        let err = parse_config_str("concurrency = 4").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_config_header_rows_out_of_range() {
        let err = parse_config_str("header_rows = 21").unwrap_err();
        assert!(err.to_string().contains("header_rows"));
    }

    #[test]
    fn test_parse_config_negative_header_rows_rejected() {
        assert!(parse_config_str("header_rows = -1").is_err());
    }

    #[test]
    fn test_parse_config_bad_policy_rejected() {
        let err = parse_config_str(r#"fallback_policy = "best""#).unwrap_err();
        assert!(format!("{err:#}").contains("first, closest"));
    }

    #[test]
    fn test_parse_config_unquoted_string_rejected() {
        assert!(parse_config_str("metadata_file = sheet.csv").is_err());
    }

    #[test]
    fn test_parse_config_missing_equals_rejected() {
        let err = parse_config_str("\nverbosity").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_verbosity_filter_levels() {
        assert_eq!(VerbositySetting::Default.filter_level(), "info");
        assert_eq!(VerbositySetting::Quiet.filter_level(), "error");
    }
}

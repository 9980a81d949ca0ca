//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.techchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::navigation::InputStyle;
use crate::source::{DocumentEntry, LoadPlan, split_location};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TechchatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub technologies: Vec<TechnologyEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub input_mode: Option<InputStyle>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Directory or base URL holding the documents.
    pub location: Option<String>,
    /// Single `{technology: {category: [item]}}` document, relative to `location`.
    pub bundle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TechnologyEntry {
    pub name: String,
    pub document: String,
    /// Syntax token used to highlight code blocks (`html`, `css`, `js`...).
    pub syntax: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CATALOG_LOCATION: &str = "data";
pub const DEFAULT_LOG_FILE: &str = "techchat.log";

/// The fixed technology list: display name, document, syntax token.
const DEFAULT_TECHNOLOGIES: [(&str, &str, &str); 5] = [
    ("HTML5", "html.json", "html"),
    ("CSS3", "css.json", "css"),
    ("JavaScript", "javascript.json", "js"),
    ("PHP", "php.json", "php"),
    ("SQL", "sql.json", "sql"),
];

pub fn default_technologies() -> Vec<TechnologyEntry> {
    DEFAULT_TECHNOLOGIES
        .iter()
        .map(|(name, document, syntax)| TechnologyEntry {
            name: name.to_string(),
            document: document.to_string(),
            syntax: Some(syntax.to_string()),
        })
        .collect()
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub style: InputStyle,
    /// Source root: a directory or an `http(s)://` base URL.
    pub location: String,
    pub plan: LoadPlan,
    pub technologies: Vec<TechnologyEntry>,
    pub log_file: String,
}

impl ResolvedConfig {
    /// `(technology, syntax token)` pairs for highlighting.
    pub fn syntaxes(&self) -> Vec<(String, String)> {
        self.technologies
            .iter()
            .filter_map(|t| t.syntax.clone().map(|s| (t.name.clone(), s)))
            .collect()
    }
}

/// Values given on the command line. `None` = flag not given.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub catalog: Option<&'a str>,
    pub bundle: Option<&'a str>,
    pub style: Option<InputStyle>,
    pub log_file: Option<&'a str>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.techchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".techchat").join("config.toml"))
}

/// Load config from `explicit` if given, else from `~/.techchat/config.toml`.
///
/// A missing default file is generated (commented out) and treated as empty.
/// A missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<TechchatConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(TechchatConfig::default());
            }
        },
    };

    if explicit.is_none() && !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TechchatConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: TechchatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# techchat Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# input_mode = "menu"                # "menu" (numbers only) or "search" (free text searches)
# log_file = "techchat.log"

# [catalog]
# location = "data"                  # Directory or http(s) base URL. Or set TECHCHAT_CATALOG
# bundle = "data.json"               # One file holding every technology. Or set TECHCHAT_BUNDLE

# Menu order follows the entries below. Without any, HTML5, CSS3,
# JavaScript, PHP and SQL are read from html.json, css.json, ...
# [[technologies]]
# name = "HTML5"
# document = "html.json"
# syntax = "html"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TechchatConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    // Input style: CLI → env → config → default
    let style = cli
        .style
        .or_else(|| {
            std::env::var("TECHCHAT_MODE")
                .ok()
                .and_then(|v| parse_style(&v))
        })
        .or(config.general.input_mode)
        .unwrap_or_default();

    let technologies = if config.technologies.is_empty() {
        default_technologies()
    } else {
        config.technologies.clone()
    };

    // A CLI bundle is a full location and carries its own root.
    let (location, plan) = if let Some(bundle) = cli.bundle {
        let (root, document) = split_location(bundle);
        (root, LoadPlan::Bundle(document))
    } else {
        // Location: CLI → env → config → default
        let location = cli
            .catalog
            .map(|s| s.to_string())
            .or_else(|| std::env::var("TECHCHAT_CATALOG").ok())
            .or_else(|| config.catalog.location.clone())
            .unwrap_or_else(|| DEFAULT_CATALOG_LOCATION.to_string());

        // Bundle: env → config
        let bundle = std::env::var("TECHCHAT_BUNDLE")
            .ok()
            .or_else(|| config.catalog.bundle.clone());

        let plan = match bundle {
            Some(document) => LoadPlan::Bundle(document),
            None => LoadPlan::Documents(
                technologies
                    .iter()
                    .map(|t| DocumentEntry {
                        technology: t.name.clone(),
                        document: t.document.clone(),
                    })
                    .collect(),
            ),
        };
        (location, plan)
    };

    let log_file = cli
        .log_file
        .map(|s| s.to_string())
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        style,
        location,
        plan,
        technologies,
        log_file,
    }
}

fn parse_style(value: &str) -> Option<InputStyle> {
    match value.trim().to_lowercase().as_str() {
        "menu" => Some(InputStyle::Menu),
        "search" => Some(InputStyle::Search),
        other => {
            warn!("Ignoring unknown TECHCHAT_MODE value {:?}", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = TechchatConfig::default();
        assert!(config.technologies.is_empty());
        assert!(config.general.input_mode.is_none());
    }

    #[test]
    fn test_resolve_uses_default_technologies() {
        let config = TechchatConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.technologies.len(), 5);
        match &resolved.plan {
            LoadPlan::Documents(entries) => {
                assert_eq!(entries[0].technology, "HTML5");
                assert_eq!(entries[0].document, "html.json");
                assert_eq!(entries[4].technology, "SQL");
            }
            other => panic!("expected documents plan, got {other:?}"),
        }
        assert_eq!(resolved.syntaxes()[2], ("JavaScript".to_string(), "js".to_string()));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TechchatConfig {
            general: GeneralConfig {
                input_mode: Some(InputStyle::Search),
                log_file: Some("/tmp/tc.log".to_string()),
            },
            catalog: CatalogConfig {
                location: Some("https://example.com/catalog".to_string()),
                bundle: None,
            },
            technologies: vec![TechnologyEntry {
                name: "Rust".to_string(),
                document: "rust.json".to_string(),
                syntax: None,
            }],
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.style, InputStyle::Search);
        assert_eq!(resolved.log_file, "/tmp/tc.log");
        assert_eq!(resolved.technologies.len(), 1);
        assert!(resolved.syntaxes().is_empty());
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = TechchatConfig {
            general: GeneralConfig {
                input_mode: Some(InputStyle::Search),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            catalog: Some("./fixtures"),
            style: Some(InputStyle::Menu),
            ..Default::default()
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.style, InputStyle::Menu);
        assert_eq!(resolved.location, "./fixtures");
    }

    #[test]
    fn test_cli_bundle_splits_location() {
        let cli = CliOverrides {
            bundle: Some("https://example.com/data/data.json"),
            ..Default::default()
        };
        let resolved = resolve(&TechchatConfig::default(), &cli);
        assert_eq!(resolved.location, "https://example.com/data");
        assert_eq!(resolved.plan, LoadPlan::Bundle("data.json".to_string()));
    }

    #[test]
    fn test_toml_parses_all_sections() {
        let toml_str = r#"
[general]
input_mode = "search"

[catalog]
location = "/srv/catalog"
bundle = "data.json"

[[technologies]]
name = "HTML5"
document = "html.json"
syntax = "html"

[[technologies]]
name = "SQL"
document = "sql.json"
"#;
        let config: TechchatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.input_mode, Some(InputStyle::Search));
        assert_eq!(config.catalog.bundle.as_deref(), Some("data.json"));
        assert_eq!(config.technologies.len(), 2);
        assert_eq!(config.technologies[1].syntax, None);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[catalog]
location = "catalog"
"#;
        let config: TechchatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog.location.as_deref(), Some("catalog"));
        assert!(config.general.input_mode.is_none());
        assert!(config.technologies.is_empty());
    }

    #[test]
    fn test_unknown_mode_is_a_parse_error() {
        let result: Result<TechchatConfig, _> = toml::from_str("[general]\ninput_mode = \"voice\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_style() {
        assert_eq!(parse_style(" Search "), Some(InputStyle::Search));
        assert_eq!(parse_style("menu"), Some(InputStyle::Menu));
        assert_eq!(parse_style("voice"), None);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let path = std::env::temp_dir().join("techchat-does-not-exist.toml");
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Io(_))));
    }
}

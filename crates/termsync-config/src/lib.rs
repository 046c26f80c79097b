use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "termsync.toml";

pub const DEFAULT_SOURCE_ROOT: &str = "src";
pub const DEFAULT_TRANSLATIONS_DIR: &str = "src/translations";
pub const DEFAULT_REGISTRY_PATH: &str = "src/translations/terms.json";
pub const DEFAULT_MESSAGES_PATTERN: &str = r"messages\.(json|toml)$";
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "pt"];
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermsyncConfig {
    pub source_root: Option<String>,
    pub translations_dir: Option<String>,
    pub registry_path: Option<String>,
    pub messages_pattern: Option<String>,
    pub languages: Option<Vec<String>>,
    pub default_language: Option<String>,
    pub log_dir: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

/// Fully resolved settings with every path anchored at the project directory.
#[derive(Debug, Clone)]
pub struct Settings {
    pub project_dir: PathBuf,
    pub source_root: PathBuf,
    pub translations_dir: PathBuf,
    pub registry_path: PathBuf,
    pub messages_pattern: Regex,
    pub languages: Vec<String>,
    pub default_language: String,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    pub fn translation_file(&self, language: &str) -> PathBuf {
        self.translations_dir.join(format!("{language}.json"))
    }

    pub fn is_default_language(&self, language: &str) -> bool {
        self.default_language == language
    }
}

/// Load config for `project_dir`.
/// Search order: environment, `<project_dir>/termsync.toml`,
/// `$CONFIG_DIR/termsync/termsync.toml`.
pub fn load_config(project_dir: &Path) -> Result<TermsyncConfig, ConfigError> {
    let mut merged = from_env(|key| std::env::var(key).ok());
    if let Some(cfg) = read_config_file(&project_dir.join(CONFIG_FILE_NAME))? {
        merged = merge(merged, cfg);
    }
    if let Some(base) = dirs::config_dir() {
        let path = base.join("termsync").join(CONFIG_FILE_NAME);
        if let Some(cfg) = read_config_file(&path)? {
            merged = merge(merged, cfg);
        }
    }
    Ok(merged)
}

/// Load and resolve in one step.
pub fn load_settings(project_dir: &Path) -> Result<Settings, ConfigError> {
    let cfg = load_config(project_dir)?;
    resolve(cfg, project_dir)
}

fn read_config_file(path: &Path) -> Result<Option<TermsyncConfig>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str::<TermsyncConfig>(&text)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Build a config layer from `TERMSYNC_*` variables.
pub fn from_env<F>(lookup: F) -> TermsyncConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    TermsyncConfig {
        source_root: get("TERMSYNC_SOURCE_ROOT"),
        translations_dir: get("TERMSYNC_TRANSLATIONS_DIR"),
        registry_path: get("TERMSYNC_REGISTRY"),
        messages_pattern: get("TERMSYNC_MESSAGES_PATTERN"),
        languages: get("TERMSYNC_LANGUAGES").map(|v| split_list(&v)),
        default_language: get("TERMSYNC_DEFAULT_LANGUAGE"),
        log_dir: get("TERMSYNC_LOG_DIR"),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fill unset fields from defaults and validate.
pub fn resolve(cfg: TermsyncConfig, project_dir: &Path) -> Result<Settings, ConfigError> {
    let anchor = |p: Option<String>, default: &str| {
        let p = PathBuf::from(p.unwrap_or_else(|| default.to_string()));
        if p.is_absolute() {
            p
        } else {
            project_dir.join(p)
        }
    };

    let pattern_src = cfg
        .messages_pattern
        .unwrap_or_else(|| DEFAULT_MESSAGES_PATTERN.to_string());
    let messages_pattern = Regex::new(&pattern_src).map_err(|e| {
        ConfigError::Invalid(format!("messages_pattern '{pattern_src}' is not a valid regex: {e}"))
    })?;

    let languages = cfg
        .languages
        .unwrap_or_else(|| DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect());
    if languages.is_empty() {
        return Err(ConfigError::Invalid("languages must not be empty".into()));
    }
    let default_language = cfg
        .default_language
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    if !languages.contains(&default_language) {
        return Err(ConfigError::Invalid(format!(
            "default_language '{default_language}' is not listed in languages {languages:?}"
        )));
    }

    Ok(Settings {
        project_dir: project_dir.to_path_buf(),
        source_root: anchor(cfg.source_root, DEFAULT_SOURCE_ROOT),
        translations_dir: anchor(cfg.translations_dir, DEFAULT_TRANSLATIONS_DIR),
        registry_path: anchor(cfg.registry_path, DEFAULT_REGISTRY_PATH),
        messages_pattern,
        languages,
        default_language,
        log_dir: cfg.log_dir.map(|d| anchor(Some(d), "")),
    })
}

fn merge(mut a: TermsyncConfig, b: TermsyncConfig) -> TermsyncConfig {
    if a.source_root.is_none() {
        a.source_root = b.source_root;
    }
    if a.translations_dir.is_none() {
        a.translations_dir = b.translations_dir;
    }
    if a.registry_path.is_none() {
        a.registry_path = b.registry_path;
    }
    if a.messages_pattern.is_none() {
        a.messages_pattern = b.messages_pattern;
    }
    if a.languages.is_none() {
        a.languages = b.languages;
    }
    if a.default_language.is_none() {
        a.default_language = b.default_language;
    }
    if a.log_dir.is_none() {
        a.log_dir = b.log_dir;
    }
    a
}

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Prefix for environment variable overrides (`PACKFILTER_STRICT_INCLUDES=false`)
pub const ENV_PREFIX: &str = "PACKFILTER_";

/// Include/exclude rules for building a [`ClassList`](crate::filter::ClassList)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Skip everything not explicitly included
    pub strict_includes: bool,

    /// Package prefixes to process, applied in order
    pub includes: Vec<String>,

    /// Package prefixes to skip, applied after includes
    pub excludes: Vec<String>,

    /// Archive path prefixes; empty means every location is eligible
    pub jars: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            strict_includes: true,
            includes: Vec::new(),
            excludes: Vec::new(),
            jars: Vec::new(),
        }
    }
}

/// Values given on the command line; only the flags actually passed are merged
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_includes: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub jars: Vec<String>,
}

impl FilterConfig {
    /// Load the merged configuration relative to the current directory.
    ///
    /// Priority (lowest to highest): embedded defaults, user config, repository
    /// config (or `custom_config` in place of both), `PACKFILTER_*` environment
    /// variables, CLI overrides. Rule lists from later layers are appended to
    /// earlier ones; scalar values are replaced.
    pub fn load(custom_config: Option<&str>, overrides: Option<ConfigOverrides>) -> Result<Self> {
        Self::load_in(Path::new("."), custom_config, overrides)
    }

    /// Same as [`FilterConfig::load`] with the repository config looked up in `dir`
    pub fn load_in(
        dir: &Path,
        custom_config: Option<&str>,
        overrides: Option<ConfigOverrides>,
    ) -> Result<Self> {
        let figment = Self::figment_in(dir, custom_config, overrides)?;
        let config: FilterConfig = figment
            .extract()
            .context("Failed to extract filter configuration")?;

        tracing::debug!(
            "Loaded config: {} includes, {} excludes, {} jars, strict_includes={}",
            config.includes.len(),
            config.excludes.len(),
            config.jars.len(),
            config.strict_includes
        );
        Ok(config)
    }

    /// Build the provider chain without extracting it
    pub fn figment_in(
        dir: &Path,
        custom_config: Option<&str>,
        overrides: Option<ConfigOverrides>,
    ) -> Result<Figment> {
        tracing::trace!("CONFIG LOAD: Starting in {}", dir.display());

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            let path = resolve(dir, custom_path);
            anyhow::ensure!(
                path.is_file(),
                "Config file not found: {}",
                path.display()
            );
            tracing::trace!("CONFIG LOAD: Using custom config {}", path.display());
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.admerge(Json::file(&path)),
                Some("yaml") | Some("yml") => figment.admerge(Yaml::file(&path)),
                _ => figment.admerge(Toml::file(&path)),
            };
        } else {
            if let Some(user_base) = Self::user_config_base_path() {
                figment = merge_any_format(figment, &user_base);
            }
            figment = merge_any_format(figment, &dir.join("packfilter"));
        }

        // Environment variables sit above every file. Rule lists are read as
        // comma-separated values, everything else goes through figment.
        figment = figment
            .admerge(Env::prefixed(ENV_PREFIX).ignore(&RULE_LIST_KEYS))
            .admerge(Serialized::defaults(env_rule_lists()));

        if let Some(overrides) = overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides {:?}", overrides);
            figment = figment.admerge(Serialized::defaults(overrides));
        }

        Ok(figment)
    }

    fn user_config_base_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config/packfilter/config"))
    }
}

const RULE_LIST_KEYS: [&str; 3] = ["includes", "excludes", "jars"];

/// `PACKFILTER_INCLUDES`, `PACKFILTER_EXCLUDES` and `PACKFILTER_JARS`
fn env_rule_lists() -> ConfigOverrides {
    let list = |key: &str| {
        std::env::var(format!("{ENV_PREFIX}{}", key.to_uppercase()))
            .map(|value| parse_env_list(&value))
            .unwrap_or_default()
    };
    ConfigOverrides {
        strict_includes: None,
        includes: list(RULE_LIST_KEYS[0]),
        excludes: list(RULE_LIST_KEYS[1]),
        jars: list(RULE_LIST_KEYS[2]),
    }
}

/// Split `a,b` (or `[a, b]`) into its non-empty items
fn parse_env_list(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(value);
    value
        .split(',')
        .map(|item| item.trim().trim_matches('"').trim())
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Merge `<base>.toml`, `.json`, `.yaml` and `.yml`, whichever exist
fn merge_any_format(figment: Figment, base: &Path) -> Figment {
    figment
        .admerge(Toml::file(base.with_extension("toml")))
        .admerge(Json::file(base.with_extension("json")))
        .admerge(Yaml::file(base.with_extension("yaml")))
        .admerge(Yaml::file(base.with_extension("yml")))
}

fn resolve(dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}

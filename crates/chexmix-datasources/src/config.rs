use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where downloaded and cached data lives, and the credentials remote
/// sources need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding data files and cached tables
    pub data_path: PathBuf,
    /// Reuse cached tables instead of rebuilding them
    pub enable_cache: bool,
    /// Contact address sent with Entrez requests
    pub email: Option<String>,
    pub entrez_api_key: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./data"),
            enable_cache: true,
            email: None,
            entrez_api_key: None,
        }
    }
}

impl DataConfig {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_path: lookup("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            enable_cache: lookup("CHEXMIX_ENABLE_CACHE")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.enable_cache),
            email: lookup("EMAIL").filter(|v| !v.is_empty()),
            entrez_api_key: lookup("ENTREZ_API_KEY").filter(|v| !v.is_empty()),
        }
    }

    pub fn data_file(&self, name: &str) -> PathBuf {
        self.data_path.join(name)
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DataConfig::from_lookup(lookup(&[]));
        assert_eq!(config, DataConfig::default());
        assert_eq!(config.data_file("mesh.json"), PathBuf::from("./data/mesh.json"));
    }

    #[test]
    fn test_overrides() {
        let config = DataConfig::from_lookup(lookup(&[
            ("DATA_PATH", "/srv/chexmix"),
            ("CHEXMIX_ENABLE_CACHE", "false"),
            ("EMAIL", "lab@example.org"),
            ("ENTREZ_API_KEY", ""),
        ]));
        assert_eq!(config.data_path, PathBuf::from("/srv/chexmix"));
        assert!(!config.enable_cache);
        assert_eq!(config.email.as_deref(), Some("lab@example.org"));
        assert_eq!(config.entrez_api_key, None);
    }

    #[test]
    fn test_flag_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("Off"));
        assert!(!parse_flag(" "));
    }
}

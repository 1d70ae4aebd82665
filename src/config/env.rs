use crate::config::toml_config::{BackendKind, RemoteConfig, TomlConfig};
use crate::utils::error::Result;
use std::env;

pub const BACKEND_VAR: &str = "HOMECARE_BACKEND";
pub const DATA_DIR_VAR: &str = "HOMECARE_DATA_DIR";
pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
pub const SUPABASE_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Settings read from the process environment, applied over the config file.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub backend: Option<String>,
    pub data_dir: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            backend: env::var(BACKEND_VAR).ok(),
            data_dir: env::var(DATA_DIR_VAR).ok(),
            supabase_url: env::var(SUPABASE_URL_VAR).ok(),
            supabase_key: env::var(SUPABASE_KEY_VAR).ok(),
        }
    }

    pub fn apply(&self, config: &mut TomlConfig) -> Result<()> {
        if let Some(backend) = &self.backend {
            config.storage.backend = backend.parse::<BackendKind>()?;
        }

        if let Some(data_dir) = &self.data_dir {
            config.local.data_dir = data_dir.clone();
        }

        if self.supabase_url.is_some() || self.supabase_key.is_some() {
            let remote = config.remote.get_or_insert_with(RemoteConfig::default);
            if let Some(url) = &self.supabase_url {
                remote.url = url.clone();
            }
            if let Some(key) = &self.supabase_key {
                remote.api_key = key.clone();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = TomlConfig::default();
        let overrides = EnvOverrides {
            backend: Some("remote".to_string()),
            data_dir: Some("/tmp/homecare".to_string()),
            supabase_url: Some("https://abc.supabase.co".to_string()),
            supabase_key: Some("anon".to_string()),
        };

        overrides.apply(&mut config).unwrap();

        assert_eq!(config.storage.backend, BackendKind::Remote);
        assert_eq!(config.local.data_dir, "/tmp/homecare");
        let remote = config.remote.unwrap();
        assert_eq!(remote.url, "https://abc.supabase.co");
        assert_eq!(remote.api_key, "anon");
    }

    #[test]
    fn test_key_override_keeps_file_url() {
        let mut config = TomlConfig::from_toml_str(
            "[remote]\nurl = \"https://file.supabase.co\"\napi_key = \"old\"\n",
        )
        .unwrap();
        let overrides = EnvOverrides {
            supabase_key: Some("new".to_string()),
            ..EnvOverrides::default()
        };

        overrides.apply(&mut config).unwrap();

        let remote = config.remote.unwrap();
        assert_eq!(remote.url, "https://file.supabase.co");
        assert_eq!(remote.api_key, "new");
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let mut config = TomlConfig::default();
        let overrides = EnvOverrides {
            backend: Some("redis".to_string()),
            ..EnvOverrides::default()
        };

        assert!(overrides.apply(&mut config).is_err());
    }

    #[test]
    fn test_no_overrides_leave_config_untouched() {
        let mut config = TomlConfig::default();

        EnvOverrides::default().apply(&mut config).unwrap();

        assert_eq!(config.storage.backend, BackendKind::Local);
        assert!(config.remote.is_none());
    }
}

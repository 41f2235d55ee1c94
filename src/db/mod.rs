use crate::api::{ApiClient, ApiConfig, AuthSession};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "riffstream.app_settings";

#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("settings storage failed: {0}")]
    Storage(String),

    #[error("settings are not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("settings file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Client-side settings that survive a reload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppSettings {
    /// Overrides the build-time API URL when set.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AppSettings {
    pub fn api_config(&self) -> ApiConfig {
        match self.api_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => ApiConfig::new(url),
            _ => ApiConfig::from_build_env(),
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.api_config()).with_token(self.auth_token.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.auth_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }

    pub fn sign_in(&mut self, session: AuthSession) {
        self.auth_token = Some(session.token);
        self.email = session.email;
    }

    pub fn sign_out(&mut self) {
        self.auth_token = None;
        self.email = None;
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn save_settings(settings: AppSettings) -> Result<(), DbError> {
    LocalStorage::set(SETTINGS_KEY, settings).map_err(|e| DbError::Storage(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
pub async fn load_settings() -> Result<AppSettings, DbError> {
    match LocalStorage::get(SETTINGS_KEY) {
        Ok(settings) => Ok(settings),
        Err(_) => Ok(AppSettings::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_settings(settings: AppSettings) -> Result<(), DbError> {
    save_settings_to(&settings_path()?, &settings)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_settings() -> Result<AppSettings, DbError> {
    load_settings_from(&settings_path()?)
}

#[cfg(not(target_arch = "wasm32"))]
fn settings_path() -> Result<std::path::PathBuf, DbError> {
    let dir = dirs::config_dir()
        .ok_or_else(|| DbError::Storage("no config directory on this platform".to_string()))?
        .join("riffstream");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(SETTINGS_FILE))
}

#[cfg(not(target_arch = "wasm32"))]
fn save_settings_to(path: &std::path::Path, settings: &AppSettings) -> Result<(), DbError> {
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings_from(path: &std::path::Path) -> Result<AppSettings, DbError> {
    match std::fs::read_to_string(path) {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(AppSettings::default()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);

        assert_eq!(load_settings_from(&path).unwrap(), AppSettings::default());

        let mut settings = AppSettings {
            api_url: Some("http://music.lan/api".into()),
            ..AppSettings::default()
        };
        settings.sign_in(AuthSession {
            token: "tok".into(),
            email: Some("me@x.io".into()),
        });
        save_settings_to(&path, &settings).unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded, settings);
        assert!(loaded.is_signed_in());
        assert!(loaded.client().is_authenticated());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_settings_from(&path), Err(DbError::Serde(_))));
    }

    #[test]
    fn blank_api_url_falls_back_to_default() {
        let settings = AppSettings {
            api_url: Some("  ".into()),
            ..AppSettings::default()
        };
        assert_eq!(settings.api_config(), ApiConfig::from_build_env());

        let mut settings = AppSettings {
            api_url: Some("http://h/api/".into()),
            auth_token: Some("t".into()),
            email: None,
        };
        assert_eq!(settings.api_config().base_url, "http://h/api");
        settings.sign_out();
        assert!(!settings.is_signed_in());
    }
}

// ============================
// gatekeeper-backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/gatekeeper.toml";

/// Prefix for environment overrides, e.g. `GATEKEEPER_SERVER__PORT`
pub const ENV_PREFIX: &str = "GATEKEEPER_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub assets: AssetSettings,
    pub session: SessionSettings,
    pub password: PasswordSettings,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
}

/// Listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Credential store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// SQLite database file
    pub database_path: PathBuf,
}

/// Static content settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    pub static_dir: PathBuf,
    /// File served by `/download`, relative to `static_dir`
    pub download_file: PathBuf,
}

/// Session cookie settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub cookie_name: String,
    /// Mark the cookie `Secure` (HTTPS deployments only)
    pub secure_cookie: bool,
}

/// Password hashing cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordSettings {
    /// scrypt CPU/memory cost as a power of two
    pub scrypt_log_n: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            assets: AssetSettings::default(),
            session: SessionSettings::default(),
            password: PasswordSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/users.db"),
        }
    }
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            download_file: PathBuf::from("files/cheat_sheet.pdf"),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: "gatekeeper_session".to_string(),
            secure_cookie: false,
        }
    }
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self { scrypt_log_n: 17 }
    }
}

impl Settings {
    /// Load settings from defaults, an optional TOML file and the environment.
    ///
    /// A missing file is not an error; the defaults and environment still apply.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings for values the server cannot run with
    pub fn validate(&self) -> Result<(), AppError> {
        if self.server.port == 0 {
            return Err(AppError::Config("server.port must be non-zero".to_string()));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "unknown log_level `{}`",
                self.log_level
            )));
        }

        let cookie = &self.session.cookie_name;
        if cookie.is_empty()
            || !cookie
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AppError::Config(format!(
                "invalid session.cookie_name `{cookie}`"
            )));
        }

        // the download must stay inside static_dir
        let file = &self.assets.download_file;
        if file.as_os_str().is_empty()
            || file
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AppError::Config(format!(
                "assets.download_file `{}` must be a relative path below static_dir",
                file.display()
            )));
        }

        if !(4..=20).contains(&self.password.scrypt_log_n) {
            return Err(AppError::Config(format!(
                "password.scrypt_log_n must be between 4 and 20, got {}",
                self.password.scrypt_log_n
            )));
        }

        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid bind address: {e}")))
    }

    /// Full path of the file served by `/download`
    pub fn download_path(&self) -> PathBuf {
        self.assets.static_dir.join(&self.assets.download_file)
    }
}

#[cfg(test)]
mod config_tests;

//! Generator and server settings. Read from `CODEGEN_*` env vars (plus `PORT`); every value has a default.

use crate::error::SettingsError;
use crate::naming::is_java_identifier;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasourceSettings {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl Default for DatasourceSettings {
    fn default() -> Self {
        DatasourceSettings {
            url: "jdbc:postgresql://localhost:5432/yourdbname".into(),
            username: "yourdbusername".into(),
            password: "yourdbpassword".into(),
        }
    }
}

/// What the generated project looks like and where requests do their work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Java package the four layers live under (e.g. `com.example`).
    pub base_package: String,
    pub group_id: String,
    pub artifact_id: String,
    pub spring_boot_version: String,
    pub java_version: String,
    pub datasource: DatasourceSettings,
    /// Parent of the per-request working directories.
    pub work_dir: PathBuf,
    /// Reject links to missing nodes instead of skipping them.
    pub strict_links: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings {
            base_package: "com.example".into(),
            group_id: "com.example".into(),
            artifact_id: "spring-boot-orm".into(),
            spring_boot_version: "2.5.5".into(),
            java_version: "11".into(),
            datasource: DatasourceSettings::default(),
            work_dir: std::env::temp_dir().join("diagram-codegen"),
            strict_links: false,
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty()).unwrap_or(default)
}

fn env_bool(name: &'static str, default: bool) -> Result<bool, SettingsError> {
    match std::env::var(name) {
        Ok(v) => match v.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(SettingsError::Invalid {
                name,
                reason: format!("expected a boolean, got '{}'", other),
            }),
        },
        Err(_) => Ok(default),
    }
}

impl GeneratorSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let d = GeneratorSettings::default();
        let settings = GeneratorSettings {
            base_package: env_or("CODEGEN_BASE_PACKAGE", d.base_package),
            group_id: env_or("CODEGEN_GROUP_ID", d.group_id),
            artifact_id: env_or("CODEGEN_ARTIFACT_ID", d.artifact_id),
            spring_boot_version: env_or("CODEGEN_SPRING_BOOT_VERSION", d.spring_boot_version),
            java_version: env_or("CODEGEN_JAVA_VERSION", d.java_version),
            datasource: DatasourceSettings {
                url: env_or("CODEGEN_DATASOURCE_URL", d.datasource.url),
                username: env_or("CODEGEN_DATASOURCE_USERNAME", d.datasource.username),
                password: env_or("CODEGEN_DATASOURCE_PASSWORD", d.datasource.password),
            },
            work_dir: std::env::var("CODEGEN_WORK_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(d.work_dir),
            strict_links: env_bool("CODEGEN_STRICT_LINKS", d.strict_links)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.base_package.split('.').all(is_java_identifier) {
            return Err(SettingsError::Invalid {
                name: "CODEGEN_BASE_PACKAGE",
                reason: format!("'{}' is not a valid Java package", self.base_package),
            });
        }
        if self.artifact_id.is_empty() || self.artifact_id.contains(|c: char| c == '/' || c == '\\') {
            return Err(SettingsError::Invalid {
                name: "CODEGEN_ARTIFACT_ID",
                reason: format!("'{}' cannot be used as a file name", self.artifact_id),
            });
        }
        Ok(())
    }

    /// File name of the downloadable archive.
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.artifact_id)
    }
}

/// HTTP listener settings for the server binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerSettings {
    pub port: u16,
    pub max_body_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            port: 5000,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let d = ServerSettings::default();
        let port = match std::env::var("PORT") {
            Ok(v) => v.trim().parse().map_err(|_| SettingsError::Invalid {
                name: "PORT",
                reason: format!("'{}' is not a port number", v),
            })?,
            Err(_) => d.port,
        };
        let max_body_bytes = match std::env::var("CODEGEN_MAX_BODY_BYTES") {
            Ok(v) => v.trim().parse().map_err(|_| SettingsError::Invalid {
                name: "CODEGEN_MAX_BODY_BYTES",
                reason: format!("'{}' is not a byte count", v),
            })?,
            Err(_) => d.max_body_bytes,
        };
        Ok(ServerSettings { port, max_body_bytes })
    }
}

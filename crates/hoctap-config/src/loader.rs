//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use hoctap_core::HoctapError;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Default name of the dotenv-style file read at startup.
pub const DEFAULT_ENV_FILE: &str = "config.env";

/// Prefix for structured environment overrides (`HOCTAP_DATABASE__MAX_CONNECTIONS`).
pub const ENV_PREFIX: &str = "HOCTAP";

/// Flat environment variables and the configuration keys they set.
const NAMED_VARIABLES: &[(&str, &str)] = &[
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
    ("SERVER_PORT", "server.port"),
];

/// Loads [`AppConfig`] from defaults, files and the environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    env_file: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Sources are applied in order, later ones winning:
    /// 1. Built-in defaults
    /// 2. `{config_dir}/default.toml`
    /// 3. `{config_dir}/local.toml`
    /// 4. Environment variables with `HOCTAP_` prefix
    /// 5. `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`, `SERVER_PORT`
    ///
    /// Empty environment values are treated as unset.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
        }
    }

    /// Loader rooted at `./config`, reading `./config.env`.
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Overrides the dotenv file path.
    #[must_use]
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = path.into();
        self
    }

    /// Reads the env file into the process environment, then loads
    /// configuration from the process environment.
    pub fn load(&self) -> Result<AppConfig, HoctapError> {
        self.load_env_file();
        self.load_from(std::env::vars())
    }

    /// Loads the env file if present. Variables already set in the
    /// process environment are not overwritten.
    ///
    /// Returns false when the file could not be read.
    pub fn load_env_file(&self) -> bool {
        match dotenvy::from_path(&self.env_file) {
            Ok(()) => {
                info!("Loaded environment from {}", self.env_file.display());
                true
            }
            Err(e) => {
                warn!("Could not load {} file: {}", self.env_file.display(), e);
                info!("Using system environment variables or defaults");
                false
            }
        }
    }

    /// Loads configuration using `env` in place of the process environment.
    pub fn load_from<I>(&self, env: I) -> Result<AppConfig, HoctapError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: config::Map<String, String> = env
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .collect();

        info!("Loading configuration from {}", self.config_dir.display());

        let mut builder = Config::builder();

        for name in ["default.toml", "local.toml"] {
            let path = self.config_dir.join(name);
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        for (variable, key) in NAMED_VARIABLES {
            if let Some(value) = env.get(*variable) {
                debug!("Applying {} to {}", variable, key);
                builder = builder
                    .set_override(*key, value.as_str())
                    .map_err(config_error_to_hoctap_error)?;
            }
        }

        let app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error_to_hoctap_error)?;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| HoctapError::Configuration(format_validation_errors(&errors)))?;

        debug!(
            "Configuration loaded: server port {}, database {}",
            app_config.server.port,
            app_config.database.display_target()
        );

        Ok(app_config)
    }
}

fn config_error_to_hoctap_error(err: ConfigError) -> HoctapError {
    HoctapError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn empty_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    #[test]
    fn test_defaults_without_sources() {
        let dir = empty_dir();
        let config = ConfigLoader::new(dir.path()).load_from(Vec::new()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.user, "root");
        assert_eq!(config.database.password, "");
        assert_eq!(config.database.name, "hoctap_api");
        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.database.max_idle_connections, 10);
    }

    #[test]
    fn test_named_variables_override_defaults() {
        let dir = empty_dir();
        let config = ConfigLoader::new(dir.path())
            .load_from(vars(&[
                ("DB_HOST", "db.internal"),
                ("DB_PORT", "3307"),
                ("DB_USER", "app"),
                ("DB_PASSWORD", "secret"),
                ("DB_NAME", "users"),
                ("SERVER_PORT", "9000"),
            ]))
            .unwrap();

        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 3307);
        assert_eq!(config.database.user, "app");
        assert_eq!(config.database.password, "secret");
        assert_eq!(config.database.name, "users");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let dir = empty_dir();
        let config = ConfigLoader::new(dir.path())
            .load_from(vars(&[("DB_HOST", ""), ("SERVER_PORT", "")]))
            .unwrap();

        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_non_numeric_port_is_rejected() {
        let dir = empty_dir();
        let result = ConfigLoader::new(dir.path()).load_from(vars(&[("DB_PORT", "abc")]));

        assert!(matches!(result, Err(HoctapError::Configuration(_))));
    }

    #[test]
    fn test_toml_layers() {
        let dir = empty_dir();
        fs::write(
            dir.path().join("default.toml"),
            "[database]\nhost = \"toml-host\"\nmax_connections = 40\n",
        )
        .unwrap();
        fs::write(dir.path().join("local.toml"), "[database]\nhost = \"local-host\"\n").unwrap();

        let config = ConfigLoader::new(dir.path()).load_from(Vec::new()).unwrap();

        assert_eq!(config.database.host, "local-host");
        assert_eq!(config.database.max_connections, 40);
        assert_eq!(config.database.max_idle_connections, 10);
    }

    #[test]
    fn test_prefixed_variables() {
        let dir = empty_dir();
        let config = ConfigLoader::new(dir.path())
            .load_from(vars(&[
                ("HOCTAP_DATABASE__MAX_CONNECTIONS", "50"),
                ("HOCTAP_OBSERVABILITY__LOG_FORMAT", "json"),
            ]))
            .unwrap();

        assert_eq!(config.database.max_connections, 50);
        assert!(config.observability.is_json());
    }

    #[test]
    fn test_named_variable_wins_over_file() {
        let dir = empty_dir();
        fs::write(dir.path().join("default.toml"), "[server]\nport = 7000\n").unwrap();

        let config = ConfigLoader::new(dir.path())
            .load_from(vars(&[("SERVER_PORT", "7100")]))
            .unwrap();

        assert_eq!(config.server.port, 7100);
    }

    #[test]
    fn test_invalid_pool_is_configuration_error() {
        let dir = empty_dir();
        let result = ConfigLoader::new(dir.path()).load_from(vars(&[
            ("HOCTAP_DATABASE__MAX_CONNECTIONS", "4"),
            ("HOCTAP_DATABASE__MAX_IDLE_CONNECTIONS", "8"),
        ]));

        match result {
            Err(HoctapError::Configuration(message)) => {
                assert!(message.contains("idle (8) cannot be greater than max (4)"));
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_env_file_is_not_fatal() {
        let dir = empty_dir();
        let loader = ConfigLoader::new(dir.path()).with_env_file(dir.path().join("config.env"));

        assert!(!loader.load_env_file());
    }

    #[test]
    fn test_env_file_is_loaded() {
        let dir = empty_dir();
        let env_file = dir.path().join("config.env");
        fs::write(&env_file, "HOCTAP_LOADER_TEST_MARKER=present\n").unwrap();

        let loader = ConfigLoader::new(dir.path()).with_env_file(&env_file);

        assert!(loader.load_env_file());
        assert_eq!(
            std::env::var("HOCTAP_LOADER_TEST_MARKER").as_deref(),
            Ok("present")
        );
    }
}

use crate::error::ConfigError;
use std::env;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DatabaseSettings, LoggingSettings, ServerOverrides, ServerSettings, Settings};

/// The settings file looked up in the working directory. It is optional.
pub const SETTINGS_FILE: &str = "superheroes";

/// The single environment-supplied connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Loads the application settings.
///
/// Sources are layered from lowest to highest precedence: built-in defaults,
/// an optional `superheroes.toml`, `SUPERHEROES__`-prefixed environment
/// variables, and finally `DATABASE_URL`.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(config::File::with_name(SETTINGS_FILE).required(false))
}

/// Same as [`load_config`] but reads the given file source instead of the default one.
pub fn load_config_from<S>(file: S) -> Result<Settings, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    layer_settings(file, env::var(DATABASE_URL_VAR).ok())
}

/// Builds the settings from every layer, with `database_url` taking precedence
/// over whatever the defaults, file, and prefixed environment say.
fn layer_settings<S>(file: S, database_url: Option<String>) -> Result<Settings, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .set_default("database.url", settings::DEFAULT_DATABASE_URL)?
        .set_default("database.max_connections", 5_i64)?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5555_i64)?
        .set_default("logging.filter", "info")?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("SUPERHEROES")
                .prefix_separator("__")
                .separator("__"),
        )
        .set_override_option("database.url", database_url)?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let file = toml_file("");
        let settings = layer_settings(config::File::from(file.path()), None).unwrap();

        assert_eq!(settings.database.url, "sqlite://app.db");
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.logging.filter, "info");
        assert!(settings.logging.directory.is_none());
    }

    #[test]
    fn database_url_beats_the_settings_file() {
        let file = toml_file("[database]\nurl = \"sqlite://from-file.db\"\n");

        let from_file = layer_settings(config::File::from(file.path()), None).unwrap();
        assert_eq!(from_file.database.url, "sqlite://from-file.db");

        let settings = layer_settings(
            config::File::from(file.path()),
            Some("sqlite:///var/lib/superheroes/app.db".to_string()),
        )
        .unwrap();
        assert_eq!(settings.database.url, "sqlite:///var/lib/superheroes/app.db");
    }

    #[test]
    fn empty_database_url_is_rejected() {
        let file = toml_file("");
        let err = layer_settings(config::File::from(file.path()), Some("  ".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn file_values_override_defaults() {
        let file = toml_file(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [logging]
            filter = "debug"
            directory = "logs"
            "#,
        );
        let settings = load_config_from(config::File::from(file.path())).unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.logging.filter, "debug");
        assert_eq!(settings.logging.directory.as_deref(), Some("logs"));
    }

    #[test]
    fn zero_connections_is_rejected() {
        let file = toml_file("[database]\nmax_connections = 0\n");
        let err = load_config_from(config::File::from(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}

use std::{env, path::PathBuf};

use lazy_static::lazy_static;
use paths::PathContext;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_FIELD_TTL_DAYS: i64 = 30;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub store_file: PathBuf,
    #[serde(default)]
    pub options_url: Option<String>,
    #[serde(default)]
    pub options_file: Option<PathBuf>,
    pub field_ttl_days: i64,
}

lazy_static! {
    pub static ref CONFIG_FOLDER: Option<PathBuf> = env::var("INTAKE_CONFIG").ok().map(PathBuf::from);
}

impl Config {
    /// Defaults, then `config.json5` / `config.toml` from the config directory.
    pub fn load(paths: &PathContext) -> Result<Self, config::ConfigError> {
        let config_dir = CONFIG_FOLDER.clone().unwrap_or_else(|| paths.config_dir());
        Self::from_dir(&config_dir, paths)
    }

    pub fn from_dir(config_dir: &std::path::Path, paths: &PathContext) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("store_file", paths.store_file().to_string_lossy().into_owned())?
            .set_default("field_ttl_days", DEFAULT_FIELD_TTL_DAYS)?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        for (file, format) in &config_files {
            let path = config_dir.join(file);
            if path.exists() {
                debug!(path = %path.display(), "reading configuration");
            }
            builder = builder.add_source(config::File::from(path).format(*format).required(false));
        }

        builder.build()?.try_deserialize()
    }

    pub fn field_ttl(&self) -> store::Ttl {
        store::Ttl::days(self.field_ttl_days)
    }
}

// Configuration definitions, functions and tests
//

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string as de_num;
use std::sync::Arc;

static ENV_PREFIX: &str = "ART";

// shared by every executable of the project
static GLOBAL_ENV_VAR: &str = "ARTICLES_ENV";

fn prefixed_env(suffix: &str) -> String {
    format!("{}__{}", ENV_PREFIX, suffix)
}

#[derive(Clone, derived_deref::Deref)]
pub struct Conf {
    #[target]
    pub env_conf: Arc<EnvConf>,
    pub env: Env,
}

impl Conf {
    pub fn new(env: Env, env_conf: EnvConf) -> Self {
        Self {
            env_conf: Arc::new(env_conf),
            env,
        }
    }

    /// Environment from env vars, then the matching configuration files.
    pub fn derive() -> anyhow::Result<Self> {
        let env = Env::derive().map_err(anyhow::Error::msg)?;
        let env_conf = EnvConf::derive(env)?;
        Ok(Self::new(env, env_conf))
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct EnvConf {
    #[serde(deserialize_with = "de_num")]
    pub port: u16,
    pub host: String,
    pub db: DbConf,
    pub log: Log,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub enum DbStorageEngine {
    Memory,
    SQLite,
    Sled,
}

impl DbStorageEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "mem",
            Self::SQLite => "sqlite",
            Self::Sled => "sled",
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct DbConf {
    pub storage_engine: DbStorageEngine,
    pub path: String,
}

impl DbConf {
    /// Opens the storage engine and creates missing relations.
    pub fn db_instance(&self) -> crate::db::Result<cozo::DbInstance> {
        crate::db::start_db(self.storage_engine.as_str(), &self.path)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub pretty: bool,
}

impl EnvConf {
    pub fn derive(env: Env) -> Result<Self, config::ConfigError> {
        fn join_filename(conf_dir: &std::path::Path, filename: &str) -> String {
            conf_dir.join(filename).to_string_lossy().into_owned()
        }

        let conf_dir = std::env::var(prefixed_env("CONF_DIR"))
            .map(std::path::PathBuf::from)
            .or_else(|_| std::env::current_dir().map(|base_path| base_path.join("conf")))
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;

        config::Config::builder()
            .add_source(
                config::File::with_name(&join_filename(&conf_dir, "default")).required(true),
            )
            .add_source(
                config::File::with_name(&join_filename(&conf_dir, env.as_ref())).required(false),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn test_default() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".into(),
            db: DbConf {
                storage_engine: DbStorageEngine::Memory,
                path: String::new(),
            },
            log: Log { pretty: false },
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

use derive_more::Display;

#[derive(Debug, PartialEq, Display, Clone, Copy)]
pub enum Env {
    #[display(fmt = "local")]
    Local,
    #[display(fmt = "prod")]
    Prod,
}

impl Env {
    pub fn derive() -> Result<Self, String> {
        let glob_env = std::env::var(GLOBAL_ENV_VAR).unwrap_or_else(|_| "local".into());

        // Or set a more specific per executable
        std::env::var(prefixed_env("ENV"))
            .unwrap_or(glob_env)
            .try_into()
    }

    #[cfg(test)]
    pub fn local(&self) -> bool {
        matches!(self, Self::Local)
    }

    #[cfg(test)]
    pub fn prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

impl AsRef<str> for Env {
    fn as_ref(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Env {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "prod" => Ok(Self::Prod),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `prod`.",
                other
            )),
        }
    }
}

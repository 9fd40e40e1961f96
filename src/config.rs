use derive_builder::Builder;
use merge::Merge;
use std::env;
use std::io::ErrorKind;
use std::net::{AddrParseError, IpAddr};
use std::num::ParseIntError;
use std::path::Path;
use std::str::{FromStr, ParseBoolError};
use tracing::{debug, info};

#[derive(Builder, Clone, Debug)]
#[builder(derive(Debug, serde::Deserialize, merge::Merge))]
pub struct RosterConfig {
    #[builder(default = "IpAddr::from([0, 0, 0, 0])")]
    pub address: IpAddr,
    #[builder(default = "8080")]
    pub port: u16,
    /// Start with the two sample users.
    #[builder(default = "true")]
    pub seed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] tokio::io::Error),
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("failed to build config: {0}")]
    Builder(#[from] RosterConfigBuilderError),
    #[error("failed to parse address: {0}")]
    ParseAddress(#[from] AddrParseError),
    #[error("failed to parse port as int: {0}")]
    ParsePort(#[from] ParseIntError),
    #[error("failed to parse seed flag: {0}")]
    ParseSeed(#[from] ParseBoolError),
}

impl RosterConfigBuilder {
    fn from_env() -> Result<Self, ConfigError> {
        info!("parsing config from environment variables");
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars<F: Fn(&str) -> Option<String>>(var: F) -> Result<Self, ConfigError> {
        let address = match var("ROSTER_ADDRESS").map(|s| s.parse()) {
            Some(p) => Some(p?),
            None => None,
        };
        let port = match var("ROSTER_PORT").map(|s| u16::from_str(&s)) {
            Some(p) => Some(p?),
            None => None,
        };
        let seed = match var("ROSTER_SEED").map(|s| bool::from_str(&s)) {
            Some(p) => Some(p?),
            None => None,
        };
        Ok(Self {
            address,
            port,
            seed,
        })
    }
}

async fn from_file<P: AsRef<Path>>(path: P) -> Result<RosterConfigBuilder, ConfigError> {
    match tokio::fs::read_to_string(&path).await {
        Ok(str) => {
            info!("parsing config file at `{}`", path.as_ref().display());
            Ok(toml::from_str(&str)?)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("no config file at `{}`", path.as_ref().display());
            Ok(RosterConfigBuilder::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolves the config from `overrides`, then the environment, then the file at `path`.
pub async fn read_config<P: AsRef<Path>>(
    path: P,
    mut overrides: RosterConfigBuilder,
) -> Result<RosterConfig, ConfigError> {
    overrides.merge(RosterConfigBuilder::from_env()?);
    overrides.merge(from_file(path).await?);
    Ok(overrides.build()?)
}

#[cfg(test)]
mod test {
    use crate::config::{read_config, ConfigError, RosterConfigBuilder};
    use merge::Merge;
    use std::collections::HashMap;
    use std::net::IpAddr;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = RosterConfigBuilder::default().build().unwrap();
        assert_eq!(config.address, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.port, 8080);
        assert!(config.seed);
    }

    #[test]
    fn parses_env_vars() {
        let builder = RosterConfigBuilder::from_vars(vars(&[
            ("ROSTER_ADDRESS", "127.0.0.1"),
            ("ROSTER_PORT", "3000"),
            ("ROSTER_SEED", "false"),
        ]))
        .unwrap();
        let config = builder.build().unwrap();
        assert_eq!(config.address, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.port, 3000);
        assert!(!config.seed);
    }

    #[test]
    fn rejects_bad_env_vars() {
        assert!(matches!(
            RosterConfigBuilder::from_vars(vars(&[("ROSTER_PORT", "eighty")])),
            Err(ConfigError::ParsePort(_))
        ));
        assert!(matches!(
            RosterConfigBuilder::from_vars(vars(&[("ROSTER_ADDRESS", "localhost:1")])),
            Err(ConfigError::ParseAddress(_))
        ));
        assert!(matches!(
            RosterConfigBuilder::from_vars(vars(&[("ROSTER_SEED", "yes")])),
            Err(ConfigError::ParseSeed(_))
        ));
    }

    #[test]
    fn earlier_layers_win() {
        let mut env = RosterConfigBuilder::from_vars(vars(&[("ROSTER_PORT", "3000")])).unwrap();
        let file: RosterConfigBuilder = toml::from_str("port = 9000\nseed = false\n").unwrap();
        env.merge(file);
        let config = env.build().unwrap();
        assert_eq!(config.port, 3000);
        assert!(!config.seed);
    }

    #[test]
    fn file_with_unknown_type_is_an_error() {
        assert!(toml::from_str::<RosterConfigBuilder>("port = \"high\"").is_err());
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let mut overrides = RosterConfigBuilder::default();
        overrides.port(4321);
        let config = read_config("/nonexistent/roster.toml", overrides)
            .await
            .unwrap();
        assert_eq!(config.port, 4321);
    }
}

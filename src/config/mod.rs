//! Environment-backed configuration.
//!
//! `SIMILARITY_ENV` picks a [`Profile`] (`PYTHON_ENV` is still honored when
//! it is unset); each profile carries a static set of defaults (model path,
//! bind address, port). Individual `SIMILARITY_*`
//! variables may override single values on top of the profile.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::constants::{DEFAULT_MAX_SEQ_LEN, DEFAULT_MODEL_NAME};
use crate::model::{ScoreOutput, ScorerConfig};

/// Named configuration bundle selected at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Developer machine: loopback bind, model next to the working directory.
    #[default]
    Local,
    /// Deployed host: all interfaces, model under the service user's home.
    Prod,
}

impl Profile {
    /// Maps the raw flag value to a profile. Only the exact value `prod`
    /// selects [`Profile::Prod`].
    pub fn parse(value: &str) -> Self {
        if value == "prod" {
            Profile::Prod
        } else {
            Profile::Local
        }
    }

    /// Reads `SIMILARITY_ENV`, then the legacy `PYTHON_ENV`, falling back to
    /// [`Profile::Local`].
    pub fn from_env() -> Self {
        env::var(Config::ENV_PROFILE)
            .or_else(|_| env::var(Config::ENV_LEGACY_PROFILE))
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Local => "local",
            Profile::Prod => "prod",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local profile model directory.
pub const LOCAL_MODEL_PATH: &str = "./sentence_similarity_model_klue";
/// Local profile port.
pub const LOCAL_PORT: u16 = 8085;

/// Production profile model directory.
pub const PROD_MODEL_PATH: &str = "/home/ubuntu/sentence_similarity_model_klue";
/// Production profile port.
pub const PROD_PORT: u16 = 8080;

/// Server configuration, immutable for the lifetime of the process.
///
/// Use [`Config::from_env`] to select the profile and apply overrides.
#[derive(Debug, Clone)]
pub struct Config {
    /// Profile the defaults were taken from.
    pub profile: Profile,

    /// Hub repository used to fetch the tokenizer when the model directory has none.
    pub model_name: String,

    /// Directory holding `config.json` and `model.safetensors`.
    pub model_path: PathBuf,

    /// IP address to bind to.
    pub bind_addr: IpAddr,

    /// HTTP server port.
    pub port: u16,

    /// Token budget for the sentence pair. Default: `128`.
    pub max_seq_len: usize,

    /// How the raw logit is turned into the reported score. Default: sigmoid.
    pub score_output: ScoreOutput,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_profile(Profile::Local)
    }
}

impl Config {
    const ENV_PROFILE: &'static str = "SIMILARITY_ENV";
    const ENV_LEGACY_PROFILE: &'static str = "PYTHON_ENV";
    const ENV_PORT: &'static str = "SIMILARITY_PORT";
    const ENV_BIND_ADDR: &'static str = "SIMILARITY_BIND_ADDR";
    const ENV_MODEL_PATH: &'static str = "SIMILARITY_MODEL_PATH";
    const ENV_MODEL_NAME: &'static str = "SIMILARITY_MODEL_NAME";
    const ENV_MAX_SEQ_LEN: &'static str = "SIMILARITY_MAX_SEQ_LEN";
    const ENV_SCORE_OUTPUT: &'static str = "SIMILARITY_SCORE_OUTPUT";

    /// Returns the static option set for `profile`.
    pub fn for_profile(profile: Profile) -> Self {
        let (model_path, bind_addr, port) = match profile {
            Profile::Local => (
                LOCAL_MODEL_PATH,
                IpAddr::V4(Ipv4Addr::LOCALHOST),
                LOCAL_PORT,
            ),
            Profile::Prod => (
                PROD_MODEL_PATH,
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                PROD_PORT,
            ),
        };

        Self {
            profile,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            model_path: PathBuf::from(model_path),
            bind_addr,
            port,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            score_output: ScoreOutput::default(),
        }
    }

    /// Selects the profile from `SIMILARITY_ENV` and applies any overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::for_profile(Profile::from_env());

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_path = Self::parse_path_from_env(Self::ENV_MODEL_PATH, defaults.model_path);
        let model_name = Self::parse_string_from_env(Self::ENV_MODEL_NAME, defaults.model_name);
        let max_seq_len = Self::parse_max_seq_len_from_env(defaults.max_seq_len)?;
        let score_output = Self::parse_score_output_from_env(defaults.score_output)?;

        Ok(Self {
            profile: defaults.profile,
            model_name,
            model_path,
            bind_addr,
            port,
            max_seq_len,
            score_output,
        })
    }

    /// Checks that the model directory exists (does not look inside it).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.model_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.model_path.clone(),
            });
        }
        if !self.model_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.model_path.clone(),
            });
        }
        if self.max_seq_len == 0 {
            return Err(ConfigError::InvalidMaxSeqLen {
                value: self.max_seq_len.to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    /// Scorer settings derived from this configuration.
    pub fn scorer_config(&self) -> ScorerConfig {
        ScorerConfig::new(&self.model_path)
            .with_model_name(self.model_name.clone())
            .with_max_seq_len(self.max_seq_len)
            .with_score_output(self.score_output)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_max_seq_len_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_MAX_SEQ_LEN) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(len) if len > 0 => Ok(len),
                _ => Err(ConfigError::InvalidMaxSeqLen { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_score_output_from_env(default: ScoreOutput) -> Result<ScoreOutput, ConfigError> {
        match env::var(Self::ENV_SCORE_OUTPUT) {
            Ok(value) => {
                ScoreOutput::from_name(&value).ok_or(ConfigError::InvalidScoreOutput { value })
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(default)
    }
}

//! Run configuration, read once from the process environment and then
//! passed explicitly through the pipeline.

use std::fmt;

use crate::error::{MplError, Result};
use crate::filter::FilterStrategy;

mod env;

use self::env::{EnvLookup, RequiredEnv, read_env_usize, read_non_empty_env};

pub const ENVIRONMENT_NAMES: [&str; 3] = ["DEV", "UAT", "PROD"];
pub const DESTINATION_URL_ENV: &str = "IFLOW_URL";
pub const DESTINATION_USERNAME_ENV: &str = "IFLOW_USERNAME";
pub const DESTINATION_PASSWORD_ENV: &str = "IFLOW_PASSWORD";
pub const FILTER_MODE_ENV: &str = "MPL_FILTER_MODE";
pub const TOP_N_ENV: &str = "MPL_TOP_N";
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub name: String,
    pub username: String,
    pub password: String,
    pub base_url: String,
}

impl EnvironmentConfig {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        base_url: &str,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            base_url: normalize_base_url(base_url),
        }
    }

    fn read(name: &str, required: &mut RequiredEnv<'_>) -> Self {
        let username = required.require(&format!("{name}_SAP_USERNAME"));
        let password = required.require(&format!("{name}_SAP_PASSWORD"));
        let base_url = required.require(&format!("{name}_SAP_BASE_URL"));
        Self::new(name, username, password, &base_url)
    }
}

impl fmt::Debug for EnvironmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentConfig")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct DestinationConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for DestinationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestinationConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environments: Vec<EnvironmentConfig>,
    pub destination: DestinationConfig,
    pub filter: FilterStrategy,
    pub top_n: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Every required variable is checked before returning, and a
    /// [`MplError::MissingConfig`] names all of the absent or blank ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup: &EnvLookup<'_> = &lookup;
        let mut required = RequiredEnv::new(lookup);

        let environments = ENVIRONMENT_NAMES
            .iter()
            .map(|name| EnvironmentConfig::read(name, &mut required))
            .collect::<Vec<_>>();
        let destination = DestinationConfig {
            url: required.require(DESTINATION_URL_ENV),
            username: required.require(DESTINATION_USERNAME_ENV),
            password: required.require(DESTINATION_PASSWORD_ENV),
        };

        let missing = required.into_missing();
        if !missing.is_empty() {
            return Err(MplError::MissingConfig(missing));
        }

        let filter = match read_non_empty_env(lookup, FILTER_MODE_ENV) {
            Some(raw) => FilterStrategy::parse(&raw)?,
            None => FilterStrategy::default(),
        };
        let top_n = read_env_usize(lookup, TOP_N_ENV, DEFAULT_TOP_N, 1);

        Ok(Self {
            environments,
            destination,
            filter,
            top_n,
        })
    }

    #[must_use]
    pub fn with_filter(mut self, filter: FilterStrategy) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n.max(1);
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

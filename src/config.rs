use crate::error::Result;
use serde::Deserialize;

/// Variables read from the process environment.
///
/// Field names map to upper-case variable names (`PORT`, `BUILD_NUMBER`, ...).
#[derive(Debug, Deserialize)]
struct EnvVars {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_environment")]
    environment: String,
    #[serde(default = "unknown")]
    deployment_time: String,
    #[serde(default = "unknown")]
    build_number: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_environment() -> String {
    "development".to_string()
}

fn unknown() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    /// `None` binds an ephemeral port.
    pub port: Option<u16>,
    pub environment: String,
    pub deployment_time: String,
    pub build_number: String,
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self {
            host: default_host(),
            port: Some(default_port()),
            environment: default_environment(),
            deployment_time: unknown(),
            build_number: unknown(),
        }
    }

    /// Loopback on an ephemeral port, for tests and embedding.
    pub fn local() -> Self {
        Self::new().with_host("127.0.0.1").with_ephemeral_port()
    }

    /// Loads `HOST`, `PORT`, `ENVIRONMENT`, `DEPLOYMENT_TIME` and `BUILD_NUMBER`.
    pub fn from_env() -> Result<Self> {
        Ok(envy::from_env::<EnvVars>()?.into())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, EnvVars>(vars)?.into())
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_ephemeral_port(mut self) -> Self {
        self.port = None;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_deployment_time(mut self, deployment_time: impl Into<String>) -> Self {
        self.deployment_time = deployment_time.into();
        self
    }

    pub fn with_build_number(mut self, build_number: impl Into<String>) -> Self {
        self.build_number = build_number.into();
        self
    }

    pub(crate) fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port.unwrap_or(0))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<EnvVars> for ServiceConfig {
    fn from(vars: EnvVars) -> Self {
        Self {
            host: vars.host,
            port: Some(vars.port),
            environment: vars.environment,
            deployment_time: vars.deployment_time,
            build_number: vars.build_number,
        }
    }
}

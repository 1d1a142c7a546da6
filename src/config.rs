use rusoto_core::Region;
use std::env;
use std::str::FromStr;

const EXEC_ENV: &str = "EXEC_ENV";
const AWS_REGION: &str = "AWS_REGION";

/// Runtime settings read from the process environment at the Lambda entry
/// point and passed down explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub exec_env: Option<String>,
    pub region: Region,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            exec_env: env::var(EXEC_ENV).ok().filter(|value| !value.is_empty()),
            region: env::var(AWS_REGION)
                .ok()
                .and_then(|name| Region::from_str(&name).ok())
                .unwrap_or_default(),
        }
    }

    /// Leading line for status bodies, empty when no environment label is set.
    pub fn environment_banner(&self) -> String {
        self.exec_env
            .as_ref()
            .map(|env| format!("execution environment: {}\n", env))
            .unwrap_or_default()
    }
}

//! Execution placement of a configuration value.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where a configuration's value is needed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigEnv {
    /// Loaded in the browser only
    #[serde(rename = "client-only")]
    ClientOnly,
    /// Loaded on the server only
    #[serde(rename = "server-only")]
    ServerOnly,
    /// Loaded on both sides
    #[serde(rename = "server-and-client")]
    ServerAndClient,
    /// Consumed while resolving configuration, never shipped
    #[serde(rename = "config-only")]
    ConfigOnly,
    /// Needed wherever routing runs
    #[serde(rename = "_routing-env")]
    Routing,
}

impl ConfigEnv {
    pub const ALL: [ConfigEnv; 5] = [
        Self::ClientOnly,
        Self::ServerOnly,
        Self::ServerAndClient,
        Self::ConfigOnly,
        Self::Routing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientOnly => "client-only",
            Self::ServerOnly => "server-only",
            Self::ServerAndClient => "server-and-client",
            Self::ConfigOnly => "config-only",
            Self::Routing => "_routing-env",
        }
    }
}

impl std::fmt::Display for ConfigEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConfigEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|e| e.as_str()).collect();
                format!("unknown env '{s}', expected one of: {}", allowed.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_round_trips_through_str() {
        for env in ConfigEnv::ALL {
            assert_eq!(env.as_str().parse::<ConfigEnv>().unwrap(), env);
        }
    }

    #[test]
    fn test_env_serde_names() {
        let json = serde_json::to_string(&ConfigEnv::ServerAndClient).unwrap();
        assert_eq!(json, "\"server-and-client\"");
        let env: ConfigEnv = serde_json::from_str("\"_routing-env\"").unwrap();
        assert_eq!(env, ConfigEnv::Routing);
    }

    #[test]
    fn test_unknown_env_lists_alternatives() {
        let err = "server".parse::<ConfigEnv>().unwrap_err();
        assert!(err.contains("server-only"));
    }
}

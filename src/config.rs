//! Configuration for the D1 arm command protocol and transport

use serde::{Deserialize, Serialize};
use std::fs;

use crate::InitError;

/// Protocol constants for the arm controller's command documents.
///
/// The acceleration (`habr`) and precision level (`plyLevel`) values are
/// opaque controller constants carried per joint slot; their semantics
/// are not documented by the vendor and they are not interpreted here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProtocolConfig {
    /// Number of controllable joints on the arm
    #[serde(default = "default_dof_count")]
    pub dof_count: usize,
    /// Command family identifier, fixed for joint-position commands
    #[serde(default = "default_sequence_id")]
    pub sequence_id: u32,
    /// Addressed sub-controller, fixed for the single-arm case
    #[serde(default = "default_target_address")]
    pub target_address: u32,
    /// Command semantics selector (2 = joint positions with duration)
    #[serde(default = "default_function_code")]
    pub function_code: u32,
    /// Per-joint `habr` slot value
    #[serde(default = "default_acceleration")]
    pub acceleration: i64,
    /// Per-joint `plyLevel` slot value
    #[serde(default = "default_precision_level")]
    pub precision_level: i64,
    /// Seconds allotted to reach the target pose when the caller gives none
    #[serde(default = "default_duration")]
    pub default_duration: f64,
}

fn default_dof_count() -> usize {
    7
}

fn default_sequence_id() -> u32 {
    4
}

fn default_target_address() -> u32 {
    1
}

fn default_function_code() -> u32 {
    2
}

fn default_acceleration() -> i64 {
    20
}

fn default_precision_level() -> i64 {
    3
}

fn default_duration() -> f64 {
    2.0
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            dof_count: default_dof_count(),
            sequence_id: default_sequence_id(),
            target_address: default_target_address(),
            function_code: default_function_code(),
            acceleration: default_acceleration(),
            precision_level: default_precision_level(),
            default_duration: default_duration(),
        }
    }
}

/// Transport binding for the outbound command channel.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TransportConfig {
    /// Topic the arm controller subscribes to
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Zenoh endpoint to connect to; `None` uses ambient zenoh configuration
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_topic() -> String {
    "rt/arm_Command".to_string()
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            endpoint: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub protocol: ProtocolConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &str) -> Result<Self, InitError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| InitError::Config(format!("Failed to read {}: {}", path, e)))?;

        let config: Config = serde_yaml::from_str(&contents)
            .map_err(|e| InitError::Config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Load configuration from a YAML file if one is given, otherwise
    /// fall back to defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, InitError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

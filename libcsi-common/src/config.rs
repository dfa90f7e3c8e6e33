//! Static driver configuration.
//!
//! A driver process describes itself in a small YAML document:
//!
//! ```yaml
//! name: ebs.csi.example.com
//! version: 1.0.0
//! node_id: node-42
//! controller_capabilities: [CREATE_DELETE_VOLUME, EXPAND_VOLUME]
//! access_modes: [SINGLE_NODE_WRITER]
//! plugin_services: [CONTROLLER_SERVICE]
//! volume_expansion: [ONLINE]
//! ```
//!
//! Environment variables:
//! - `CSI_NODE_ID`: when set and non-empty, replaces `node_id`.  Lets one
//!   document be shipped to every node of a cluster.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::driver::CsiDriver;
use crate::error::CsiError;
use crate::identity::DriverIdentity;
use crate::types::{AccessMode, ControllerRpcType, PluginServiceType, VolumeExpansionType};

/// Environment variable overriding [`DriverConfig::node_id`].
pub const NODE_ID_ENV: &str = "CSI_NODE_ID";

/// Identity and capabilities of a driver, as loaded at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub node_id: String,
    #[serde(default)]
    pub controller_capabilities: Vec<ControllerRpcType>,
    #[serde(default)]
    pub access_modes: Vec<AccessMode>,
    #[serde(default)]
    pub plugin_services: Vec<PluginServiceType>,
    #[serde(default)]
    pub volume_expansion: Vec<VolumeExpansionType>,
}

impl DriverConfig {
    pub fn from_yaml(doc: &str) -> Result<Self, CsiError> {
        serde_yaml::from_str(doc)
            .map_err(|e| CsiError::Configuration(format!("invalid driver config: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CsiError> {
        let path = path.as_ref();
        let doc = std::fs::read_to_string(path)
            .map_err(|e| CsiError::Configuration(format!("read {}: {e}", path.display())))?;
        Self::from_yaml(&doc)
    }

    /// Apply `CSI_NODE_ID` from the process environment.
    pub fn apply_env(self) -> Self {
        self.with_node_id_override(std::env::var(NODE_ID_ENV).ok())
    }

    /// Use the given node id instead of the configured one, unless it is
    /// missing or empty.
    pub fn with_node_id_override(mut self, node_id: Option<String>) -> Self {
        if let Some(id) = node_id.filter(|id| !id.is_empty()) {
            self.node_id = id;
        }
        self
    }

    /// Validate the identity and register every capability, in that order.
    pub fn build(&self) -> Result<CsiDriver, CsiError> {
        let identity = DriverIdentity::new(
            self.name.as_str(),
            self.version.as_str(),
            self.node_id.as_str(),
        )?;
        Ok(CsiDriver::builder(identity)
            .controller_capabilities(&self.controller_capabilities)
            .access_modes(&self.access_modes)
            .plugin_capabilities(&self.plugin_services, &self.volume_expansion)
            .build())
    }
}

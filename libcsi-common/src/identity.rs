//! Driver identity and the CSI Identity service trait.
//!
//! [`DriverIdentity`] is validated once when the driver process starts; an
//! instance with an empty field cannot exist.  The [`CsiIdentity`] trait is
//! the discovery surface the orchestrator talks to, implemented by
//! [`crate::CsiDriver`].

use async_trait::async_trait;
use tracing::error;

use crate::error::CsiError;
use crate::types::{PluginCapability, PluginInfo};

/// Immutable name, version and node of a driver instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverIdentity {
    name: String,
    version: String,
    node_id: String,
}

impl DriverIdentity {
    /// Validate and build an identity.
    ///
    /// Fields are checked in the order name, node id, version; only the
    /// first empty one is reported.  The vendor version reported to the
    /// orchestrator is the driver version, and no version format is enforced.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        node_id: impl Into<String>,
    ) -> Result<Self, CsiError> {
        let (name, version, node_id) = (name.into(), version.into(), node_id.into());

        if name.is_empty() {
            error!("driver name missing");
            return Err(CsiError::Configuration("driver name missing".into()));
        }
        if node_id.is_empty() {
            error!(driver = %name, "node id missing");
            return Err(CsiError::Configuration("node id missing".into()));
        }
        if version.is_empty() {
            error!(driver = %name, "version missing");
            return Err(CsiError::Configuration("version missing".into()));
        }

        Ok(Self {
            name,
            version,
            node_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Plugin info as answered to `GetPluginInfo`.
    pub fn plugin_info(&self) -> PluginInfo {
        PluginInfo {
            name: self.name.clone(),
            vendor_version: self.version.clone(),
        }
    }
}

/// Discovery surface answered from a driver's identity and frozen capability
/// table.
///
/// [`crate::CsiDriver`] implements it without touching any external
/// resource, so none of the methods fail in practice.
#[async_trait]
pub trait CsiIdentity: Send + Sync {
    /// Driver name, with the driver version as vendor version.
    async fn get_plugin_info(&self) -> Result<PluginInfo, CsiError>;

    /// Readiness.  A built driver always reports `true`.
    async fn probe(&self) -> Result<bool, CsiError>;

    /// The merged service and volume-expansion features, service entries
    /// first, each in registration order.
    async fn get_plugin_capabilities(&self) -> Result<Vec<PluginCapability>, CsiError>;
}

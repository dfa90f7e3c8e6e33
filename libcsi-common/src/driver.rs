//! The frozen driver value shared by all request handlers.
//!
//! A [`CsiDriver`] is assembled once at startup through [`DriverBuilder`] and
//! then shared as `Arc<CsiDriver>`.  It exposes no `&mut` access to its
//! capability table, so registration cannot overlap with validation traffic
//! and no locking is needed on the read path.
//!
//! ```
//! use libcsi_common::{ControllerRpcType, CsiDriver, DriverIdentity};
//!
//! let identity = DriverIdentity::new("ebs.csi.example.com", "1.0.0", "node-42")?;
//! let driver = CsiDriver::builder(identity)
//!     .controller_capabilities(&[ControllerRpcType::CreateDeleteVolume])
//!     .build();
//!
//! assert!(driver
//!     .validate_controller_service_request(ControllerRpcType::CreateDeleteVolume)
//!     .is_ok());
//! assert!(driver
//!     .validate_controller_service_request(ControllerRpcType::ExpandVolume)
//!     .is_err());
//! # Ok::<(), libcsi_common::CsiError>(())
//! ```

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::capability::CapabilitySet;
use crate::error::CsiError;
use crate::identity::{CsiIdentity, DriverIdentity};
use crate::message::CsiMessage;
use crate::types::*;

/// Controller RPCs a driver may receive.
///
/// Each maps to the controller capability it requires; handlers call
/// [`CsiDriver::guard`] before doing any work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerRpc {
    CreateVolume,
    DeleteVolume,
    ControllerPublishVolume,
    ControllerUnpublishVolume,
    ValidateVolumeCapabilities,
    ListVolumes,
    GetCapacity,
    ControllerGetCapabilities,
    CreateSnapshot,
    DeleteSnapshot,
    ListSnapshots,
    ControllerExpandVolume,
    ControllerGetVolume,
    ControllerModifyVolume,
}

impl ControllerRpc {
    /// Capability that must be advertised for this RPC to be served.
    ///
    /// Mandatory RPCs map to [`ControllerRpcType::Unknown`], which always
    /// validates.
    pub const fn required_capability(&self) -> ControllerRpcType {
        match self {
            Self::CreateVolume | Self::DeleteVolume => ControllerRpcType::CreateDeleteVolume,
            Self::ControllerPublishVolume | Self::ControllerUnpublishVolume => {
                ControllerRpcType::PublishUnpublishVolume
            }
            Self::ListVolumes => ControllerRpcType::ListVolumes,
            Self::GetCapacity => ControllerRpcType::GetCapacity,
            Self::CreateSnapshot | Self::DeleteSnapshot => ControllerRpcType::CreateDeleteSnapshot,
            Self::ListSnapshots => ControllerRpcType::ListSnapshots,
            Self::ControllerExpandVolume => ControllerRpcType::ExpandVolume,
            Self::ControllerGetVolume => ControllerRpcType::GetVolume,
            Self::ControllerModifyVolume => ControllerRpcType::ModifyVolume,
            Self::ValidateVolumeCapabilities | Self::ControllerGetCapabilities => {
                ControllerRpcType::Unknown
            }
        }
    }
}

/// Startup-time assembly of a [`CsiDriver`].
#[derive(Debug, Clone)]
pub struct DriverBuilder {
    identity: DriverIdentity,
    capabilities: CapabilitySet,
}

impl DriverBuilder {
    pub fn new(identity: DriverIdentity) -> Self {
        Self {
            identity,
            capabilities: CapabilitySet::new(),
        }
    }

    pub fn controller_capabilities(mut self, types: &[ControllerRpcType]) -> Self {
        self.capabilities.set_controller_capabilities(types);
        self
    }

    /// Chainable form of [`Self::set_access_modes`] for callers that read
    /// the modes back from the built [`CsiDriver`].
    pub fn access_modes(mut self, modes: &[AccessMode]) -> Self {
        self.capabilities.set_access_modes(modes);
        self
    }

    /// Register access modes and hand back the built descriptors, for
    /// callers that keep them around to answer discovery queries.
    pub fn set_access_modes(&mut self, modes: &[AccessMode]) -> Vec<VolumeCapabilityAccessMode> {
        self.capabilities.set_access_modes(modes)
    }

    pub fn plugin_capabilities(
        mut self,
        services: &[PluginServiceType],
        expansions: &[VolumeExpansionType],
    ) -> Self {
        self.capabilities.set_plugin_capabilities(services, expansions);
        self
    }

    /// Freeze the capability table.
    pub fn build(self) -> CsiDriver {
        CsiDriver {
            identity: self.identity,
            capabilities: self.capabilities,
        }
    }
}

/// Identity plus the frozen capability table of a driver instance.
#[derive(Debug, Clone)]
pub struct CsiDriver {
    identity: DriverIdentity,
    capabilities: CapabilitySet,
}

impl CsiDriver {
    pub fn builder(identity: DriverIdentity) -> DriverBuilder {
        DriverBuilder::new(identity)
    }

    pub fn identity(&self) -> &DriverIdentity {
        &self.identity
    }

    pub fn name(&self) -> &str {
        self.identity.name()
    }

    pub fn version(&self) -> &str {
        self.identity.version()
    }

    pub fn node_id(&self) -> &str {
        self.identity.node_id()
    }

    pub fn plugin_info(&self) -> PluginInfo {
        self.identity.plugin_info()
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn controller_capabilities(&self) -> &[ControllerServiceCapability] {
        self.capabilities.controller_capabilities()
    }

    pub fn volume_capability_access_modes(&self) -> &[VolumeCapabilityAccessMode] {
        self.capabilities.access_modes()
    }

    pub fn plugin_capabilities(&self) -> &[PluginCapability] {
        self.capabilities.plugin_capabilities()
    }

    /// See [`CapabilitySet::validate_controller_service_request`].
    pub fn validate_controller_service_request(
        &self,
        rpc: ControllerRpcType,
    ) -> Result<(), CsiError> {
        self.capabilities.validate_controller_service_request(rpc)
    }

    /// See [`CapabilitySet::validate_volume_capabilities`].
    pub fn validate_volume_capabilities(&self, modes: &[AccessMode]) -> Result<(), CsiError> {
        self.capabilities.validate_volume_capabilities(modes)
    }

    /// Reject `rpc` unless the capability it requires was advertised.
    pub fn guard(&self, rpc: ControllerRpc) -> Result<(), CsiError> {
        self.validate_controller_service_request(rpc.required_capability())
    }

    /// Answer a discovery request with its response message.
    ///
    /// Rejections come back as [`CsiMessage::Error`]; a response variant
    /// sent as a request is itself rejected.
    #[instrument(skip_all, fields(request = %request))]
    pub async fn handle(&self, request: CsiMessage) -> CsiMessage {
        debug!("CSI discovery request received");
        match request {
            CsiMessage::GetPluginInfo => match self.get_plugin_info().await {
                Ok(info) => CsiMessage::PluginInfoResponse(info),
                Err(e) => CsiMessage::Error(e),
            },
            CsiMessage::GetPluginCapabilities => match self.get_plugin_capabilities().await {
                Ok(caps) => CsiMessage::PluginCapabilitiesResponse(caps),
                Err(e) => CsiMessage::Error(e),
            },
            CsiMessage::Probe => match self.probe().await {
                Ok(ready) => CsiMessage::ProbeResult(ready),
                Err(e) => CsiMessage::Error(e),
            },
            CsiMessage::ControllerGetCapabilities => {
                CsiMessage::ControllerCapabilitiesResponse(self.controller_capabilities().to_vec())
            }
            CsiMessage::ValidateControllerRequest(rpc) => {
                match self.validate_controller_service_request(rpc) {
                    Ok(()) => CsiMessage::Ok,
                    Err(e) => CsiMessage::Error(e),
                }
            }
            CsiMessage::ValidateVolumeCapabilities(modes) => {
                match self.validate_volume_capabilities(&modes) {
                    Ok(()) => CsiMessage::Ok,
                    Err(e) => CsiMessage::Error(e),
                }
            }
            other => CsiMessage::Error(CsiError::InvalidArgument(format!(
                "unexpected message: {other}"
            ))),
        }
    }
}

#[async_trait]
impl CsiIdentity for CsiDriver {
    async fn get_plugin_info(&self) -> Result<PluginInfo, CsiError> {
        Ok(self.plugin_info())
    }

    // Nothing external to wait on: a built driver is always ready.
    async fn probe(&self) -> Result<bool, CsiError> {
        Ok(true)
    }

    async fn get_plugin_capabilities(&self) -> Result<Vec<PluginCapability>, CsiError> {
        Ok(self.plugin_capabilities().to_vec())
    }
}

//! Capability-discovery messages exchanged with the orchestrator.
//!
//! [`CsiMessage`] is the envelope the RPC-serving layer decodes from the wire
//! and hands to [`crate::CsiDriver::handle`].  The transport itself lives
//! outside this crate; only the JSON encoding is defined here.

use serde::{Deserialize, Serialize};

use crate::error::CsiError;
use crate::types::*;

/// Top-level message envelope for capability discovery.
///
/// A request variant is answered with the matching response variant or
/// [`CsiMessage::Error`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CsiMessage {
    // ----- Requests --------------------------------------------------------
    /// Query plugin info (Identity).
    GetPluginInfo,
    /// Query plugin capabilities (Identity).
    GetPluginCapabilities,
    /// Health probe (Identity).
    Probe,
    /// Query the registered controller capabilities (Controller).
    ControllerGetCapabilities,
    /// Check a controller RPC type against the advertised set.
    ValidateControllerRequest(ControllerRpcType),
    /// Check requested access modes against the registered ones.
    ValidateVolumeCapabilities(Vec<AccessMode>),

    // ----- Responses -------------------------------------------------------
    /// Plugin information.
    PluginInfoResponse(PluginInfo),
    /// Plugin capabilities, in registration order.
    PluginCapabilitiesResponse(Vec<PluginCapability>),
    /// Probe result.
    ProbeResult(bool),
    /// Controller capabilities, in registration order.
    ControllerCapabilitiesResponse(Vec<ControllerServiceCapability>),
    /// Generic success acknowledgement (no payload).
    Ok,
    /// The request was rejected.
    Error(CsiError),
}

impl CsiMessage {
    /// Whether this variant is a request the driver answers.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Self::GetPluginInfo
                | Self::GetPluginCapabilities
                | Self::Probe
                | Self::ControllerGetCapabilities
                | Self::ValidateControllerRequest(_)
                | Self::ValidateVolumeCapabilities(_)
        )
    }

    /// Encode as JSON for the wire.
    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decode a message received from the wire.
    pub fn decode(buf: &[u8]) -> Result<Self, CsiError> {
        serde_json::from_slice(buf)
            .map_err(|e| CsiError::InvalidArgument(format!("malformed message: {e}")))
    }
}

impl std::fmt::Display for CsiMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GetPluginInfo => f.write_str("GetPluginInfo"),
            Self::GetPluginCapabilities => f.write_str("GetPluginCapabilities"),
            Self::Probe => f.write_str("Probe"),
            Self::ControllerGetCapabilities => f.write_str("ControllerGetCapabilities"),
            Self::ValidateControllerRequest(rpc) => {
                write!(f, "ValidateControllerRequest({})", rpc)
            }
            Self::ValidateVolumeCapabilities(modes) => {
                write!(f, "ValidateVolumeCapabilities(count={})", modes.len())
            }
            Self::PluginInfoResponse(info) => write!(f, "PluginInfo(name={})", info.name),
            Self::PluginCapabilitiesResponse(caps) => {
                write!(f, "PluginCapabilities(count={})", caps.len())
            }
            Self::ProbeResult(ok) => write!(f, "ProbeResult({})", ok),
            Self::ControllerCapabilitiesResponse(caps) => {
                write!(f, "ControllerCapabilities(count={})", caps.len())
            }
            Self::Ok => f.write_str("Ok"),
            Self::Error(e) => write!(f, "Error({})", e),
        }
    }
}

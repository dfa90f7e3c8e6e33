//! Protocol enumerations and the capability descriptors reported to the
//! orchestrator.
//!
//! The identifier domains here are fixed by the storage-orchestration
//! protocol.  Every enum serializes with the protocol's wire name (e.g.
//! `CREATE_DELETE_VOLUME`) and its [`fmt::Display`] impl prints the same name,
//! so log records and error payloads match what the orchestrator sees.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Implements `as_str` and `Display` for a protocol enum from a single
/// variant-to-wire-name table.
macro_rules! wire_names {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Protocol wire name of this identifier.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Controller service RPC types
// ---------------------------------------------------------------------------

/// Optional controller RPCs a driver may advertise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControllerRpcType {
    /// Sentinel: no specific optional RPC requested.
    Unknown,
    CreateDeleteVolume,
    PublishUnpublishVolume,
    ListVolumes,
    GetCapacity,
    CreateDeleteSnapshot,
    ListSnapshots,
    CloneVolume,
    PublishReadonly,
    ExpandVolume,
    ListVolumesPublishedNodes,
    VolumeCondition,
    GetVolume,
    SingleNodeMultiWriter,
    ModifyVolume,
}

wire_names!(ControllerRpcType {
    Unknown => "UNKNOWN",
    CreateDeleteVolume => "CREATE_DELETE_VOLUME",
    PublishUnpublishVolume => "PUBLISH_UNPUBLISH_VOLUME",
    ListVolumes => "LIST_VOLUMES",
    GetCapacity => "GET_CAPACITY",
    CreateDeleteSnapshot => "CREATE_DELETE_SNAPSHOT",
    ListSnapshots => "LIST_SNAPSHOTS",
    CloneVolume => "CLONE_VOLUME",
    PublishReadonly => "PUBLISH_READONLY",
    ExpandVolume => "EXPAND_VOLUME",
    ListVolumesPublishedNodes => "LIST_VOLUMES_PUBLISHED_NODES",
    VolumeCondition => "VOLUME_CONDITION",
    GetVolume => "GET_VOLUME",
    SingleNodeMultiWriter => "SINGLE_NODE_MULTI_WRITER",
    ModifyVolume => "MODIFY_VOLUME",
});

/// A controller capability as reported by `ControllerGetCapabilities`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ControllerServiceCapability {
    pub rpc: ControllerRpcType,
}

impl From<ControllerRpcType> for ControllerServiceCapability {
    fn from(rpc: ControllerRpcType) -> Self {
        Self { rpc }
    }
}

// ---------------------------------------------------------------------------
// Volume access modes
// ---------------------------------------------------------------------------

/// Describes how many nodes may mount a volume and with what access.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessMode {
    Unknown,
    /// Published once as read/write on a single node.
    SingleNodeWriter,
    /// Published once as read-only on a single node.
    SingleNodeReaderOnly,
    /// Published as read-only on multiple nodes.
    MultiNodeReaderOnly,
    /// Published on multiple nodes, only one of them writable.
    MultiNodeSingleWriter,
    /// Published as read/write on multiple nodes.
    MultiNodeMultiWriter,
    /// Single node, single workload writer.
    SingleNodeSingleWriter,
    /// Single node, several workloads may write.
    SingleNodeMultiWriter,
}

wire_names!(AccessMode {
    Unknown => "UNKNOWN",
    SingleNodeWriter => "SINGLE_NODE_WRITER",
    SingleNodeReaderOnly => "SINGLE_NODE_READER_ONLY",
    MultiNodeReaderOnly => "MULTI_NODE_READER_ONLY",
    MultiNodeSingleWriter => "MULTI_NODE_SINGLE_WRITER",
    MultiNodeMultiWriter => "MULTI_NODE_MULTI_WRITER",
    SingleNodeSingleWriter => "SINGLE_NODE_SINGLE_WRITER",
    SingleNodeMultiWriter => "SINGLE_NODE_MULTI_WRITER",
});

/// An access mode descriptor as returned to the orchestrator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VolumeCapabilityAccessMode {
    pub mode: AccessMode,
}

impl From<AccessMode> for VolumeCapabilityAccessMode {
    fn from(mode: AccessMode) -> Self {
        Self { mode }
    }
}

// ---------------------------------------------------------------------------
// Plugin capabilities
// ---------------------------------------------------------------------------

/// Driver-wide service features.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PluginServiceType {
    Unknown,
    /// Plugin provides a Controller service.
    ControllerService,
    /// Volumes may not be equally accessible from every node.
    VolumeAccessibilityConstraints,
    /// Plugin provides a GroupController service.
    GroupControllerService,
}

wire_names!(PluginServiceType {
    Unknown => "UNKNOWN",
    ControllerService => "CONTROLLER_SERVICE",
    VolumeAccessibilityConstraints => "VOLUME_ACCESSIBILITY_CONSTRAINTS",
    GroupControllerService => "GROUP_CONTROLLER_SERVICE",
});

/// Volume expansion support advertised by the plugin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolumeExpansionType {
    Unknown,
    /// Volumes may be expanded while published.
    Online,
    /// Volumes may only be expanded while unpublished.
    Offline,
}

wire_names!(VolumeExpansionType {
    Unknown => "UNKNOWN",
    Online => "ONLINE",
    Offline => "OFFLINE",
});

/// One entry of the plugin capability collection.
///
/// The variant is the tag, so the two feature domains can never be confused
/// on the wire: `{"service":"CONTROLLER_SERVICE"}` vs
/// `{"volume-expansion":"ONLINE"}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PluginCapability {
    Service(PluginServiceType),
    VolumeExpansion(VolumeExpansionType),
}

impl PluginCapability {
    /// Tag of this entry: `"service"` or `"volume-expansion"`.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Service(_) => "service",
            Self::VolumeExpansion(_) => "volume-expansion",
        }
    }
}

impl fmt::Display for PluginCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(t) => write!(f, "{}:{}", self.kind(), t),
            Self::VolumeExpansion(t) => write!(f, "{}:{}", self.kind(), t),
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin info
// ---------------------------------------------------------------------------

/// Information about the CSI plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginInfo {
    /// Plugin name, e.g. `"ebs.csi.example.com"`.
    pub name: String,
    /// Vendor-provided version string; always the driver version.
    pub vendor_version: String,
}

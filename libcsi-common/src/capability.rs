//! The capability table a driver advertises to the orchestrator.
//!
//! A [`CapabilitySet`] is filled during startup through its `set_*` methods
//! and then frozen inside a [`crate::CsiDriver`].  Each setter replaces its
//! collection wholesale, so registering the same input twice leaves the
//! validator behaviour unchanged.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::CsiError;
use crate::types::*;

/// Controller RPCs, access modes and plugin features supported by a driver.
#[derive(Debug, Clone, Default)]
pub struct CapabilitySet {
    /// Controller capabilities in registration order, duplicates kept.
    controller: Vec<ControllerServiceCapability>,
    /// Membership index over `controller`.
    controller_index: HashSet<ControllerRpcType>,
    /// Access modes in registration order.
    access_modes: Vec<VolumeCapabilityAccessMode>,
    /// Service features first, then volume-expansion features.
    plugin: Vec<PluginCapability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the controller capabilities.  An empty slice is valid and
    /// means no optional controller RPC is supported.
    pub fn set_controller_capabilities(&mut self, types: &[ControllerRpcType]) {
        let mut controller = Vec::with_capacity(types.len());
        for &rpc in types {
            info!(capability = %rpc, "Enabling controller service capability");
            controller.push(ControllerServiceCapability::from(rpc));
        }
        self.controller_index = types.iter().copied().collect();
        self.controller = controller;
    }

    /// Replace the access modes and return the registered descriptors, in
    /// input order.
    pub fn set_access_modes(&mut self, modes: &[AccessMode]) -> Vec<VolumeCapabilityAccessMode> {
        let mut access_modes = Vec::with_capacity(modes.len());
        for &mode in modes {
            info!(mode = %mode, "Enabling volume access mode");
            access_modes.push(VolumeCapabilityAccessMode::from(mode));
        }
        self.access_modes = access_modes;
        self.access_modes.clone()
    }

    /// Replace the plugin capabilities with one merged collection: every
    /// service feature tagged [`PluginCapability::Service`], followed by every
    /// expansion feature tagged [`PluginCapability::VolumeExpansion`].
    pub fn set_plugin_capabilities(
        &mut self,
        services: &[PluginServiceType],
        expansions: &[VolumeExpansionType],
    ) {
        let mut plugin = Vec::with_capacity(services.len() + expansions.len());
        plugin.extend(services.iter().copied().map(PluginCapability::Service));
        plugin.extend(expansions.iter().copied().map(PluginCapability::VolumeExpansion));
        for cap in &plugin {
            info!(capability = %cap, "Enabling plugin capability");
        }
        self.plugin = plugin;
    }

    pub fn controller_capabilities(&self) -> &[ControllerServiceCapability] {
        &self.controller
    }

    pub fn access_modes(&self) -> &[VolumeCapabilityAccessMode] {
        &self.access_modes
    }

    pub fn plugin_capabilities(&self) -> &[PluginCapability] {
        &self.plugin
    }

    /// Whether `rpc` was registered.  [`ControllerRpcType::Unknown`] is
    /// always supported.
    pub fn supports(&self, rpc: ControllerRpcType) -> bool {
        rpc == ControllerRpcType::Unknown || self.controller_index.contains(&rpc)
    }

    /// Guard run before every controller RPC.
    ///
    /// Fails with [`CsiError::InvalidArgument`] carrying the wire name of the
    /// rejected RPC type.  Callers must return the error to the RPC caller
    /// unchanged and must not perform the operation.
    pub fn validate_controller_service_request(
        &self,
        rpc: ControllerRpcType,
    ) -> Result<(), CsiError> {
        if self.supports(rpc) {
            return Ok(());
        }
        debug!(capability = %rpc, "controller request rejected");
        Err(CsiError::invalid_argument(rpc))
    }

    /// Check requested access modes against the registered ones.
    ///
    /// Every requested mode must be registered; the first unsupported mode is
    /// named in the error.
    pub fn validate_volume_capabilities(&self, requested: &[AccessMode]) -> Result<(), CsiError> {
        if requested.is_empty() {
            return Err(CsiError::InvalidArgument("volume capabilities missing".into()));
        }
        for mode in requested {
            if !self.access_modes.iter().any(|m| m.mode == *mode) {
                debug!(mode = %mode, "access mode rejected");
                return Err(CsiError::invalid_argument(mode));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;
    use crate::log_capture::capture;

    const ALL_RPCS: [ControllerRpcType; 14] = [
        ControllerRpcType::CreateDeleteVolume,
        ControllerRpcType::PublishUnpublishVolume,
        ControllerRpcType::ListVolumes,
        ControllerRpcType::GetCapacity,
        ControllerRpcType::CreateDeleteSnapshot,
        ControllerRpcType::ListSnapshots,
        ControllerRpcType::CloneVolume,
        ControllerRpcType::PublishReadonly,
        ControllerRpcType::ExpandVolume,
        ControllerRpcType::ListVolumesPublishedNodes,
        ControllerRpcType::VolumeCondition,
        ControllerRpcType::GetVolume,
        ControllerRpcType::SingleNodeMultiWriter,
        ControllerRpcType::ModifyVolume,
    ];

    #[test]
    fn one_info_record_per_enabled_entry() {
        let mut caps = CapabilitySet::new();

        let (_, records) = capture(|| {
            caps.set_controller_capabilities(&[
                ControllerRpcType::CreateDeleteVolume,
                ControllerRpcType::ExpandVolume,
            ])
        });
        let infos = records.at(Level::INFO);
        assert_eq!(infos.len(), 2);
        assert!(infos[0].contains("CREATE_DELETE_VOLUME"));
        assert!(infos[1].contains("EXPAND_VOLUME"));

        let (_, records) = capture(|| {
            caps.set_access_modes(&[AccessMode::SingleNodeWriter]);
        });
        assert_eq!(records.at(Level::INFO).len(), 1);

        let (_, records) = capture(|| {
            caps.set_plugin_capabilities(
                &[PluginServiceType::ControllerService],
                &[VolumeExpansionType::Online],
            )
        });
        let infos = records.at(Level::INFO);
        assert_eq!(infos.len(), 2);
        assert!(infos[1].contains("volume-expansion:ONLINE"));

        let (_, records) = capture(|| caps.set_controller_capabilities(&[]));
        assert!(records.at(Level::INFO).is_empty());
    }

    #[test]
    fn unknown_always_allowed() {
        let caps = CapabilitySet::new();
        assert!(caps.validate_controller_service_request(ControllerRpcType::Unknown).is_ok());

        let mut caps = CapabilitySet::new();
        caps.set_controller_capabilities(&[ControllerRpcType::ListVolumes]);
        assert!(caps.validate_controller_service_request(ControllerRpcType::Unknown).is_ok());
    }

    #[test]
    fn validation_is_set_membership() {
        let registered = [
            ControllerRpcType::CreateDeleteVolume,
            ControllerRpcType::ExpandVolume,
            ControllerRpcType::CreateDeleteVolume,
        ];
        let mut caps = CapabilitySet::new();
        caps.set_controller_capabilities(&registered);

        for rpc in ALL_RPCS {
            let res = caps.validate_controller_service_request(rpc);
            if registered.contains(&rpc) {
                assert!(res.is_ok(), "{rpc} should be accepted");
            } else {
                assert_eq!(res, Err(CsiError::InvalidArgument(rpc.to_string())));
            }
        }
        // duplicates are kept for reporting
        assert_eq!(caps.controller_capabilities().len(), 3);
    }

    #[test]
    fn empty_registration_rejects_everything_but_unknown() {
        let mut caps = CapabilitySet::new();
        caps.set_controller_capabilities(&[]);
        assert!(caps.controller_capabilities().is_empty());
        for rpc in ALL_RPCS {
            assert!(caps.validate_controller_service_request(rpc).is_err());
        }
    }

    #[test]
    fn reregistration_replaces_and_is_idempotent() {
        let mut caps = CapabilitySet::new();
        caps.set_controller_capabilities(&[ControllerRpcType::GetCapacity]);
        caps.set_controller_capabilities(&[ControllerRpcType::GetCapacity]);
        assert_eq!(caps.controller_capabilities().len(), 1);
        assert!(caps.supports(ControllerRpcType::GetCapacity));

        caps.set_controller_capabilities(&[ControllerRpcType::ListSnapshots]);
        assert!(!caps.supports(ControllerRpcType::GetCapacity));
        assert!(caps.supports(ControllerRpcType::ListSnapshots));
    }

    #[test]
    fn access_modes_preserve_order() {
        let mut caps = CapabilitySet::new();
        let modes = [AccessMode::MultiNodeReaderOnly, AccessMode::SingleNodeWriter];
        let returned = caps.set_access_modes(&modes);

        let expected: Vec<VolumeCapabilityAccessMode> =
            modes.iter().copied().map(Into::into).collect();
        assert_eq!(returned, expected);
        assert_eq!(caps.access_modes(), expected.as_slice());
    }

    #[test]
    fn plugin_capabilities_are_tagged() {
        let mut caps = CapabilitySet::new();
        caps.set_plugin_capabilities(
            &[PluginServiceType::ControllerService],
            &[VolumeExpansionType::Online],
        );

        let plugin = caps.plugin_capabilities();
        assert_eq!(plugin.len(), 2);
        assert_eq!(plugin.iter().filter(|c| c.kind() == "service").count(), 1);
        assert_eq!(
            plugin,
            &[
                PluginCapability::Service(PluginServiceType::ControllerService),
                PluginCapability::VolumeExpansion(VolumeExpansionType::Online),
            ]
        );
    }

    #[test]
    fn plugin_capabilities_empty_inputs() {
        let mut caps = CapabilitySet::new();
        caps.set_plugin_capabilities(&[], &[VolumeExpansionType::Offline]);
        assert_eq!(
            caps.plugin_capabilities(),
            &[PluginCapability::VolumeExpansion(VolumeExpansionType::Offline)]
        );
        caps.set_plugin_capabilities(&[], &[]);
        assert!(caps.plugin_capabilities().is_empty());
    }

    #[test]
    fn volume_capabilities_checked_against_modes() {
        let mut caps = CapabilitySet::new();
        caps.set_access_modes(&[AccessMode::SingleNodeWriter, AccessMode::SingleNodeReaderOnly]);

        assert!(caps.validate_volume_capabilities(&[AccessMode::SingleNodeWriter]).is_ok());
        assert_eq!(
            caps.validate_volume_capabilities(&[
                AccessMode::SingleNodeReaderOnly,
                AccessMode::MultiNodeMultiWriter,
            ]),
            Err(CsiError::InvalidArgument("MULTI_NODE_MULTI_WRITER".into()))
        );
        assert_eq!(
            caps.validate_volume_capabilities(&[]),
            Err(CsiError::InvalidArgument("volume capabilities missing".into()))
        );
    }
}

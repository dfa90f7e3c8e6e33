//! # libcsi-common — capability negotiation for CSI drivers
//!
//! `libcsi-common` holds the part of a [Container Storage Interface][csi]
//! driver that every plugin shares: its identity, the table of capabilities
//! it advertises to the orchestrator, and the guards that reject requests
//! for anything it did not advertise.  Transport and the provisioning /
//! mounting logic behind each RPC live elsewhere and call in here.
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |---|---|
//! | [`types`] | Protocol enums: RPC types, access modes, plugin features. |
//! | [`error`] | [`CsiError`]: configuration errors and invalid arguments. |
//! | [`identity`] | [`DriverIdentity`] and the [`CsiIdentity`] trait. |
//! | [`capability`] | [`CapabilitySet`] registration and validation. |
//! | [`driver`] | [`CsiDriver`], the frozen value shared by handlers. |
//! | [`message`] | [`CsiMessage`] discovery envelope. |
//! | [`config`] | [`DriverConfig`] loaded from YAML. |
//!
//! Registration happens once at startup through [`DriverBuilder`]; the
//! resulting [`CsiDriver`] is immutable and can be shared behind an `Arc`
//! by any number of concurrent handlers.
//!
//! [csi]: https://github.com/container-storage-interface/spec

pub mod capability;
pub mod config;
pub mod driver;
pub mod error;
pub mod identity;
pub mod message;
pub mod types;

#[cfg(test)]
pub(crate) mod log_capture;

// Re-export the most commonly used items at crate root for convenience.
pub use capability::CapabilitySet;
pub use config::DriverConfig;
pub use driver::{ControllerRpc, CsiDriver, DriverBuilder};
pub use error::CsiError;
pub use identity::{CsiIdentity, DriverIdentity};
pub use message::CsiMessage;
pub use types::*;

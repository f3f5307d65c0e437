//! Core traits and types shared between the plugin and its host
//!
//! This module defines the seams the installer is tested through: where
//! credentials come from, and how host lifecycle events reach the handlers.

use crate::core::error::InstallerError;
use crate::plugins::events::{PackageEvent, PreFileDownloadEvent};
use serde::{Deserialize, Serialize};

// ============================================================================
// Credential Source
// ============================================================================

/// Capability to read and seed named variables
///
/// The process environment is the production implementation; tests use an
/// in-memory map so they never touch real process state.
pub trait CredentialSource: Send + Sync {
    /// Current value of `name`, if set
    fn var(&self, name: &str) -> Option<String>;

    /// Set `name` only if it is not already present.
    /// Returns `true` if the value was stored.
    fn set_if_absent(&self, name: &str, value: &str) -> bool;
}

// ============================================================================
// Host Events
// ============================================================================

/// Lifecycle events the plugin can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostEvent {
    PrePackageInstall,
    PrePackageUpdate,
    PreFileDownload,
}

impl HostEvent {
    /// Event identifier as the host names it
    pub fn as_str(&self) -> &'static str {
        match self {
            HostEvent::PrePackageInstall => "pre-package-install",
            HostEvent::PrePackageUpdate => "pre-package-update",
            HostEvent::PreFileDownload => "pre-file-download",
        }
    }
}

/// Handlers a subscriber exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handler {
    /// Tag the recorded dist URL with the pinned version
    AddVersion,
    /// Swap the transport for one that downloads with credentials
    AddKeyAndDomain,
}

/// Event payload handed to [`EventSubscriber::dispatch`]
#[derive(Debug)]
pub enum HostEventPayload<'a> {
    Package(&'a mut PackageEvent),
    PreFileDownload(&'a mut PreFileDownloadEvent),
}

impl HostEventPayload<'_> {
    /// Identifier of the event carried by this payload
    pub fn event(&self) -> HostEvent {
        match self {
            HostEventPayload::Package(event) => event.event(),
            HostEventPayload::PreFileDownload(_) => HostEvent::PreFileDownload,
        }
    }
}

// ============================================================================
// Event Subscriber Trait
// ============================================================================

/// A component that reacts to host lifecycle events
pub trait EventSubscriber {
    /// Static mapping from event to handler
    fn subscribed_events() -> &'static [(HostEvent, Handler)];

    /// Run the handler registered for the payload's event.
    ///
    /// Events without a registered handler pass through untouched.
    fn dispatch(&self, payload: HostEventPayload<'_>) -> Result<(), InstallerError>;
}

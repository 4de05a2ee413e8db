//! Foreground-application identity.

use crate::process_tree::Pid;

/// Identity of the application that currently holds keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForegroundApp {
    /// Bundle identifier, when the platform can report one.
    pub bundle_id: Option<String>,
    /// Process id of the application.
    pub pid: Pid,
}

/// Capability to read the current foreground application.
///
/// May fail softly: `None` means "no identity available" and callers fall
/// back to the default injection profile.
pub trait ForegroundProvider: Send {
    fn frontmost(&self) -> Option<ForegroundApp>;
}

//! Error classification shared by every component.
//!
//! Each component owns its own `thiserror` enum; `kind()` on each of them maps
//! into [`ErrorKind`], which decides how the failure reaches the user.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected locally (empty bill, blank dispute). No state change.
    Validation,
    /// Store or HTTP API failed. State reverts; the user may retry by hand.
    Collaborator,
    /// Speech recognition or geolocation is not available.
    Unsupported,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Collaborator => "collaborator",
            ErrorKind::Unsupported => "unsupported",
        };
        f.write_str(label)
    }
}

//! Session identifier type.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Global counter for locally generated session IDs.
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a USSD session.
///
/// In production the gateway assigns the id and it arrives as an opaque
/// string with every request of the session. [`SessionId::new`] generates
/// a process-local id of the form `ussd-XXXXXXXX` for tests and embedded
/// use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new locally generated session ID.
    pub fn new() -> Self {
        Self(format!("ussd-{:08x}", COUNTER.fetch_add(1, Ordering::Relaxed)))
    }

    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

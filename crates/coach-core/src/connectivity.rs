//! Online/offline signal consulted before any network call.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Synchronous connectivity check.
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

impl<C: Connectivity + ?Sized> Connectivity for Arc<C> {
    fn is_online(&self) -> bool {
        (**self).is_online()
    }
}

/// A connectivity flag that can be flipped at runtime.
#[derive(Debug)]
pub struct ConnectivityFlag {
    online: AtomicBool,
}

impl ConnectivityFlag {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn online() -> Self {
        Self::new(true)
    }

    pub fn offline() -> Self {
        Self::new(false)
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl Default for ConnectivityFlag {
    fn default() -> Self {
        Self::online()
    }
}

impl Connectivity for ConnectivityFlag {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

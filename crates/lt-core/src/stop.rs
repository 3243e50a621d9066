use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Drapeau d'arrêt partagé entre le handler Ctrl-C et la boucle principale.
///
/// The handler side only ever stores `true`; the scheduler polls it once per
/// tick boundary. Clones share the same flag.
///
/// # Example
/// ```
/// use lt_core::stop::StopSignal;
/// let signal = StopSignal::new();
/// let handler_side = signal.clone();
/// assert!(!signal.is_stop_requested());
/// handler_side.request_stop();
/// assert!(signal.is_stop_requested());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    /// Crée un drapeau non levé.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lève le drapeau. Safe to call from any thread.
    #[inline]
    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// `true` once [`request_stop`](Self::request_stop) has been called.
    #[inline]
    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

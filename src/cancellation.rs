//! Provides a token-based mechanism for stopping a copy run between files.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable, thread-safe flag checked by discovery and the copy loop.
///
/// Once cancelled, no further file is started. A file already being written is
/// finished first.
///
/// # Examples
///
/// ```
/// use assembly_filter::CancellationToken;
/// use std::thread;
///
/// let token = CancellationToken::new();
/// let worker_token = token.clone();
///
/// let handle = thread::spawn(move || {
///     let mut copied = 0;
///     for _ in 0..1000 {
///         if worker_token.is_cancelled() {
///             break;
///         }
///         copied += 1;
///     }
///     copied
/// });
///
/// token.cancel();
/// let copied = handle.join().unwrap();
/// assert!(copied <= 1000);
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new `CancellationToken` in a non-cancelled state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Signals cancellation to this token and all of its clones.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    /// Whether `cancel()` has been called on this token or any of its clones.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

//! Completion callbacks tied to object lifetimes.

use std::fmt;

/// Runs a callback exactly once when dropped.
///
/// Embed a notifier in (or alongside) an object to observe the end of that object's
/// lifetime: the callback fires at the moment the notifier is dropped, on whatever
/// thread drops it, and never fires again. A notifier that is leaked with
/// [`std::mem::forget`] never fires, matching an object that never becomes
/// unreachable.
///
/// Multiple notifiers attached to one object fire independently of each other.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use lifetime_tracker::DropNotifier;
///
/// let fired = Arc::new(AtomicUsize::new(0));
///
/// let notifier = {
///     let fired = Arc::clone(&fired);
///     DropNotifier::new(move || {
///         fired.fetch_add(1, Ordering::Relaxed);
///     })
/// };
///
/// assert_eq!(fired.load(Ordering::Relaxed), 0);
///
/// drop(notifier);
/// assert_eq!(fired.load(Ordering::Relaxed), 1);
/// ```
#[must_use = "the callback fires when the notifier is dropped"]
pub struct DropNotifier {
    callback: Option<Box<dyn FnOnce() + Send>>,
}

impl DropNotifier {
    /// Attaches a completion callback to the notifier's own lifetime.
    ///
    /// The callback must be `Send` because the notifier may be dropped on a different
    /// thread than it was created on.
    pub fn new(callback: impl FnOnce() + Send + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }
}

impl Drop for DropNotifier {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
    }
}

impl fmt::Debug for DropNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropNotifier").finish_non_exhaustive()
    }
}

//! Best-effort user notifications.
//!
//! The timer fires one notification on completion. Delivery is never load
//! bearing: when the capability is unsupported or unauthorized the send is
//! skipped silently, and a failed send only produces a diagnostic. The
//! permission request is a separate, explicit operation the core never
//! auto-invokes.

/// System-notification capability.
pub trait Notifier: Send + Sync {
    /// Whether the user has granted notification permission.
    fn permitted(&self) -> bool;

    /// Ask the user for permission. Returns the resulting grant state.
    fn request_permission(&self) -> bool;

    fn notify(&self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error>>;
}

/// Notifier for environments without a notification capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn permitted(&self) -> bool {
        false
    }

    fn request_permission(&self) -> bool {
        false
    }

    fn notify(&self, _title: &str, _body: &str) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

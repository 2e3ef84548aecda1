//! Notifier implementations.

pub mod mock;
pub mod ntfy;

pub use mock::MockNotifier;
pub use ntfy::NtfyNotifier;

//! Trait seams between the core pipeline and its external collaborators.

pub mod fetcher;
pub mod notifier;
pub mod store;

pub use fetcher::Fetcher;
pub use notifier::{Notifier, Severity};
pub use store::SeenStore;

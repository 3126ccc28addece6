//! Trait seams between the engine/service/jobs and their collaborators.

mod notifier;
mod store;

pub use notifier::{IPromotionNotifier, NoopNotifier};
pub use store::IRankStore;

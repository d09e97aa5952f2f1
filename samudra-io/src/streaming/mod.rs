//! Sentence broadcasting for SamudraIO

pub mod broadcaster;

pub use broadcaster::{Broadcaster, DeliveryOutcome, DeliveryReport};

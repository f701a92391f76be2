//! Persistence of view configurations in numbered slots.

pub mod slots;

pub use slots::{FilterRecord, KeywordRecord, SlotError, SlotId, SlotRecord, SlotStore};

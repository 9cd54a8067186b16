//! Controller layer: per-form drafts, reducer-like state transitions, and
//! command orchestration.

pub mod create;
pub mod delete;
pub mod events;
pub mod list;
pub mod orchestration;

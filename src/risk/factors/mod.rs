//! The five factor calculators. Each is a pure function from an event (and,
//! for the batch-aware factors, the surrounding batch) to a [`ScoreFactor`]
//! with a 0-100 sub-score and its rationale. They share no state and may run
//! in any order.
//!
//! [`ScoreFactor`]: crate::risk::ScoreFactor

pub mod blast_radius;
pub mod criticality;
pub mod event_kind;
pub mod frequency;
pub mod timing;

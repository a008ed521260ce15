//! State module for the keyword scheduler
//!
//! # Components
//!
//! - `SchedulerState`: keyword queue and active slot behind one lock
//! - `PauseSignal`: cooperative pause flag shared with the crawl engine
//! - `SchedulerStatus`: serializable snapshot for control surfaces

mod pause;
mod scheduler_state;

// Re-export main types
pub use pause::PauseSignal;
pub use scheduler_state::{SchedulerState, SchedulerStatus};

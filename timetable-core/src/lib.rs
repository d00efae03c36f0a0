//! Core types for the timetable ecosystem.
//!
//! - `catalog`: the compiled-in weekly schedule for each group
//! - `keys`: composite keys for missed marks and custom-lesson sources
//! - `state`: durable state (missed marks, custom lessons, active group)
//!   loaded from and saved to a `Storage`
//! - `view`: the merged, sorted month view rendered by front ends

pub mod catalog;
pub mod config;
pub mod custom;
pub mod disclosure;
pub mod error;
pub mod keys;
pub mod lesson;
pub mod missed;
pub mod month;
pub mod state;
pub mod storage;
pub mod view;

pub use error::{TimetableError, TimetableResult};

//! Command implementations

pub mod common;
pub mod down;
pub mod merge;
pub mod new;
pub mod reset;
pub mod run;
pub mod status;
pub mod up;

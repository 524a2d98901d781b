//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the core:
//! - Math types and the actor transform
//! - Frame time and countdown timers
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;

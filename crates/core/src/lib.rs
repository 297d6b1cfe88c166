//! Core types and shared functionality for openhours.
//!
//! This crate provides:
//! - Day-token resolution and the free-text/tabular interval extractors
//! - Seven-day schedule projection
//! - The two-tier file cache
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod days;
pub mod error;
pub mod facility;
pub mod intervals;
pub mod schedule;

pub use cache::CacheDir;
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use facility::{Facility, FacilityRecord, ScheduleLookup};
pub use intervals::{DatedInterval, FreeTextInterval, IntervalSet, OpeningInterval};
pub use schedule::{DayHours, Schedule, ScheduleDay};

//! Stonebridge interviewer/tester pairing engine
//!
//! This crate reads clinic shift rosters in assorted upstream formats,
//! normalizes them to a canonical schema, pairs interviewers with testers
//! per site, date and modality, and exports the result as an all-day
//! calendar import CSV together with gap and violation reports.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod models;
pub mod normalize;
pub mod pairing;
pub mod pipeline;
pub mod preferences;
pub mod summary;

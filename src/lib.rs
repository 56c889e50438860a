//! Explore close approaches of near-Earth objects.
//!
//! This crate loads NASA's NEO catalog (CSV) and JPL's close-approach table
//! (JSON), normalizes the data-quality quirks of both (missing names,
//! unknown diameters, inconsistent hazard flags), links each close approach
//! to its owning NEO by primary designation, and exposes the resulting
//! population for inspection, filtered queries, and CSV/JSON export.

pub mod config;
pub mod db;
pub mod io;
pub mod models;
pub mod parsing;
pub mod services;
pub mod time;

//! sql2es - SQL to Elasticsearch DSL translation service
//!
//! Exposes `GET /sql_to_es?sqls=...`, which translates a single SQL SELECT
//! statement into an Elasticsearch query body and prints a console report
//! (client IP, GeoIP location, time, payload) for every request.
//!
//! # Architecture
//! - `api`: HTTP handler, response envelope and middleware
//! - `services`: SQL converter, GeoIP lookup and request report
//! - `interfaces`: CLI command implementations
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup
//! - `utils`: Client IP extraction and time formatting

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;

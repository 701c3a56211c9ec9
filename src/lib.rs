pub mod error;
pub mod validation;
pub mod model;
pub mod draw;
pub mod db;
pub mod ops;
pub mod queries;
pub mod migrate;
pub mod config;
pub mod logging;
pub mod cli;

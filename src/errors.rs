//! Unified application error type.
//! All modules (db, core, routes, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid section descriptor: {0}")]
    Descriptor(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error(
        "The instance and parent.instance do not match (instance {instance}, parent section {parent} belongs to instance {parent_instance})"
    )]
    ParentInstanceMismatch {
        instance: i64,
        parent: i64,
        parent_instance: i64,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,
}

pub type AppResult<T> = Result<T, AppError>;

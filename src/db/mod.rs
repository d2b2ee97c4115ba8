//! Database module
//!
//! SQLite storage for saved planner records.

use std::path::PathBuf;

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};

/// Database path from `DIETKIT_DATABASE_PATH`, else `<project root>/data/dietkit.db`
pub fn get_database_path() -> PathBuf {
    std::env::var("DIETKIT_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("dietkit.db");
            path
        })
}

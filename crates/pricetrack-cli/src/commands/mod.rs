//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, status, reset) and shared utilities (open_db)
//! - `import` - Import/export commands (CSV, full JSON backup)
//! - `prices` - Price logging commands (log, list, delete)
//! - `products` - Product management commands
//! - `reports` - Inflation reports

pub mod core;
pub mod import;
pub mod prices;
pub mod products;
pub mod reports;

// Re-export command functions for main.rs
pub use self::core::*;
pub use import::*;
pub use prices::*;
pub use products::*;
pub use reports::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

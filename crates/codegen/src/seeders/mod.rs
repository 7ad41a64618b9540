//! # Seeder Generation
//!
//! Data seeders reproduce the rows of each table, and a single registry
//! class calls them in order.
//!
//! ## Generated Files
//!
//! ```text
//! database/seeders/{table}Seeder.php
//! database/seeders/DatabaseSeeder.php
//! ```

pub mod registry;
pub mod seeder;

pub use registry::{DEFAULT_REGISTRY_CLASS, SeederRegistry, registered_seeders};
pub use seeder::emit_seeder;

/// Namespace every seeder class lives in
pub const SEEDER_NAMESPACE: &str = "Database\\Seeders";

/// Imports of a per-table seeder. The registry only needs the first.
pub(crate) const SEEDER_IMPORTS: &[&str] = &[
    "Illuminate\\Database\\Seeder",
    "Illuminate\\Support\\Facades\\DB",
];

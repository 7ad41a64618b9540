//! # Migration Clock
//!
//! Migration file names start with a stamp so that lexical order equals
//! execution order. The clock captures one base time per run and hands out
//! stamps one second apart, in the order they are requested. Everything
//! issued later in a run sorts strictly after everything issued earlier,
//! independent of how fast the run actually goes.

use chrono::{Duration, Local, NaiveDateTime, Timelike};

/// Format of a migration stamp (`2024_03_09_080500`)
pub const STAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

/// A migration ordering stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MigrationStamp(NaiveDateTime);

impl std::fmt::Display for MigrationStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(STAMP_FORMAT))
    }
}

/// Monotonic source of [`MigrationStamp`]s for one run
#[derive(Debug, Clone)]
pub struct MigrationClock {
    base: NaiveDateTime,
    issued: i64,
}

impl MigrationClock {
    /// Start at `base`, truncated to whole seconds
    pub fn starting_at(base: NaiveDateTime) -> Self {
        Self {
            base: base.with_nanosecond(0).unwrap_or(base),
            issued: 0,
        }
    }

    /// Start at the current local time
    pub fn now() -> Self {
        Self::starting_at(Local::now().naive_local())
    }

    /// Issue the next stamp
    pub fn next_stamp(&mut self) -> MigrationStamp {
        let stamp = MigrationStamp(self.base + Duration::seconds(self.issued));
        self.issued += 1;
        stamp
    }
}

// ============================================================================
// Tests
// ============================================================================

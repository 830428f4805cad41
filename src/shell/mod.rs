//! Subprocess execution and host tool lookup.

pub mod command;
pub mod lookup;
pub mod mock;
pub mod platform;

pub use command::{execute_captured, CommandOptions, CommandResult};
pub use lookup::{platform_lookup, ExecutableLookup, WhereLookup, WhichLookup};
pub use mock::MockLookup;
pub use platform::{is_ci, Platform};

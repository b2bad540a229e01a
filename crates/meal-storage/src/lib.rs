//! Meal Planner Storage
//!
//! Persistence port for the planner's state.
//!
//! # Core Concepts
//!
//! - [`StorageBackend`]: Flat string key/value port (memory, directory of files)
//! - [`StateStore`]: Namespaced JSON records over a backend, with export/import
//! - [`RecordPath`]: Dotted addressing of fields nested inside a record
//!
//! # Example
//!
//! ```rust,ignore
//! use meal_storage::{MemoryBackend, RecordPath, StateStore, DEFAULT_PREFIX};
//!
//! let store = StateStore::new(MemoryBackend::new(), DEFAULT_PREFIX);
//! let lunch = RecordPath::record("weeklyMenus").child("2025-W20").child("0").child("lunch");
//! store.set(&lunch, &vec!["Riso basmati"])?;
//! let foods: Vec<String> = store.get_or_default(&lunch)?;
//! ```

#![warn(unreachable_pub)]

mod backend;
mod error;
mod path;
mod store;

pub use backend::{DirectoryBackend, MemoryBackend, StorageBackend};
pub use error::{StorageError, StorageResult};
pub use path::{PathError, RecordPath};
pub use store::{StateStore, DEFAULT_PREFIX};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

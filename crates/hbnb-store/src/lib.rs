//! File-backed object store for hbnb entities.
//!
//! [`FileStorage`] keeps every live entity in memory, indexed by its
//! registry key (`"<TypeName>.<id>"`), and can write the whole set to a
//! single JSON file and read it back on startup.
//!
//! # File Format
//!
//! One JSON object. Keys are registry keys; each value is the entity's flat
//! map plus its type name under `"__class__"`:
//!
//! ```text
//! {"User.u1": {"__class__": "User", "id": "u1", "email": "...", ...}, ...}
//! ```
//!
//! # Design Rules
//!
//! 1. The store is an explicit value owned by the caller; there is no global instance.
//! 2. A key always matches its entity's type name and id.
//! 3. `save` overwrites the file in place. It is not atomic: a crash mid-write
//!    can leave a truncated file.
//! 4. `save` errors are returned; `reload` errors are logged and swallowed so a
//!    missing or corrupt file never blocks startup.
//! 5. `reload` only adds or overwrites entries, never clears them.

pub mod codec;
pub mod config;
pub mod error;
pub mod storage;

pub use config::{StoreConfig, DEFAULT_FILE_PATH};
pub use error::{StoreError, StoreResult};
pub use storage::{FileStorage, Objects};

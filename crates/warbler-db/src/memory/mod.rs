//! In-process storage backend
//!
//! Used when `STORAGE_BACKEND=memory` and by service-level tests.

mod store;

pub use store::MemoryStore;

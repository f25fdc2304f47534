// Persistence bridge: key-value backends, profile codecs, debounced writes.
pub mod codec;
#[cfg(test)]
pub mod memory;
pub mod scheduler;
pub mod storage;

pub use scheduler::PersistScheduler;
pub use storage::{FileStore, KeyValueStore, DARK_KEY, DATA_KEY};

#[cfg(test)]
pub use memory::MemoryStore;

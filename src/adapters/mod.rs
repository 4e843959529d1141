// Adapters layer: concrete implementations of the domain ports.

pub mod clock;
pub mod file_store;
pub mod memory_store;
pub mod random;
pub mod ticker;

pub use clock::{FixedClock, SystemClock};
pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use random::RngSource;
pub use ticker::Ticker;

pub mod file_store;
pub mod memory_store;
pub mod simulated_surface;

pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use simulated_surface::SimulatedSurface;

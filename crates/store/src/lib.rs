pub mod engine;
pub mod seed;

pub use engine::MemoryUserStore;

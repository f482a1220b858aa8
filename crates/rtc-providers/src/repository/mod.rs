//! Backing store implementations

pub mod memory;

pub use memory::InMemoryEntityRepository;

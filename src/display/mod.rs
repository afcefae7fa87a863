//! Display layer: where decoded messages are rendered.
//!
//! The listener only ever talks to the [`DisplayHost`] trait. Two hosts
//! ship with the crate: [`MemoryPage`] for embedding and tests, and
//! [`EmptyHost`] for running without any surface. [`FileSurface`] can be
//! mounted on a [`MemoryPage`] to mirror renders to disk.

pub mod file;
pub mod memory;
pub mod surface;

pub use file::FileSurface;
pub use memory::{MemoryPage, MemorySurface};
pub use surface::{DisplayHost, DisplaySurface, EmptyHost};

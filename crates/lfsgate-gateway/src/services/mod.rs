//! Built-in storage handlers.

pub mod batch;

pub use batch::BatchService;

// ABOUTME: Command implementations
// ABOUTME: Exports the sync command

pub mod sync;

pub use sync::{SyncOptions, SyncReport};

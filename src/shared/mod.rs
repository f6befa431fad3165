// Shared Kernel
// Cross-cutting pieces every module leans on

pub mod application; // Paging primitives
pub mod config; // Environment-driven settings
pub mod domain; // Shared value objects
pub mod errors; // Shared error types
pub mod utils; // Logging helpers

//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the reader and analysis components to perform user tasks.

pub mod function;
pub mod info;
pub mod top;
pub mod validate;

// Re-export main command functions
pub use function::{execute_function, FunctionArgs};
pub use info::execute_info;
pub use top::{execute_top, TopArgs};
pub use validate::execute_validate;

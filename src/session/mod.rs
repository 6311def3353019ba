// Public API - what other modules can use
pub use caller::{CallerId, USER_ID_HEADER};
pub use types::ChatSession;

// Internal modules
mod caller;
mod types;

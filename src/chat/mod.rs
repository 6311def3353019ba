// Public API - what other modules can use
pub use gate::{BroadcastGate, SendOutcome};

// Internal modules
mod gate;

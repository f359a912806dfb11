// Library surface for integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod difficulty;
pub mod prompt;
pub mod scores;
pub mod session;

pub mod direction;
mod raw;
pub mod resolve;
pub mod resolved;
pub mod unresolved;

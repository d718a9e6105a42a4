pub mod cache;
pub mod ops;

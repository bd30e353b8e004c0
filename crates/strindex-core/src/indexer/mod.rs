pub mod hashing;
pub mod properties;

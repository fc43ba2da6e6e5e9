/// Security helpers around the shared credential primitives
pub mod hashing_pool;

pub use hashing_pool::HashingPool;

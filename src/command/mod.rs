mod once;
mod start;

pub use once::once;
pub use start::start;

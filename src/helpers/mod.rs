pub mod schedule;

pub use schedule::until_next_slot;

// Work logs: the free-text entries users record day to day.

pub mod handlers;
pub mod store;

pub mod info;
pub mod latency;
pub mod users;

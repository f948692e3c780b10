pub mod schedule;
pub mod source;

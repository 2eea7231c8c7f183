pub mod matching;
pub mod schedule;

pub mod justgiving;
pub mod parsers;
pub mod streak;

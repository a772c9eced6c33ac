pub mod client;
pub mod parsers;

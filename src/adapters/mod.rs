pub mod funda;
pub mod resolver;

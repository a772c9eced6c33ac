pub mod funda_api;

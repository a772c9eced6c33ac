pub mod listing;
pub mod report;
pub mod search_params;

pub mod models;
pub mod stats;

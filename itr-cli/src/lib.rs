pub mod batch;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod utils;

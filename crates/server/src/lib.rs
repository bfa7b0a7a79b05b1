pub mod counter;
pub mod errors;
pub mod records;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{run_html, run_json};

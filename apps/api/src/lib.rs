pub mod config;
pub mod errors;
pub mod llm_client;
pub mod resume;
pub mod routes;
pub mod salary;
pub mod state;

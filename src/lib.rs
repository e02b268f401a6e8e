pub mod cli;
pub mod features;
pub mod portal;
pub mod routes;

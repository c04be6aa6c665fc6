pub mod config;
pub mod cors;
pub mod error;
pub mod routes;
pub mod shim;
pub mod state;

pub mod app;
pub mod audit;
pub mod core;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

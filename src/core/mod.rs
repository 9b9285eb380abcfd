//! Core services and infrastructure

pub mod sync;

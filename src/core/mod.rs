//! Core functionality
//!
//! - **rest**: request types, routing table and the resource controllers
//! - **batch**: the batch orchestrator and its placeholder resolver
//! - **validation**: declarative field rules
//! - **keys**: record key generation

pub mod batch;
pub mod keys;
pub mod rest;
pub mod validation;

//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services: request
//! parsing, DTO mapping, and translation of domain errors to status codes.

pub mod rest;

pub use rest::*;

//! Use-case services over the category and task stores.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Turn "lookup returned nothing" into typed `NotFound` errors.
//! - Keep front ends decoupled from storage details.

pub mod category_service;
pub mod task_service;

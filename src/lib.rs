pub mod application;
pub mod domain;
pub mod function_service;
pub mod infrastructure;

pub mod background;
pub mod error;
pub mod fields;
pub mod form;
pub mod ports;
pub mod publish;
pub mod repo;
pub mod service;
pub mod upload;
pub mod validation;

#[cfg(test)]
mod service_test;

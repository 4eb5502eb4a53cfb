pub mod dto;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod problem;
pub mod routes;
pub mod session;

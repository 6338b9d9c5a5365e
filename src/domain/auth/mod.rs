pub mod dto;
pub mod handler;
pub mod policy;
pub mod service;

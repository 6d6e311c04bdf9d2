pub mod commands;
pub mod configuration;
pub mod domain;
pub mod services;

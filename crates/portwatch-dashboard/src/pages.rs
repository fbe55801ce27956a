pub mod interfaces;
pub mod services;

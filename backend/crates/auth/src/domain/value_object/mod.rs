//! Value Object Module

pub mod access_token;
pub mod email;
pub mod user_id;

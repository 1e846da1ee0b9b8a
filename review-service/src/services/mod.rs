pub mod auth;
pub mod bookinfo;
pub mod validation;

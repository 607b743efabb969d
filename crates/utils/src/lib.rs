pub mod config;
pub mod response;
pub mod text;
pub mod utm;

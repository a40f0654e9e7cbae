pub mod email;
pub mod errors;
pub mod file_storage;
pub mod jwt;
pub mod otp;
pub mod password;

pub mod auth;
pub mod colleges;
pub mod products;
pub mod users;
pub mod verification;

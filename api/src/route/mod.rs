pub mod auth;
pub mod health;
pub mod report;
pub mod reservation;
pub mod slot;
pub mod space;
pub mod user;
pub mod v1;

pub mod auth;
pub mod list;
pub mod reservation;
pub mod report;
pub mod slot;
pub mod space;
pub mod user;

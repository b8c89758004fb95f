pub mod auth;
pub mod id;
pub mod list;
pub mod reservation;
pub mod role;
pub mod slot;
pub mod space;
pub mod user;

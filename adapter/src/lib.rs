pub mod database;
pub mod notification;
pub mod redis;
pub mod repository;

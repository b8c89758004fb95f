pub mod admission;
pub mod catalog;
pub mod clock;
pub mod model;
pub mod notification;
pub mod reminder;
pub mod report;
pub mod repository;

#[cfg(test)]
mod testing;

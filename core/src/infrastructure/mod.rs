pub mod exercise;
pub mod health;
pub mod schedule;
pub mod user;
pub mod workout;

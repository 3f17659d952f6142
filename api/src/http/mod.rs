pub mod auth;
pub mod exercises;
pub mod health;
pub mod schedules;
pub mod server;
pub mod users;
pub mod workouts;

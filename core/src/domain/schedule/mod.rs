pub mod calendar;
pub mod entities;
pub mod ports;
pub mod services;

pub mod analytics;
pub mod audit;
pub mod calendar;
pub mod customers;
pub mod health;
pub mod interactions;
pub mod leads;
pub mod revenue;
pub mod targets;
pub mod users;

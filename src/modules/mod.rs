pub mod auth;
pub mod homework;
pub mod messages;
pub mod students;
pub mod users;

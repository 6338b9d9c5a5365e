pub mod answer;
pub mod auth;
pub mod completion;
pub mod health;
pub mod question;
pub mod survey;
pub mod user;

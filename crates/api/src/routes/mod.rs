pub mod health;
pub mod plannings;
pub mod teams;
pub mod tournaments;
pub mod users;

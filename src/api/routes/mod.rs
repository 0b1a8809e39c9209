pub mod health;
pub mod monitor;
pub mod price;
pub mod tokens;

pub mod counter;
pub mod handlers;
pub mod inventory;

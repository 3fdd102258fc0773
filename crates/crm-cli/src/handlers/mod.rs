pub mod script;
pub mod views;

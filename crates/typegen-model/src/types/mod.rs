pub mod definition;
pub mod error;
pub mod property;
pub mod system;

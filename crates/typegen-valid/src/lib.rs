pub mod index;
pub mod rules;
pub mod validator;

pub use index::TypeIndex;
pub use validator::validate;

pub mod entity;
pub mod password;

pub use entity::{Credentials, NewAccount, Role, User};
pub use password::{hash_password, verify_password};

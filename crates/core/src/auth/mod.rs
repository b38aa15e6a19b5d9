//! Authentication helpers.
//!
//! Password hashing with Argon2id. Tokens are issued by `fylr_shared::JwtService`.

mod password;

pub use password::{PasswordError, hash_password, verify_password};

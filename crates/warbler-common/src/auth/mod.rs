//! Authentication utilities

mod password;
mod session_token;

pub use password::PasswordService;
pub use session_token::{SessionClaims, SessionTokenService};

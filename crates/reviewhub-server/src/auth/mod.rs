//! Authentication: token issuance, session cookies, and the request guard

pub mod cookie;
pub mod guard;
pub mod token;

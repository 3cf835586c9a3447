// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const AUTH_REGISTER: &str = "auth.register";
pub const AUTH_REGISTER_DUPLICATE: &str = "auth.register.duplicate";
pub const AUTH_LOGIN_SUCCESS: &str = "auth.login.success";
pub const AUTH_LOGIN_FAILURE: &str = "auth.login.failure";
pub const AUTH_LOGOUT: &str = "auth.logout";
pub const AUTH_UNAUTHORIZED: &str = "auth.unauthorized";
pub const SESSION_ACTIVE: &str = "session.active";

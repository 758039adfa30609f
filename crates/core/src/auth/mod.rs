mod auth_model;

pub use auth_model::{AuthSession, Credentials, Registration, User};

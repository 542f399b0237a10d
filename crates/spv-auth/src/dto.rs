use serde::Deserialize;

/// Sign-in form body.
#[derive(Deserialize)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

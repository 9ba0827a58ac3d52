use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::forms::EMAIL_RE;

/// Form behind `/user/add`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UserForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
    #[validate(
        length(min = 1, message = "This field is required."),
        regex(path = *EMAIL_RE, message = "Invalid email address.")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub favorite_color: String,
    #[serde(skip_serializing)]
    #[validate(
        length(min = 1, message = "This field is required."),
        must_match(other = "password_confirm", message = "Passwords Must Match!")
    )]
    pub password: String,
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub password_confirm: String,
}

/// Fields posted to `/update/:id`, written as submitted.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateUserForm {
    pub name: String,
    pub email: String,
    pub favorite_color: String,
}

/// Form behind `/test_password`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PasswordForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub email: String,
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,
}

/// Outcome of a password check, rendered by `test_password.html`.
#[derive(Debug, Serialize)]
pub struct PasswordCheck {
    pub email: String,
    pub user_name: Option<String>,
    pub passed: bool,
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

use super::{FieldErrors, FormData, check_length};

const MAX_USERNAME: usize = 64;
const MAX_EMAIL: usize = 120;
const MIN_PASSWORD: usize = 8;
const MAX_PASSWORD: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns field errors when either field is blank.
    pub fn parse(data: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let username = data.required_text("username", MAX_USERNAME, &mut errors);
        let password = data.required_text("password", MAX_PASSWORD, &mut errors);
        errors.into_result(Self { username, password })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    /// # Errors
    ///
    /// Returns field errors for malformed input. Uniqueness of username and email
    /// is checked against the database afterwards.
    pub fn parse(data: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let username = data.required_text("username", MAX_USERNAME, &mut errors);
        if !username.is_empty() && !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
            errors.add(
                "username",
                "Username may only contain letters, numbers, and underscores.",
            );
        }
        let email = parse_email(data, &mut errors);
        let password = parse_new_password(data, &mut errors);
        errors.into_result(Self {
            username,
            email,
            password,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPasswordRequestForm {
    pub email: String,
}

impl ResetPasswordRequestForm {
    /// # Errors
    ///
    /// Returns a field error when the email is missing or malformed.
    pub fn parse(data: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let email = parse_email(data, &mut errors);
        errors.into_result(Self { email })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub password: String,
}

impl ResetPasswordForm {
    /// # Errors
    ///
    /// Returns field errors when the password is too short or not repeated.
    pub fn parse(data: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let password = parse_new_password(data, &mut errors);
        errors.into_result(Self { password })
    }
}

/// Lowercased email with a basic `local@domain.tld` shape check.
fn parse_email(data: &FormData, errors: &mut FieldErrors) -> String {
    let email = data.required_text("email", MAX_EMAIL, errors).to_lowercase();
    if email.is_empty() {
        return email;
    }
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.contains('@'));
    if !valid {
        errors.add("email", "Invalid email address.");
    }
    email
}

/// `password` plus its `password2` confirmation.
fn parse_new_password(data: &FormData, errors: &mut FieldErrors) -> String {
    let password = data.get("password").unwrap_or_default().to_string();
    if password.is_empty() {
        errors.add("password", super::REQUIRED);
    } else if password.chars().count() < MIN_PASSWORD {
        errors.add(
            "password",
            format!("Field must be at least {MIN_PASSWORD} characters long."),
        );
    } else {
        check_length("password", &password, MAX_PASSWORD, errors);
    }

    if data.get("password2") != Some(password.as_str()) {
        errors.add("password2", "Field must be equal to password.");
    }
    password
}

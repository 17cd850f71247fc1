//! Form state and client-side validation for the auth and add-book screens.
//!
//! Validation runs before any backend request is issued: a form that fails
//! produces at least one field-level message and the submit action is
//! dropped. Banners carry form-level failures coming back from the services
//! (the mocks never produce them, but real adapters will).

use crate::domain::{BookDraft, Category, Role};

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 6;

/// Loose email shape check: something, an `@`, something, a dot, something.
///
/// Matches the original form's `\S+@\S+\.\S+` intent without pulling in a
/// regex engine for one rule.
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty()
                && !tld.is_empty()
                && !domain.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    }
}

/// Focusable fields of the login form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginField {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Email,
        }
    }
}

/// Login form state.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub focus: LoginField,
    /// Field-level validation messages, `(field, message)`.
    pub errors: Vec<(LoginField, String)>,
    /// Form-level failure banner (authentication/service errors).
    pub banner: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            role: Role::Student,
            focus: LoginField::Email,
            errors: Vec::new(),
            banner: None,
        }
    }
}

impl LoginForm {
    /// Mutable access to the focused field's buffer.
    pub fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    /// Validates the form, recording field errors.
    ///
    /// Returns `true` when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        if self.email.trim().is_empty() {
            self.errors
                .push((LoginField::Email, "Please enter your email".to_string()));
        } else if !looks_like_email(self.email.trim()) {
            self.errors
                .push((LoginField::Email, "Invalid email format".to_string()));
        }
        if self.password.is_empty() {
            self.errors.push((
                LoginField::Password,
                "Please enter your password".to_string(),
            ));
        }
        self.errors.is_empty()
    }

    /// First error message for a field, if any.
    #[must_use]
    pub fn error_for(&self, field: LoginField) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }
}

/// Focusable fields of the register form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl RegisterField {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Password,
            Self::Password => Self::ConfirmPassword,
            Self::ConfirmPassword => Self::Name,
        }
    }
}

/// Register form state.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    pub focus: RegisterField,
    pub errors: Vec<(RegisterField, String)>,
    pub banner: Option<String>,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            role: Role::Student,
            focus: RegisterField::Name,
            errors: Vec::new(),
            banner: None,
        }
    }
}

impl RegisterForm {
    /// Mutable access to the focused field's buffer.
    pub fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            RegisterField::Name => &mut self.name,
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
            RegisterField::ConfirmPassword => &mut self.confirm_password,
        }
    }

    /// Validates the form, recording field errors.
    ///
    /// Returns `true` when the form may be submitted. Rules: name required,
    /// email shape, password length >= 6, passwords match.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        if self.name.trim().is_empty() {
            self.errors
                .push((RegisterField::Name, "Please enter your name".to_string()));
        }
        if self.email.trim().is_empty() {
            self.errors
                .push((RegisterField::Email, "Please enter your email".to_string()));
        } else if !looks_like_email(self.email.trim()) {
            self.errors
                .push((RegisterField::Email, "Invalid email format".to_string()));
        }
        if self.password.is_empty() {
            self.errors.push((
                RegisterField::Password,
                "Please enter a password".to_string(),
            ));
        } else if self.password.len() < MIN_PASSWORD_LEN {
            self.errors.push((
                RegisterField::Password,
                "Password must be at least 6 characters".to_string(),
            ));
        }
        if self.password != self.confirm_password {
            self.errors.push((
                RegisterField::ConfirmPassword,
                "Passwords do not match".to_string(),
            ));
        }
        self.errors.is_empty()
    }

    /// First error message for a field, if any.
    #[must_use]
    pub fn error_for(&self, field: RegisterField) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }
}

/// Focusable fields of the teacher add-book form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Author,
    Category,
    Description,
}

impl DraftField {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::Category,
            Self::Category => Self::Description,
            Self::Description => Self::Title,
        }
    }
}

/// Add-book form state on the teacher dashboard.
#[derive(Debug, Clone)]
pub struct DraftForm {
    pub title: String,
    pub author: String,
    pub category: Option<Category>,
    pub description: String,
    pub focus: DraftField,
    pub errors: Vec<(DraftField, String)>,
}

impl Default for DraftForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            category: None,
            description: String::new(),
            focus: DraftField::Title,
            errors: Vec::new(),
        }
    }
}

impl DraftForm {
    /// Mutable access to the focused text buffer.
    ///
    /// The category field is cycled, not typed, so it has no buffer.
    pub fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focus {
            DraftField::Title => Some(&mut self.title),
            DraftField::Author => Some(&mut self.author),
            DraftField::Category => None,
            DraftField::Description => Some(&mut self.description),
        }
    }

    /// Advances the category choice (wrapping through `None`).
    pub fn cycle_category(&mut self) {
        self.category = match self.category {
            None => Some(Category::ALL[0]),
            Some(current) => {
                let idx = Category::ALL.iter().position(|c| *c == current);
                match idx {
                    Some(i) if i + 1 < Category::ALL.len() => Some(Category::ALL[i + 1]),
                    _ => None,
                }
            }
        };
    }

    /// Validates the draft. Returns `true` when it may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        if self.title.trim().is_empty() {
            self.errors
                .push((DraftField::Title, "Please enter a title".to_string()));
        }
        if self.author.trim().is_empty() {
            self.errors
                .push((DraftField::Author, "Please enter an author".to_string()));
        }
        if self.category.is_none() {
            self.errors
                .push((DraftField::Category, "Please pick a category".to_string()));
        }
        self.errors.is_empty()
    }

    /// Converts the validated form into the port-level draft.
    #[must_use]
    pub fn to_draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            category: self.category,
            description: self.description.trim().to_string(),
        }
    }

    #[must_use]
    pub fn error_for(&self, field: DraftField) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(looks_like_email("student@school.ac.th"));
        assert!(looks_like_email("a@b.c"));
        assert!(!looks_like_email("no-at-sign"));
        assert!(!looks_like_email("@missing.local"));
        assert!(!looks_like_email("missing@tld"));
        assert!(!looks_like_email("spaces in@mail.com"));
    }

    #[test]
    fn register_rejects_empty_name() {
        let mut form = RegisterForm {
            email: "a@b.c".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            ..Default::default()
        };
        assert!(!form.validate());
        assert!(form.error_for(RegisterField::Name).is_some());
    }

    #[test]
    fn register_rejects_malformed_email() {
        let mut form = RegisterForm {
            name: "Somying".to_string(),
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            ..Default::default()
        };
        assert!(!form.validate());
        assert!(form.error_for(RegisterField::Email).is_some());
    }

    #[test]
    fn register_rejects_short_password() {
        let mut form = RegisterForm {
            name: "Somying".to_string(),
            email: "a@b.c".to_string(),
            password: "12345".to_string(),
            confirm_password: "12345".to_string(),
            ..Default::default()
        };
        assert!(!form.validate());
        assert!(form.error_for(RegisterField::Password).is_some());
    }

    #[test]
    fn register_rejects_password_mismatch() {
        let mut form = RegisterForm {
            name: "Somying".to_string(),
            email: "a@b.c".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
            ..Default::default()
        };
        assert!(!form.validate());
        assert!(form.error_for(RegisterField::ConfirmPassword).is_some());
    }

    #[test]
    fn register_accepts_valid_input() {
        let mut form = RegisterForm {
            name: "Somying".to_string(),
            email: "somying@school.ac.th".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            ..Default::default()
        };
        assert!(form.validate());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn login_requires_both_fields() {
        let mut form = LoginForm::default();
        assert!(!form.validate());
        assert_eq!(form.errors.len(), 2);
    }

    #[test]
    fn draft_category_cycles_through_all_and_none() {
        let mut form = DraftForm::default();
        assert!(form.category.is_none());
        for expected in Category::ALL {
            form.cycle_category();
            assert_eq!(form.category, Some(expected));
        }
        form.cycle_category();
        assert!(form.category.is_none());
    }
}

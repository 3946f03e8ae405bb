use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Loose shape check (something@something.something), not RFC validation.
    static ref EMAIL_SHAPE: Regex =
        Regex::new(r"\S+@\S+\.\S+").expect("Failed to compile email pattern");
}

/// Current values of the sign-in form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// Messages for the fields currently failing validation. `None` means the
/// field is fine; the whole value is replaced on every submit attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// A single-field edit, dispatched through [`FormData::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    SetEmail(String),
    SetPassword(String),
    SetRememberMe(bool),
}

impl FormData {
    /// Replaces the addressed field and keeps every other field as-is.
    pub fn apply(self, update: FieldUpdate) -> Self {
        match update {
            FieldUpdate::SetEmail(email) => Self { email, ..self },
            FieldUpdate::SetPassword(password) => Self { password, ..self },
            FieldUpdate::SetRememberMe(remember_me) => Self { remember_me, ..self },
        }
    }

    /// Checks every field independently and returns the full set of failing
    /// fields. Anything may live in the form state; it only fails here.
    pub fn validate(&self) -> FormErrors {
        let email = if self.email.is_empty() {
            Some("Email is required".to_string())
        } else if !EMAIL_SHAPE.is_match(&self.email) {
            Some("Email is invalid".to_string())
        } else {
            None
        };
        // An empty password falls under the length rule on purpose.
        let password = (self.password.chars().count() < 6)
            .then(|| "Password must be at least 6 characters".to_string());
        FormErrors { email, password }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("", Some("Email is required"))]
    #[case("bad-email", Some("Email is invalid"))]
    #[case("name@company", Some("Email is invalid"))]
    #[case("@company.com", Some("Email is invalid"))]
    #[case("name@.com", Some("Email is invalid"))]
    #[case("a@b.c", None)]
    #[case("name@company.com", None)]
    fn test_email_rules(#[case] email: &str, #[case] expected: Option<&str>) {
        let form = FormData {
            email: email.to_string(),
            password: "abcdef".to_string(),
            remember_me: false,
        };
        let errors = form.validate();
        assert_eq!(errors.email.as_deref(), expected);
        assert_eq!(errors.password, None);
    }

    #[rstest::rstest]
    #[case("", true)]
    #[case("abc", true)]
    #[case("abcde", true)]
    #[case("abcdef", false)]
    #[case("correct horse battery", false)]
    fn test_password_length_rule(#[case] password: &str, #[case] fails: bool) {
        let form = FormData {
            email: "name@company.com".to_string(),
            password: password.to_string(),
            remember_me: false,
        };
        let errors = form.validate();
        assert_eq!(errors.password.is_some(), fails);
        if fails {
            assert_eq!(
                errors.password.as_deref(),
                Some("Password must be at least 6 characters")
            );
        }
    }

    #[test]
    fn test_both_fields_fail_together() {
        let form = FormData {
            email: String::new(),
            password: "abc".to_string(),
            remember_me: false,
        };
        let errors = form.validate();
        assert_eq!(errors.email.as_deref(), Some("Email is required"));
        assert_eq!(
            errors.password.as_deref(),
            Some("Password must be at least 6 characters")
        );
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let form = FormData {
            email: "a@b.c".to_string(),
            password: "abcdef".to_string(),
            remember_me: true,
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let form = FormData {
            email: "bad-email".to_string(),
            password: "abc".to_string(),
            remember_me: false,
        };
        assert_eq!(form.validate(), form.validate());
    }

    #[rstest::rstest]
    #[case(FieldUpdate::SetEmail("new@mail.com".to_string()))]
    #[case(FieldUpdate::SetPassword("hunter2".to_string()))]
    #[case(FieldUpdate::SetRememberMe(true))]
    fn test_apply_replaces_exactly_one_field(#[case] update: FieldUpdate) {
        let before = FormData {
            email: "old@mail.com".to_string(),
            password: "old-password".to_string(),
            remember_me: false,
        };
        let after = before.clone().apply(update.clone());
        match update {
            FieldUpdate::SetEmail(email) => {
                assert_eq!(after.email, email);
                assert_eq!(after.password, before.password);
                assert_eq!(after.remember_me, before.remember_me);
            }
            FieldUpdate::SetPassword(password) => {
                assert_eq!(after.password, password);
                assert_eq!(after.email, before.email);
                assert_eq!(after.remember_me, before.remember_me);
            }
            FieldUpdate::SetRememberMe(remember_me) => {
                assert_eq!(after.remember_me, remember_me);
                assert_eq!(after.email, before.email);
                assert_eq!(after.password, before.password);
            }
        }
    }
}

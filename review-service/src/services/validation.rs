use crate::models::errors::{ApiError, FieldErrors};
use crate::models::requests::{RegisterRequest, ReviewRequest};
use regex::Regex;
use std::sync::OnceLock;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

const USERNAME_MAX: usize = 150;
const ISBN_MAX: usize = 13;
const TITLE_MAX: usize = 100;

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\w.@+-]+$").unwrap())
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub struct ValidReview {
    pub isbn: String,
    pub title: String,
    pub comment: String,
}

/// Collects per-field problems so one response reports all of them.
#[derive(Default)]
struct Checker {
    errors: FieldErrors,
}

impl Checker {
    fn add(&mut self, field: &str, message: String) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message);
    }

    fn present(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        match value.map(str::trim) {
            None => {
                self.add(field, REQUIRED.to_string());
                None
            }
            Some("") => {
                self.add(field, BLANK.to_string());
                None
            }
            Some(v) => Some(v.to_string()),
        }
    }

    fn max_chars(&mut self, field: &str, value: &str, max: usize) -> bool {
        if value.chars().count() > max {
            self.add(
                field,
                format!("Ensure this field has no more than {} characters.", max),
            );
            return false;
        }
        true
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ApiError> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(ApiError::Validation(self.errors)),
        }
    }
}

pub fn validate_registration(request: RegisterRequest) -> Result<Registration, ApiError> {
    let mut check = Checker::default();

    let username = check
        .present("username", request.username.as_deref())
        .filter(|u| check.max_chars("username", u, USERNAME_MAX))
        .filter(|u| {
            let valid = username_re().is_match(u);
            if !valid {
                check.add(
                    "username",
                    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.".to_string(),
                );
            }
            valid
        });

    let email = check
        .present("email", request.email.as_deref())
        .filter(|e| {
            let valid = email_re().is_match(e);
            if !valid {
                check.add("email", "Enter a valid email address.".to_string());
            }
            valid
        });

    // passwords are taken verbatim, only blankness is checked
    let password = match request.password {
        Some(p) if !p.trim().is_empty() => Some(p),
        Some(_) => {
            check.add("password", BLANK.to_string());
            None
        }
        None => {
            check.add("password", REQUIRED.to_string());
            None
        }
    };

    let registration = match (username, email, password) {
        (Some(username), Some(email), Some(password)) => Some(Registration {
            username,
            email,
            password,
        }),
        _ => None,
    };
    check.finish(registration)
}

pub fn validate_credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<Credentials, ApiError> {
    let mut check = Checker::default();

    let username = check.present("username", username.as_deref());
    let password = match password {
        Some(p) if !p.is_empty() => Some(p),
        Some(_) => {
            check.add("password", BLANK.to_string());
            None
        }
        None => {
            check.add("password", REQUIRED.to_string());
            None
        }
    };

    let credentials = match (username, password) {
        (Some(username), Some(password)) => Some(Credentials { username, password }),
        _ => None,
    };
    check.finish(credentials)
}

pub fn validate_review(request: ReviewRequest) -> Result<ValidReview, ApiError> {
    let mut check = Checker::default();

    let isbn = check
        .present("isbn", request.isbn.as_deref())
        .filter(|isbn| check.max_chars("isbn", isbn, ISBN_MAX));
    let title = check
        .present("title", request.title.as_deref())
        .filter(|title| check.max_chars("title", title, TITLE_MAX));
    let comment = check.present("comment", request.comment.as_deref());

    let review = match (isbn, title, comment) {
        (Some(isbn), Some(title), Some(comment)) => Some(ValidReview {
            isbn,
            title,
            comment,
        }),
        _ => None,
    };
    check.finish(review)
}

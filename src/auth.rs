use std::sync::LazyLock;

use async_trait::async_trait;
use iced::widget::{button, column, container, row, text, text_input, Space, TextInput};
use iced::{Alignment, Element, Length};
use regex::Regex;
use thiserror::Error;
use tracing::info;

use crate::theme::Palette;

static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").ok());

pub const MIN_PASSWORD_LEN: usize = 8;
const FALLBACK_FAILURE: &str = "An error occurred. Please try again.";
const RESET_SENT: &str = "Password reset email sent successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
    Reset,
}

#[derive(Debug, Clone)]
pub enum AuthMessage {
    EmailChanged(String),
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    NameChanged(String),
    ToggleShowPassword,
    SwitchMode(AuthMode),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter your password")]
    MissingPassword,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please enter your name")]
    MissingName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// A validated form, ready to go to an [`AuthHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSubmission {
    Login(LoginCredentials),
    Signup(SignupDetails),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),
}

/// Whoever actually checks credentials. Returns the name to greet on success.
#[async_trait]
pub trait AuthHandler: Send + Sync {
    async fn login(&self, credentials: LoginCredentials) -> Result<String, AuthError>;
    async fn signup(&self, details: SignupDetails) -> Result<String, AuthError>;
}

pub async fn submit<H: AuthHandler + ?Sized>(
    handler: &H,
    submission: AuthSubmission,
) -> Result<String, String> {
    let outcome = match submission {
        AuthSubmission::Login(credentials) => handler.login(credentials).await,
        AuthSubmission::Signup(details) => handler.signup(details).await,
    };
    outcome.map_err(|e| e.to_string())
}

/// Accepts every well-formed submission. Nothing is stored or verified.
#[derive(Debug, Default)]
pub struct DemoAuthHandler;

#[async_trait]
impl AuthHandler for DemoAuthHandler {
    async fn login(&self, credentials: LoginCredentials) -> Result<String, AuthError> {
        info!("Demo sign-in for {}", credentials.email);
        let display = credentials
            .email
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or(credentials.email.as_str())
            .to_string();
        Ok(display)
    }

    async fn signup(&self, details: SignupDetails) -> Result<String, AuthError> {
        info!("Demo sign-up for {}", details.email);
        Ok(details.name.trim().to_string())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

#[derive(Debug, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub show_password: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl AuthForm {
    pub fn validate(&self) -> Result<(), AuthValidationError> {
        if self.email.is_empty() || !is_valid_email(&self.email) {
            return Err(AuthValidationError::InvalidEmail);
        }
        if self.mode != AuthMode::Reset && self.password.is_empty() {
            return Err(AuthValidationError::MissingPassword);
        }
        if self.mode == AuthMode::Signup {
            if self.password.chars().count() < MIN_PASSWORD_LEN {
                return Err(AuthValidationError::PasswordTooShort);
            }
            if self.password != self.confirm_password {
                return Err(AuthValidationError::PasswordMismatch);
            }
            if self.name.trim().is_empty() {
                return Err(AuthValidationError::MissingName);
            }
        }
        Ok(())
    }

    pub fn update(&mut self, message: AuthMessage) -> Option<AuthSubmission> {
        match message {
            AuthMessage::EmailChanged(email) => {
                self.email = email;
                None
            }
            AuthMessage::PasswordChanged(password) => {
                self.password = password;
                None
            }
            AuthMessage::ConfirmPasswordChanged(password) => {
                self.confirm_password = password;
                None
            }
            AuthMessage::NameChanged(name) => {
                self.name = name;
                None
            }
            AuthMessage::ToggleShowPassword => {
                self.show_password = !self.show_password;
                None
            }
            AuthMessage::SwitchMode(mode) => {
                self.mode = mode;
                self.error = None;
                self.success = None;
                None
            }
            AuthMessage::Submit => self.submit(),
        }
    }

    fn submit(&mut self) -> Option<AuthSubmission> {
        if self.loading {
            return None;
        }
        self.error = None;
        self.success = None;

        if let Err(e) = self.validate() {
            self.error = Some(e.to_string());
            return None;
        }

        match self.mode {
            AuthMode::Login => {
                self.loading = true;
                Some(AuthSubmission::Login(LoginCredentials {
                    email: self.email.clone(),
                    password: self.password.clone(),
                }))
            }
            AuthMode::Signup => {
                self.loading = true;
                Some(AuthSubmission::Signup(SignupDetails {
                    email: self.email.clone(),
                    password: self.password.clone(),
                    name: self.name.clone(),
                }))
            }
            AuthMode::Reset => {
                self.success = Some(String::from(RESET_SENT));
                self.mode = AuthMode::Login;
                None
            }
        }
    }

    /// Applies the handler's answer. `true` means the form can be dismissed.
    pub fn finish(&mut self, outcome: &Result<String, String>) -> bool {
        self.loading = false;
        match outcome {
            Ok(_) => true,
            Err(message) if message.trim().is_empty() => {
                self.error = Some(String::from(FALLBACK_FAILURE));
                false
            }
            Err(message) => {
                self.error = Some(message.clone());
                false
            }
        }
    }

    fn heading(&self) -> (&'static str, &'static str) {
        match self.mode {
            AuthMode::Login => ("Welcome Back", "Sign in to continue"),
            AuthMode::Signup => ("Create Account", "Get started with your free account"),
            AuthMode::Reset => ("Reset Password", "Enter your email to receive a reset link"),
        }
    }

    fn submit_label(&self) -> &'static str {
        if self.loading {
            return "Processing...";
        }
        match self.mode {
            AuthMode::Login => "Sign In",
            AuthMode::Signup => "Create Account",
            AuthMode::Reset => "Send Reset Link",
        }
    }

    pub fn view(&self, palette: Palette) -> Element<'_, AuthMessage> {
        let (title, subtitle) = self.heading();
        let mut form = column![
            text(title).size(26).color(palette.text),
            text(subtitle).size(14).color(palette.text_muted),
            Space::new().height(12),
        ]
        .spacing(8)
        .width(Length::Fixed(380.0))
        .align_x(Alignment::Start);

        if self.mode == AuthMode::Signup {
            form = form.push(field("Full Name", &self.name).on_input(AuthMessage::NameChanged));
        }

        form = form.push(field("Email", &self.email).on_input(AuthMessage::EmailChanged));

        if self.mode != AuthMode::Reset {
            let password = field("Password", &self.password)
                .secure(!self.show_password)
                .on_input(AuthMessage::PasswordChanged);
            let reveal = button(
                text(if self.show_password { "Hide" } else { "Show" })
                    .size(12)
                    .color(palette.text_muted),
            )
            .padding([8, 10])
            .style(button::text)
            .on_press(AuthMessage::ToggleShowPassword);
            form = form.push(row![password, reveal].spacing(4).align_y(Alignment::Center));
        }

        if self.mode == AuthMode::Signup {
            form = form.push(
                field("Confirm Password", &self.confirm_password)
                    .secure(!self.show_password)
                    .on_input(AuthMessage::ConfirmPasswordChanged),
            );
        }

        if let Some(ref err) = self.error {
            form = form.push(text(err).size(14).color(palette.accent));
        } else if let Some(ref success) = self.success {
            form = form.push(text(success).size(14).color(crate::theme::STATUS_GREEN));
        }

        let accent = palette.accent;
        let accent_hover = palette.accent_hover;
        let on_accent = palette.on_accent;
        let submit_button = button(
            container(text(self.submit_label()).size(16).color(on_accent)).center_x(Length::Fill),
        )
        .width(Length::Fill)
        .padding([12, 32])
        .style(move |_theme, status| {
            let bg = match status {
                button::Status::Hovered => accent_hover,
                _ => accent,
            };
            button::Style {
                background: Some(iced::Background::Color(bg)),
                text_color: on_accent,
                border: iced::Border::default().rounded(8),
                ..Default::default()
            }
        })
        .on_press_maybe((!self.loading).then_some(AuthMessage::Submit));
        form = form.push(submit_button);

        let link = |label: &'static str, mode: AuthMode| {
            button(text(label).size(13).color(accent))
                .padding(0)
                .style(button::text)
                .on_press(AuthMessage::SwitchMode(mode))
        };
        let footer = match self.mode {
            AuthMode::Login => row![
                link("Forgot password?", AuthMode::Reset),
                Space::new().width(Length::Fill),
                text("Don't have an account?").size(13).color(palette.text_muted),
                link("Sign up", AuthMode::Signup),
            ],
            AuthMode::Signup => row![
                text("Already have an account?").size(13).color(palette.text_muted),
                link("Sign in", AuthMode::Login),
            ],
            AuthMode::Reset => row![link("Back to sign in", AuthMode::Login)],
        };
        form = form.push(footer.spacing(6).align_y(Alignment::Center));

        let surface = palette.surface;
        let border = palette.border;
        container(form)
            .padding(32)
            .style(move |_theme| container::Style {
                background: Some(iced::Background::Color(surface)),
                border: iced::Border::default().rounded(16).color(border).width(1),
                ..Default::default()
            })
            .into()
    }
}

fn field<'a>(placeholder: &str, value: &'a str) -> TextInput<'a, AuthMessage> {
    text_input(placeholder, value)
        .on_submit(AuthMessage::Submit)
        .padding(12)
        .size(14)
        .width(Length::Fill)
}

use crate::{loader::Initialization, model::signup::SignupForm, AppError};

pub mod msg {
    pub const CONFIG_ERROR: &str = "System Error: Could not connect to configuration.";
    pub const FALLBACK_UNCONFIGURED: &str =
        "Configuration Error: Supabase credentials are not set.";
    pub const NOT_INITIALIZED: &str = "System not initialized. Please refresh.";
    pub const MISSING_FIELDS: &str = "Please fill in all fields.";
    pub const DUPLICATE_PHONE: &str = "This phone number is already registered.";
    pub const SAVE_FAILED: &str = "Error saving data. Please try again.";
    pub const SIGNED_UP: &str = "Successfully signed up for alerts!";
    pub const UNEXPECTED: &str = "An unexpected error occurred.";
}

pub const SUBMIT_LABEL: &str = "Sign Up for Alerts";
pub const SUBMITTING_LABEL: &str = "Signing up...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiStatus {
    Idle,
    Submitting,
    Error,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Error => "error",
            MessageKind::Success => "success",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: Option<MessageKind>,
}

impl Message {
    pub fn class(&self) -> String {
        match self.kind {
            Some(kind) => format!("message {}", kind.as_str()),
            None => "message".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: &'static str,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self {
            enabled: true,
            label: SUBMIT_LABEL,
        }
    }
}

/// Everything the signup section shows: the form values, the submit button
/// and the message region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupPage {
    pub fields: SignupForm,
    pub button: SubmitButton,
    pub message: Message,
    pub status: UiStatus,
}

impl Default for SignupPage {
    fn default() -> Self {
        Self {
            fields: SignupForm::default(),
            button: SubmitButton::default(),
            message: Message::default(),
            status: UiStatus::Idle,
        }
    }
}

impl SignupPage {
    /// A fresh page. A loader that failed for good leaves it disabled with
    /// the loader's notice.
    pub fn for_initialization(initialization: Option<&Initialization>) -> Self {
        let mut page = Self::default();
        if let Some(Initialization::Disabled(notice)) = initialization {
            page.show_message(*notice, MessageKind::Error);
            page.status = UiStatus::Error;
            page.button.enabled = false;
        }
        page
    }

    pub fn show_message(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.message = Message {
            text: text.into(),
            kind: Some(kind),
        };
    }

    pub fn report(&mut self, err: &AppError) {
        err.log();
        self.show_message(err.user_msg(), MessageKind::Error);
        self.status = UiStatus::Error;
    }

    pub fn begin_submit(&mut self) {
        self.button = SubmitButton {
            enabled: false,
            label: SUBMITTING_LABEL,
        };
        self.message = Message::default();
        self.status = UiStatus::Submitting;
    }

    /// Hands the control back. The outcome stays visible in `message`.
    pub fn finish_submit(&mut self) {
        self.button = SubmitButton::default();
        self.status = UiStatus::Idle;
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarqueeError {
    // --- Registration / login ---
    #[error("All fields are required.")]
    FieldsRequired,

    #[error("Email already registered.")]
    DuplicateEmail,

    #[error("Please enter a valid email.")]
    InvalidEmailFormat,

    #[error("Password must be at least {min} characters.")]
    WeakPassword { min: usize },

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Not logged in.")]
    NotLoggedIn,

    // --- Profiles ---
    #[error("You can only have up to {max} profiles.")]
    ProfileLimitExceeded { max: usize },

    #[error("Profile name is required.")]
    NameRequired,

    #[error("Profile name must be between {min} and {max} characters.")]
    NameLength { min: usize, max: usize },

    #[error("That profile name is already in use.")]
    NameTaken,

    #[error("PIN must be exactly 4 digits (numbers only).")]
    InvalidPin,

    /// Carries the requested id for callers and logs; the message is the
    /// form copy only.
    #[error("Profile not found.")]
    ProfileNotFound(String),

    #[error("You must have at least 1 profile.")]
    LastProfileProtected,

    #[error("Incorrect PIN. Please try again.")]
    IncorrectPin,

    #[error("No profile selected.")]
    NoProfileSelected,

    // --- Infrastructure ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl MarqueeError {
    /// True for failures caused by user input, as opposed to storage or
    /// configuration faults. UIs show these inline next to the form.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            MarqueeError::Io(_)
                | MarqueeError::Serialization(_)
                | MarqueeError::Store(_)
                | MarqueeError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;

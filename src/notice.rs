use std::fmt;

/// Blocking message shown to the user after a failed or empty action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    /// The analysis service answered without a usable result
    NoResult,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Error(_) => "Error",
            Self::NoResult => "No result",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(message) => write!(f, "{}", message),
            Self::NoResult => write!(f, "No valid calculation result. Try again!"),
        }
    }
}

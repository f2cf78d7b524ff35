use thiserror::Error;

/// Failure classes mapped onto process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NessaErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl NessaErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::InputValidationError => "INPUT",
            Self::IoSystemError => "IO",
            Self::ComputationError => "RUN",
            Self::InternalError => "INTERNAL",
        }
    }
}

/// Structured analysis error: a category, a stable placeholder code for
/// diagnostics grepping, and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{placeholder}] {message}")]
pub struct NessaError {
    category: NessaErrorCategory,
    placeholder: String,
    message: String,
}

impl NessaError {
    pub fn input_validation(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NessaErrorCategory::InputValidationError, placeholder, message)
    }

    pub fn io_system(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NessaErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn computation(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NessaErrorCategory::ComputationError, placeholder, message)
    }

    pub fn internal(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NessaErrorCategory::InternalError, placeholder, message)
    }

    fn new(
        category: NessaErrorCategory,
        placeholder: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder: placeholder.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> NessaErrorCategory {
        self.category
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        match self.category {
            NessaErrorCategory::Success => None,
            _ => Some(format!(
                "Analysis terminated ({} failure, exit code {}).",
                self.category.as_str(),
                self.exit_code()
            )),
        }
    }
}

pub type AnalysisResult<T> = Result<T, NessaError>;

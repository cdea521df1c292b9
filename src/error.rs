/// Error returned by the non-engine layers (file I/O, argument resolution, sample generation).
///
/// The regression engine itself never fails; it always resolves to a model.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Bad input: unreadable history file, unknown product, invalid parameters.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Failure writing an export or debug file.
    pub fn output(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_assign_exit_codes() {
        assert_eq!(AppError::input("bad").exit_code(), 2);
        assert_eq!(AppError::output("disk").exit_code(), 4);
        assert_eq!(AppError::input("unknown product 'rye'").to_string(), "unknown product 'rye'");
    }
}

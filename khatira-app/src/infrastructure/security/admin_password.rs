use khatira_errors::AppError;

/// The single shared admin password.
#[derive(Clone)]
pub struct AdminPassword {
    expected: String,
}

impl AdminPassword {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    pub fn verify(&self, candidate: &str) -> Result<(), AppError> {
        // An unset password locks the dashboard instead of opening it.
        if self.expected.is_empty() || !constant_time_eq(self.expected.as_bytes(), candidate.as_bytes()) {
            return Err(AppError::InvalidPassword);
        }
        Ok(())
    }
}

impl std::fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminPassword").finish_non_exhaustive()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

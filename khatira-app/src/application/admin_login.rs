use crate::infrastructure::security::AdminPassword;
use khatira_errors::AppError;

pub struct AdminLogin {
    password: AdminPassword,
}

impl AdminLogin {
    pub fn new(password: AdminPassword) -> Self {
        Self { password }
    }

    pub fn execute(&self, candidate: &str) -> Result<(), AppError> {
        self.password.verify(candidate).inspect_err(|_| {
            tracing::warn!("Failed admin login attempt");
        })?;
        tracing::info!("Admin logged in");
        Ok(())
    }
}

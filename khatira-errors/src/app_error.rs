use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("بيانات غير صالحة: {0}")]
    InvalidInput(String),

    #[error("باب المشاركة مغلق في المرحلة الحالية")]
    SubmissionClosed,

    #[error("التصويت غير متاح في المرحلة الحالية")]
    VotingClosed,

    #[error("لقد قمت بالتصويت على هذه الخاطرة من قبل")]
    AlreadyVoted,

    #[error("كلمة مرور خاطئة")]
    InvalidPassword,

    #[error("غير مصرح لك بالدخول")]
    Unauthorized,

    #[error("الخاطرة غير موجودة")]
    NotFound,

    #[error("طلبات كثيرة: {0}")]
    RateLimited(String),

    #[error("خطأ في قاعدة البيانات: {0}")]
    Database(String),

    #[error("حدث خطأ داخلي: {0}")]
    Internal(String),
}

impl AppError {
    /// Message safe to show to visitors. Internal details never leak here.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(reason) => reason.clone(),
            Self::SubmissionClosed => "باب المشاركة مغلق حاليا".to_string(),
            Self::VotingClosed => "التصويت غير متاح حاليا".to_string(),
            Self::AlreadyVoted => "لقد قمت بالتصويت على هذه الخاطرة من قبل".to_string(),
            Self::InvalidPassword => "كلمة مرور خاطئة".to_string(),
            Self::Unauthorized => "يجب تسجيل الدخول كمشرف".to_string(),
            Self::NotFound => "الخاطرة غير موجودة".to_string(),
            Self::RateLimited(hint) => hint.clone(),
            Self::Database(_) | Self::Internal(_) => {
                "حدث خطأ في الخادم. يرجى المحاولة مرة أخرى.".to_string()
            }
        }
    }

    /// Stable machine-readable code, sent alongside the localized message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::SubmissionClosed => "submission_closed",
            Self::VotingClosed => "voting_closed",
            Self::AlreadyVoted => "already_voted",
            Self::InvalidPassword => "invalid_password",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::RateLimited(_) => "rate_limited",
            Self::Database(_) => "database_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

#[cfg(feature = "axum")]
mod axum_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        error: String,
        code: &'static str,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                AppError::SubmissionClosed
                | AppError::VotingClosed
                | AppError::AlreadyVoted => StatusCode::FORBIDDEN,
                AppError::InvalidPassword | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                AppError::Database(_) | AppError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            if matches!(self, AppError::Database(_) | AppError::Internal(_)) {
                tracing::error!("Request failed: {}", self);
            }
            let status = self.status_code();
            let body = ErrorResponse {
                error: self.user_message(),
                code: self.code(),
            };
            (status, Json(body)).into_response()
        }
    }

}

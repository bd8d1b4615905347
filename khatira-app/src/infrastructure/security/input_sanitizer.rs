use crate::domain::NewKhatira;
use khatira_errors::AppError;

pub const DEFAULT_MAX_AUTHOR_CHARS: usize = 100;
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 5000;

#[derive(Debug, Clone, Copy)]
pub struct InputSanitizer {
    max_author_chars: usize,
    max_content_chars: usize,
}

impl InputSanitizer {
    pub fn new(max_author_chars: usize, max_content_chars: usize) -> Self {
        Self {
            max_author_chars,
            max_content_chars,
        }
    }

    pub fn validate_submission(&self, name: &str, content: &str) -> Result<NewKhatira, AppError> {
        let author = Self::clean(name);
        let content = Self::clean(content);

        if author.is_empty() {
            return Err(AppError::InvalidInput("الاسم مطلوب".to_string()));
        }
        if content.is_empty() {
            return Err(AppError::InvalidInput("نص الخاطرة مطلوب".to_string()));
        }

        if author.chars().count() > self.max_author_chars {
            return Err(AppError::InvalidInput(format!(
                "الاسم طويل جدا، الحد الأقصى {} حرفا",
                self.max_author_chars
            )));
        }
        if content.chars().count() > self.max_content_chars {
            return Err(AppError::InvalidInput(format!(
                "الخاطرة طويلة جدا، الحد الأقصى {} حرفا",
                self.max_content_chars
            )));
        }

        Ok(NewKhatira { author, content })
    }

    /// Drops control characters except line breaks and tabs, then trims.
    fn clean(input: &str) -> String {
        input
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect::<String>()
            .trim()
            .to_string()
    }
}

impl Default for InputSanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AUTHOR_CHARS, DEFAULT_MAX_CONTENT_CHARS)
    }
}

use khatira_errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of the event. Stored and sent over the wire as its integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Phase {
    /// Entries may be submitted, nothing is listed yet.
    #[default]
    Submission = 1,
    /// Entries are listed anonymously and visitors may vote.
    Voting = 2,
    /// Voting is closed, entries are ranked with their authors.
    Results = 3,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Submission, Phase::Voting, Phase::Results];

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn accepts_submissions(self) -> bool {
        self == Phase::Submission
    }

    pub fn accepts_votes(self) -> bool {
        self == Phase::Voting
    }

    pub fn lists_entries(self) -> bool {
        self != Phase::Submission
    }

    pub fn reveals_authors(self) -> bool {
        self == Phase::Results
    }

    pub fn reveals_scores(self) -> bool {
        self == Phase::Results
    }

    pub fn ensure_accepts_submissions(self) -> Result<(), AppError> {
        if self.accepts_submissions() {
            Ok(())
        } else {
            Err(AppError::SubmissionClosed)
        }
    }

    pub fn ensure_accepts_votes(self) -> Result<(), AppError> {
        if self.accepts_votes() {
            Ok(())
        } else {
            Err(AppError::VotingClosed)
        }
    }
}

impl TryFrom<i32> for Phase {
    type Error = AppError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Phase::Submission),
            2 => Ok(Phase::Voting),
            3 => Ok(Phase::Results),
            other => Err(AppError::InvalidInput(format!(
                "المرحلة {} غير صالحة، القيم المسموحة 1 أو 2 أو 3",
                other
            ))),
        }
    }
}

impl From<Phase> for i32 {
    fn from(phase: Phase) -> Self {
        phase.as_i32()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Submission => "submission",
            Phase::Voting => "voting",
            Phase::Results => "results",
        };
        write!(f, "{} ({})", name, self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_submission() {
        assert_eq!(Phase::default(), Phase::Submission);
    }

    #[test]
    fn integer_round_trip() {
        for phase in Phase::ALL {
            assert_eq!(Phase::try_from(phase.as_i32()), Ok(phase));
        }
        assert!(Phase::try_from(0).is_err());
        assert!(Phase::try_from(4).is_err());
    }

    #[test]
    fn only_one_phase_accepts_each_mutation() {
        let submitting: Vec<_> = Phase::ALL.into_iter().filter(|p| p.accepts_submissions()).collect();
        let voting: Vec<_> = Phase::ALL.into_iter().filter(|p| p.accepts_votes()).collect();
        assert_eq!(submitting, vec![Phase::Submission]);
        assert_eq!(voting, vec![Phase::Voting]);
    }

    #[test]
    fn guards_return_phase_specific_errors() {
        assert_eq!(Phase::Voting.ensure_accepts_submissions(), Err(AppError::SubmissionClosed));
        assert_eq!(Phase::Results.ensure_accepts_votes(), Err(AppError::VotingClosed));
        assert!(Phase::Voting.ensure_accepts_votes().is_ok());
    }

    #[test]
    fn authors_and_scores_hidden_until_results() {
        assert!(!Phase::Voting.reveals_authors());
        assert!(!Phase::Voting.reveals_scores());
        assert!(Phase::Results.reveals_authors());
        assert!(!Phase::Submission.lists_entries());
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Phase::Voting).unwrap(), "2");
        let parsed: Phase = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, Phase::Results);
        assert!(serde_json::from_str::<Phase>("7").is_err());
    }
}

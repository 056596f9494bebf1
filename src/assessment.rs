use serde::Serialize;

/// Score at or above which professional support is recommended.
pub const SUPPORT_THRESHOLD: u8 = 10;

/// A single selectable answer for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub value: u8,
    pub label: &'static str,
}

/// One question from the standard screening set.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: u8,
    pub prompt: &'static str,
    pub options: [AnswerOption; 4],
}

const FREQUENCY_OPTIONS: [AnswerOption; 4] = [
    AnswerOption {
        value: 0,
        label: "Not at all",
    },
    AnswerOption {
        value: 1,
        label: "Several days",
    },
    AnswerOption {
        value: 2,
        label: "More than half the days",
    },
    AnswerOption {
        value: 3,
        label: "Nearly every day",
    },
];

static STANDARD_QUESTIONS: [Question; 5] = [
    Question {
        id: 1,
        prompt: "How often have you felt little interest or pleasure in doing things?",
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 2,
        prompt: "How often have you felt down, depressed, or hopeless?",
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 3,
        prompt: "How often have you had trouble falling or staying asleep, or sleeping too much?",
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 4,
        prompt: "How often have you felt tired or had little energy?",
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 5,
        prompt: "How often have you had poor appetite or overeaten?",
        options: FREQUENCY_OPTIONS,
    },
];

/// The fixed screening question set presented to every user.
#[derive(Debug, Clone, Copy)]
pub struct Questionnaire {
    questions: &'static [Question],
}

impl Questionnaire {
    pub fn standard() -> Self {
        Self {
            questions: &STANDARD_QUESTIONS,
        }
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Maximum achievable score: the largest option value on every question.
    pub fn max_score(&self) -> u8 {
        self.questions
            .iter()
            .map(|question| {
                question
                    .options
                    .iter()
                    .map(|option| option.value)
                    .max()
                    .unwrap_or(0)
            })
            .sum()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("question index {index} is out of range (question count {count})")]
    QuestionOutOfRange { index: usize, count: usize },
    #[error("value {value} is not an option for question {question_id}")]
    InvalidOptionValue { question_id: u8, value: u8 },
    #[error("answer set has {provided} answers but {expected} questions were asked")]
    IncompleteAnswerSet { provided: usize, expected: usize },
}

/// Where the session stands after recording an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentProgress {
    /// More questions remain; the cursor now points at `next_index`.
    Advanced { next_index: usize },
    /// Every question has an answer; the outcome is final.
    Complete(AssessmentOutcome),
}

/// Final result of a completed assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssessmentOutcome {
    pub score: u8,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ProfessionalSupport,
    DoingWell,
}

impl Recommendation {
    pub fn for_score(score: u8) -> Self {
        if score >= SUPPORT_THRESHOLD {
            Self::ProfessionalSupport
        } else {
            Self::DoingWell
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ProfessionalSupport => "Professional support recommended",
            Self::DoingWell => "You are doing well",
        }
    }
}

/// Dashboard transform: assessment score out of 15 becomes a wellness score
/// out of 100, higher meaning better.
pub fn wellness_score(score: u8) -> u8 {
    100u8.saturating_sub(score.saturating_mul(2))
}

/// Incremental answer recording for one sitting of the questionnaire.
///
/// Revisiting a question overwrites its stored answer; answers for other
/// questions are untouched. The cursor only advances when the current
/// question is the one being answered, so backward navigation followed by a
/// re-answer does not skip ahead past unanswered questions.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    questionnaire: Questionnaire,
    answers: Vec<Option<u8>>,
    cursor: usize,
}

impl AssessmentSession {
    pub fn new(questionnaire: Questionnaire) -> Self {
        let answers = vec![None; questionnaire.len()];
        Self {
            questionnaire,
            answers,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(|slot| slot.is_some())
    }

    /// Record the answer for `index`, overwriting any previous choice.
    pub fn record(&mut self, index: usize, value: u8) -> Result<AssessmentProgress, AssessmentError> {
        let count = self.questionnaire.len();
        let question = self
            .questionnaire
            .questions()
            .get(index)
            .ok_or(AssessmentError::QuestionOutOfRange { index, count })?;

        if !question.options.iter().any(|option| option.value == value) {
            return Err(AssessmentError::InvalidOptionValue {
                question_id: question.id,
                value,
            });
        }

        self.answers[index] = Some(value);

        if self.is_complete() {
            let score = self.answers.iter().flatten().sum();
            return Ok(AssessmentProgress::Complete(AssessmentOutcome {
                score,
                recommendation: Recommendation::for_score(score),
            }));
        }

        if index == self.cursor && self.cursor + 1 < count {
            self.cursor += 1;
        }

        Ok(AssessmentProgress::Advanced {
            next_index: self.cursor,
        })
    }

    /// Move the cursor back one question without clearing recorded answers.
    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Outcome once every question has an answer.
    pub fn outcome(&self) -> Result<AssessmentOutcome, AssessmentError> {
        if !self.is_complete() {
            return Err(AssessmentError::IncompleteAnswerSet {
                provided: self.answered(),
                expected: self.questionnaire.len(),
            });
        }
        let score = self.answers.iter().flatten().sum();
        Ok(AssessmentOutcome {
            score,
            recommendation: Recommendation::for_score(score),
        })
    }
}

/// Score a full answer set in question order, validating length and values.
pub fn score_answers(
    questionnaire: &Questionnaire,
    answers: &[u8],
) -> Result<AssessmentOutcome, AssessmentError> {
    if answers.len() != questionnaire.len() {
        return Err(AssessmentError::IncompleteAnswerSet {
            provided: answers.len(),
            expected: questionnaire.len(),
        });
    }

    let mut session = AssessmentSession::new(*questionnaire);
    let mut last = None;
    for (index, value) in answers.iter().enumerate() {
        last = Some(session.record(index, *value)?);
    }

    match last {
        Some(AssessmentProgress::Complete(outcome)) => Ok(outcome),
        _ => session.outcome(),
    }
}

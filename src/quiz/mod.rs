pub mod bank;
pub mod reporter;
pub mod sampler;
pub mod scorer;
pub mod session;

use std::collections::BTreeMap;

pub type QuestionId = u32;

/// Chosen option id per answered question.
pub type Answers = BTreeMap<QuestionId, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<AnswerOption>,
}
impl Question {
    pub fn new(id: QuestionId, text: String, options: Vec<AnswerOption>) -> Self {
        Self { id, text, options }
    }

    /// The single option marked correct. `None` when the question has no
    /// correct option or more than one, so it can never be scored.
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        let mut correct = self.options.iter().filter(|o| o.is_correct);
        let first = correct.next()?;
        if correct.next().is_some() {
            return None;
        }
        Some(first)
    }

    pub fn is_answer_correct(&self, option_id: &str) -> bool {
        self.correct_option()
            .map(|o| o.id == option_id)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}
impl AnswerOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct,
        }
    }
}

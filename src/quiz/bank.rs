use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use log::warn;
use thiserror::Error;

use crate::quiz::{Question, QuestionId};

#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question id {0} appears more than once")]
    DuplicateQuestion(QuestionId),

    #[error("question {question} has option id {option:?} more than once")]
    DuplicateOption {
        question: QuestionId,
        option: String,
    },

    #[error("question {0} needs at least 2 options")]
    TooFewOptions(QuestionId),
}

/// Read-only pool of questions that sessions are sampled from.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Arc<Question>>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(BankError::DuplicateQuestion(question.id));
            }
            if question.options.len() < 2 {
                return Err(BankError::TooFewOptions(question.id));
            }

            let mut option_ids = HashSet::new();
            for option in &question.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(BankError::DuplicateOption {
                        question: question.id,
                        option: option.id.clone(),
                    });
                }
            }

            // Tolerated: such a question just never counts as correct
            if question.correct_option().is_none() {
                warn!(
                    "Question {} does not have exactly one correct option",
                    question.id
                );
            }
        }

        Ok(Self {
            questions: questions.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BankError> {
        let questions: Vec<Question> = serde_json::from_reader(BufReader::new(reader))?;
        Self::new(questions)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BankError> {
        Self::from_reader(File::open(path)?)
    }

    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

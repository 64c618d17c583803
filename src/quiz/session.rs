use std::sync::Arc;

use log::{debug, info};
use rand::Rng;

use crate::quiz::bank::QuestionBank;
use crate::quiz::reporter::{QuizResult, Reporter, ResultKind};
use crate::quiz::{sampler, scorer, Answers, Question};

pub const DEFAULT_QUESTION_COUNT: usize = 20;
pub const DEFAULT_PASS_THRESHOLD: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    pub question_count: usize,
    pub pass_threshold: usize,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Nothing to answer: the session is empty or already finished.
    Ignored,
    Advanced,
    Finished(QuizResult),
}

/// One run of the quiz over a fixed random draw from the bank.
#[derive(Debug, Clone)]
pub struct Session {
    bank: Arc<QuestionBank>,
    settings: QuizSettings,
    questions: Vec<Arc<Question>>,
    current_index: usize,
    answers: Answers,
    phase: Phase,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(bank: Arc<QuestionBank>, settings: QuizSettings, rng: &mut R) -> Self {
        let questions = sampler::sample(bank.questions(), settings.question_count, rng);
        debug!("Sampled {} of {} questions", questions.len(), bank.len());
        Self {
            bank,
            settings,
            questions,
            current_index: 0,
            answers: Answers::new(),
            phase: Phase::InProgress,
        }
    }

    pub fn submit_answer(&mut self, option_id: &str, reporter: &Reporter) -> Submission {
        if self.phase == Phase::Finished {
            return Submission::Ignored;
        }
        let question_id = match self.current_question() {
            Some(question) => question.id,
            None => return Submission::Ignored,
        };

        self.answers.insert(question_id, option_id.to_string());

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            return Submission::Advanced;
        }

        // Score only after the final answer is recorded
        self.phase = Phase::Finished;
        let result = self.outcome();
        info!(
            "Quiz finished: {} of {} correct, passed: {}",
            result.correct, result.total, result.passed
        );
        reporter.report(&result);
        Submission::Finished(result)
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions = sampler::sample(self.bank.questions(), self.settings.question_count, rng);
        self.current_index = 0;
        self.answers.clear();
        self.phase = Phase::InProgress;
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index).map(|q| q.as_ref())
    }

    pub fn correct_count(&self) -> usize {
        scorer::score(self.questions.iter().map(|q| q.as_ref()), &self.answers)
    }

    pub fn is_passed(&self) -> bool {
        scorer::is_passed(self.correct_count(), self.settings.pass_threshold)
    }

    pub fn outcome(&self) -> QuizResult {
        let correct = self.correct_count();
        QuizResult {
            kind: ResultKind::QuizResult,
            correct,
            total: self.total(),
            passed: scorer::is_passed(correct, self.settings.pass_threshold),
            answers: self.answers.clone(),
        }
    }

    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// True when the bank had nothing to draw from.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

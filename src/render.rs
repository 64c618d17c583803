use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::quiz::session::Session;
use crate::quiz::{Question, QuestionId};

const RESTART_DATA: &str = "restart";
const RESTART_BUTTON: &str = "Перезапустить";
const RETRY_BUTTON: &str = "Пройти ещё раз";

pub const GREETING_TEXT: &str = "Тест для Telegram: случайные вопросы из базы. Выберите вариант ответа кнопкой.";
pub const EMPTY_BANK_TEXT: &str = "Недостаточно вопросов в базе. Добавьте больше вопросов в файл с вопросами.";
pub const USE_BUTTONS_TEXT: &str = "Пожалуйста, выберите вариант ответа кнопкой";
pub const STALE_SESSION_TEXT: &str = "Сессия устарела, отправьте /start";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Restart,
    Answer { question: QuestionId, option: usize },
}

/// Telegram rejects callback data longer than this many bytes.
pub const CALLBACK_DATA_LIMIT: usize = 64;

/// Callback data is `"<question id>:<option index>"`, so a press on an old
/// message can be told apart from an answer to the current question.
/// Option ids come from the bank and may be arbitrarily long, so only the
/// index goes on the wire.
pub fn answer_data(question: QuestionId, option_index: usize) -> String {
    format!("{}:{}", question, option_index)
}

/// Maps a pressed button back to the option id of the current question.
/// `None` for presses on an earlier question or an unknown option.
pub fn resolve_answer(session: &Session, question: QuestionId, option: usize) -> Option<String> {
    let current = session.current_question()?;
    if current.id != question {
        return None;
    }
    current.options.get(option).map(|o| o.id.clone())
}

pub fn parse_callback(data: &str) -> Option<Callback> {
    if data == RESTART_DATA {
        return Some(Callback::Restart);
    }
    let (question, option) = data.split_once(':')?;
    Some(Callback::Answer {
        question: question.parse().ok()?,
        option: option.parse().ok()?,
    })
}

pub fn question_text(session: &Session, question: &Question) -> String {
    format!(
        "Вопрос {} / {}\nПравильных: {}\n\n{}",
        session.current_index() + 1,
        session.total(),
        session.correct_count(),
        question.text
    )
}

pub fn question_keyboard(question: &Question) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, o)| {
            vec![InlineKeyboardButton::callback(
                o.text.clone(),
                answer_data(question.id, i),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback(RESTART_BUTTON, RESTART_DATA)]);
    InlineKeyboardMarkup::new(rows)
}

pub fn result_text(session: &Session) -> String {
    let verdict = if session.is_passed() { "Зачёт" } else { "Незачёт" };
    format!(
        "Тест завершён\nПравильных ответов: {} из {}\n\n{}",
        session.correct_count(),
        session.total(),
        verdict
    )
}

pub fn result_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        RETRY_BUTTON,
        RESTART_DATA,
    )]])
}

pub fn restart_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        RESTART_BUTTON,
        RESTART_DATA,
    )]])
}

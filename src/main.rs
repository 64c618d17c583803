mod config;
mod quiz;
mod render;
mod shell;

use std::sync::Arc;

use dotenv::dotenv;
use log::{debug, warn};
use teloxide::{dispatching::dialogue::InMemStorage, prelude::*, types::InlineKeyboardMarkup};

use config::Config;
use quiz::bank::QuestionBank;
use quiz::session::{Session, Submission};
use render::Callback;

type QuizDialogue = Dialogue<State, InMemStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Debug, Default)]
pub enum State {
    #[default]
    Start,
    Quiz {
        session: Session,
    },
}

#[tokio::main]
async fn main() {
    // .env is optional, real deployments pass plain env vars
    dotenv().ok();

    pretty_env_logger::init();
    log::info!("Starting quiz bot...");

    let config = Arc::new(Config::from_env().expect("Invalid configuration"));

    log::info!("Loading the question bank from {}", config.bank_path.display());
    let bank = Arc::new(QuestionBank::load(&config.bank_path).expect("Failed to load the question bank"));
    log::info!(
        "Question bank loaded: {} questions, {} per session, {} to pass",
        bank.len(),
        config.settings.question_count,
        config.settings.pass_threshold
    );
    if bank.len() < config.settings.question_count {
        warn!("The bank is smaller than a session, every session will use the whole bank");
    }

    let bot = Bot::from_env();

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .enter_dialogue::<Message, InMemStorage<State>, State>()
                .branch(dptree::case![State::Start].endpoint(start))
                .branch(dptree::case![State::Quiz { session }].endpoint(quiz_message)),
        )
        .branch(
            Update::filter_callback_query()
                .enter_dialogue::<CallbackQuery, InMemStorage<State>, State>()
                .branch(dptree::case![State::Quiz { session }].endpoint(quiz_callback))
                .branch(dptree::case![State::Start].endpoint(stale_callback)),
        );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![InMemStorage::<State>::new(), bank, config])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn start(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    bank: Arc<QuestionBank>,
    config: Arc<Config>,
) -> HandlerResult {
    shell::reporter_for(&bot, msg.chat.id, &config).announce_start();

    let session = Session::new(bank, config.settings, &mut rand::thread_rng());
    debug!("New session for chat {} with {} questions", msg.chat.id.0, session.total());
    dialogue.update(State::Quiz { session: session.clone() }).await?;

    bot.send_message(msg.chat.id, render::GREETING_TEXT).await?;
    show_session(&bot, msg.chat.id, &session).await
}

async fn quiz_message(
    bot: Bot,
    dialogue: QuizDialogue,
    session: Session,
    msg: Message,
    config: Arc<Config>,
) -> HandlerResult {
    match msg.text() {
        Some("/start") | Some("/restart") => restart(&bot, dialogue, msg.chat.id, session, &config).await,
        _ => {
            bot.send_message(msg.chat.id, render::USE_BUTTONS_TEXT).await?;
            show_session(&bot, msg.chat.id, &session).await
        }
    }
}

async fn quiz_callback(
    bot: Bot,
    dialogue: QuizDialogue,
    session: Session,
    q: CallbackQuery,
    config: Arc<Config>,
) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    let chat_id = match q.message.as_ref() {
        Some(message) => message.chat.id,
        None => return Ok(()),
    };

    match q.data.as_deref().and_then(render::parse_callback) {
        Some(Callback::Restart) => restart(&bot, dialogue, chat_id, session, &config).await,
        Some(Callback::Answer { question, option }) => {
            let option_id = match render::resolve_answer(&session, question, option) {
                Some(option_id) => option_id,
                None => {
                    debug!("Ignoring a stale answer to question {} in chat {}", question, chat_id.0);
                    return Ok(());
                }
            };

            let mut session = session;
            let reporter = shell::reporter_for(&bot, chat_id, &config);
            if let Submission::Ignored = session.submit_answer(&option_id, &reporter) {
                return Ok(());
            }
            // Persist before any send, a failed send must not leave the answer replayable
            dialogue.update(State::Quiz { session: session.clone() }).await?;
            show_session(&bot, chat_id, &session).await
        }
        None => {
            warn!("Unknown callback data {:?} in chat {}", q.data, chat_id.0);
            Ok(())
        }
    }
}

async fn stale_callback(bot: Bot, dialogue: QuizDialogue, q: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;
    dialogue.update(State::Start).await?;
    if let Some(message) = q.message {
        bot.send_message(message.chat.id, render::STALE_SESSION_TEXT)
            .await?;
    }
    Ok(())
}

async fn restart(
    bot: &Bot,
    dialogue: QuizDialogue,
    chat_id: ChatId,
    session: Session,
    config: &Config,
) -> HandlerResult {
    let mut session = session;
    shell::reporter_for(bot, chat_id, config).announce_start();
    session.restart(&mut rand::thread_rng());
    dialogue.update(State::Quiz { session: session.clone() }).await?;
    show_session(bot, chat_id, &session).await
}

async fn show_session(bot: &Bot, chat_id: ChatId, session: &Session) -> HandlerResult {
    if session.is_finished() {
        send_with_keyboard(bot, chat_id, render::result_text(session), render::result_keyboard()).await
    } else if let Some(question) = session.current_question() {
        send_with_keyboard(
            bot,
            chat_id,
            render::question_text(session, question),
            render::question_keyboard(question),
        )
        .await
    } else {
        send_with_keyboard(
            bot,
            chat_id,
            render::EMPTY_BANK_TEXT.to_string(),
            render::restart_keyboard(),
        )
        .await
    }
}

async fn send_with_keyboard(
    bot: &Bot,
    chat_id: ChatId,
    text: String,
    keyboard: InlineKeyboardMarkup,
) -> HandlerResult {
    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    Ok(())
}

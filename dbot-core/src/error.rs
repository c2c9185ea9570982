use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    /// Transport failure while sending (network, Telegram API rejection).
    #[error("Bot error: {0}")]
    Bot(String),
}

pub type Result<T> = std::result::Result<T, DbotError>;

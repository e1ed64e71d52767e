use thiserror::Error;

pub mod events;
pub mod ident;
pub mod interpret;
pub mod report;

pub use events::LogEvent;
pub use ident::{CombatantReveal, PositionToken, SideData, SideId, Stat};
pub use interpret::{Classification, classify_line, interpret_lines};
pub use report::{BattleId, HpReport};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid packet format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Empty packet")]
    EmptyPacket,
}

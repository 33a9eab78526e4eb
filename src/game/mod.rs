// Hangman game core: progress masking, the per-game state machine,
// the score ledger and rankings

pub mod engine;
pub mod ledger;
pub mod progress;
pub mod ranking;

pub use engine::GameEngine;
pub use ledger::ScoreLedger;
pub use ranking::RankingService;

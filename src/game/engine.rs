use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{ledger::ScoreLedger, progress::ProgressMask};
use crate::{
    db::Store,
    error::GameError,
    models::{Game, Move, Score, User},
    words::WordSource,
};

/// What a single guess did to a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The game had already finished; nothing changed
    AlreadyOver,
    /// The guess was not a single letter; nothing changed
    NotALetter,
    /// The letter was guessed before. The attempt is still consumed, and
    /// `exhausted` is set when that used up the last one.
    Repeated { exhausted: bool },
    /// The game goes on
    Continue { good: bool },
    Won,
    Lost { good: bool },
}

impl GuessOutcome {
    pub fn message(&self) -> String {
        let verdict = |good: bool| if good { "Good guess!" } else { "Bad guess!" };
        match self {
            GuessOutcome::AlreadyOver => "Game already over!".to_string(),
            GuessOutcome::NotALetter => "Guess must be a letter!".to_string(),
            GuessOutcome::Repeated { exhausted: false } => {
                "You already guessed that letter!".to_string()
            }
            GuessOutcome::Repeated { exhausted: true } => {
                "You already guessed that letter! Game over!".to_string()
            }
            GuessOutcome::Continue { good } => verdict(*good).to_string(),
            GuessOutcome::Won => "You win!".to_string(),
            GuessOutcome::Lost { good } => format!("{} Game over!", verdict(*good)),
        }
    }

    /// Whether the game record changed and has to be written back
    pub fn mutated(&self) -> bool {
        !matches!(self, GuessOutcome::AlreadyOver | GuessOutcome::NotALetter)
    }

    /// `Some(won)` when this guess ended the game
    pub fn termination(&self) -> Option<bool> {
        match self {
            GuessOutcome::Won => Some(true),
            GuessOutcome::Lost { .. } | GuessOutcome::Repeated { exhausted: true } => Some(false),
            _ => None,
        }
    }
}

/// Apply one raw guess to an in-memory game.
///
/// Malformed guesses cost nothing. Every well-formed guess costs one attempt,
/// including a letter that was already guessed. A fully revealed word wins
/// even when no attempts are left.
pub fn advance(game: &mut Game, raw_guess: &str) -> GuessOutcome {
    if game.game_over {
        return GuessOutcome::AlreadyOver;
    }

    let mut chars = raw_guess.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_lowercase(),
        _ => return GuessOutcome::NotALetter,
    };

    game.attempts_remaining -= 1;

    if game.history.contains(letter) {
        let exhausted = game.attempts_remaining < 1;
        if exhausted {
            game.game_over = true;
        }
        return GuessOutcome::Repeated { exhausted };
    }

    game.history.push(letter);
    let good = game.target.contains(letter);
    game.progress = ProgressMask::apply_guess(&game.target, &game.progress, letter);

    if ProgressMask::is_revealed(&game.target, &game.progress) {
        game.game_over = true;
        GuessOutcome::Won
    } else if game.attempts_remaining < 1 {
        game.game_over = true;
        GuessOutcome::Lost { good }
    } else {
        GuessOutcome::Continue { good }
    }
}

/// Owns the game lifecycle: start, guess, cancel and termination scoring.
pub struct GameEngine {
    store: Arc<dyn Store>,
    words: Arc<dyn WordSource>,
    ledger: ScoreLedger,
    default_attempts: i32,
    /// One async mutex per game, held across read -> mutate -> persist
    game_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl GameEngine {
    pub fn new(store: Arc<dyn Store>, words: Arc<dyn WordSource>, default_attempts: i32) -> Self {
        Self {
            ledger: ScoreLedger::new(store.clone()),
            store,
            words,
            default_attempts,
            game_locks: DashMap::new(),
        }
    }

    /// Register a new user under a unique name
    pub async fn register_user(
        &self,
        user_name: &str,
        email: Option<String>,
    ) -> Result<User, GameError> {
        if user_name.trim().is_empty() {
            return Err(GameError::InvalidInput(
                "User name must not be empty".to_string(),
            ));
        }

        let user = User::new(user_name, email);
        self.store.insert_user(&user).await?;
        tracing::info!("Created user {}", user.user_name);
        Ok(user)
    }

    pub async fn require_user(&self, user_name: &str) -> Result<User, GameError> {
        self.store
            .get_user(user_name)
            .await?
            .ok_or_else(GameError::user_not_found)
    }

    /// Start a new game for `user_name` against a fresh target word
    pub async fn start_game(
        &self,
        user_name: &str,
        attempts: Option<i32>,
    ) -> Result<Game, GameError> {
        let user = self.require_user(user_name).await?;

        let attempts_allowed = attempts.unwrap_or(self.default_attempts);
        if attempts_allowed < 1 {
            return Err(GameError::InvalidInput(
                "Attempts must be a positive number".to_string(),
            ));
        }

        let target = self.words.next_word().await?;

        let game = Game {
            game_id: Uuid::new_v4(),
            user_name: user.user_name,
            progress: ProgressMask::initial(&target),
            target,
            history: String::new(),
            attempts_allowed,
            attempts_remaining: attempts_allowed,
            game_over: false,
            created_at: Utc::now(),
        };
        self.store.insert_game(&game).await?;

        tracing::info!(
            "Started game {} for user {} with {} attempts",
            game.game_id,
            game.user_name,
            attempts_allowed
        );
        tracing::debug!("Game {} target word: {}", game.game_id, game.target);

        Ok(game)
    }

    pub async fn get_game(&self, game_id: Uuid) -> Result<Game, GameError> {
        self.store
            .get_game(game_id)
            .await?
            .ok_or_else(GameError::game_not_found)
    }

    /// Apply a guess and persist the result, recording a score if the game ended
    pub async fn apply_guess(
        &self,
        game_id: Uuid,
        raw_guess: &str,
    ) -> Result<(Game, GuessOutcome), GameError> {
        let lock = self.lock_for(game_id);
        let result = {
            let _guard = lock.lock().await;
            self.apply_guess_locked(game_id, raw_guess).await
        };
        drop(lock);
        self.release_lock(game_id);
        result
    }

    /// End an active game without a result. No score is recorded.
    pub async fn cancel_game(&self, game_id: Uuid) -> Result<Game, GameError> {
        let lock = self.lock_for(game_id);
        let result = {
            let _guard = lock.lock().await;
            self.cancel_game_locked(game_id).await
        };
        drop(lock);
        self.release_lock(game_id);
        result
    }

    /// Guessed letters in order, each marked with whether it is in the target
    pub async fn history(&self, game_id: Uuid) -> Result<Vec<Move>, GameError> {
        let game = self.get_game(game_id).await?;
        Ok(game
            .history
            .chars()
            .map(|letter| Move::new(letter, game.target.contains(letter)))
            .collect())
    }

    pub async fn user_games(&self, user_name: &str) -> Result<Vec<Game>, GameError> {
        let user = self.require_user(user_name).await?;
        self.store.list_user_games(&user.user_name).await
    }

    async fn apply_guess_locked(
        &self,
        game_id: Uuid,
        raw_guess: &str,
    ) -> Result<(Game, GuessOutcome), GameError> {
        let mut game = self.get_game(game_id).await?;
        let outcome = advance(&mut game, raw_guess);

        tracing::debug!(
            "Game {} guess {:?}: {:?} ({} attempts left)",
            game_id,
            raw_guess,
            outcome,
            game.attempts_remaining
        );

        match outcome.termination() {
            Some(won) => {
                self.terminate(&game, won).await?;
            }
            None if outcome.mutated() => {
                self.store.update_game(&game).await?;
            }
            None => {}
        }

        Ok((game, outcome))
    }

    async fn cancel_game_locked(&self, game_id: Uuid) -> Result<Game, GameError> {
        let mut game = self.get_game(game_id).await?;
        if game.game_over {
            return Err(GameError::InvalidState(
                "You cannot cancel a finished game.".to_string(),
            ));
        }

        game.attempts_remaining = 0;
        game.game_over = true;
        self.store.update_game(&game).await?;

        tracing::info!("Cancelled game {} for user {}", game_id, game.user_name);
        Ok(game)
    }

    /// Persist a game that `advance` just ended, together with its score.
    ///
    /// The game and score are written in one store operation, so a failure
    /// leaves the stored game active and the guess can be retried.
    async fn terminate(&self, game: &Game, won: bool) -> Result<Score, GameError> {
        let score = self.ledger.record(game, won).await?;
        tracing::info!(
            "Game {} over for user {}: {} after {} guesses",
            game.game_id,
            game.user_name,
            if won { "won" } else { "lost" },
            score.guesses
        );
        Ok(score)
    }

    fn lock_for(&self, game_id: Uuid) -> Arc<Mutex<()>> {
        self.game_locks.entry(game_id).or_default().clone()
    }

    /// Drop the game's lock entry once no request holds or waits on it.
    /// Callers must drop their own handle first.
    fn release_lock(&self, game_id: Uuid) {
        self.game_locks
            .remove_if(&game_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MemoryStore, words::FixedWordSource};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio_test::assert_ok;

    /// Memory store whose next `finish_game` fails without writing anything
    #[derive(Default)]
    struct FlakyFinishStore {
        inner: MemoryStore,
        fail_next_finish: AtomicBool,
    }

    #[async_trait]
    impl Store for FlakyFinishStore {
        async fn insert_user(&self, user: &User) -> Result<(), GameError> {
            self.inner.insert_user(user).await
        }

        async fn get_user(&self, user_name: &str) -> Result<Option<User>, GameError> {
            self.inner.get_user(user_name).await
        }

        async fn list_users(&self) -> Result<Vec<User>, GameError> {
            self.inner.list_users().await
        }

        async fn insert_game(&self, game: &Game) -> Result<(), GameError> {
            self.inner.insert_game(game).await
        }

        async fn get_game(&self, game_id: Uuid) -> Result<Option<Game>, GameError> {
            self.inner.get_game(game_id).await
        }

        async fn update_game(&self, game: &Game) -> Result<(), GameError> {
            self.inner.update_game(game).await
        }

        async fn finish_game(&self, game: &Game, score: &Score) -> Result<(), GameError> {
            if self.fail_next_finish.swap(false, Ordering::SeqCst) {
                return Err(GameError::Storage("connection reset".to_string()));
            }
            self.inner.finish_game(game, score).await
        }

        async fn list_user_games(&self, user_name: &str) -> Result<Vec<Game>, GameError> {
            self.inner.list_user_games(user_name).await
        }

        async fn list_active_games(&self) -> Result<Vec<Game>, GameError> {
            self.inner.list_active_games().await
        }

        async fn list_scores(&self) -> Result<Vec<Score>, GameError> {
            self.inner.list_scores().await
        }

        async fn list_user_scores(&self, user_name: &str) -> Result<Vec<Score>, GameError> {
            self.inner.list_user_scores(user_name).await
        }
    }

    fn game_with_target(target: &str, attempts: i32) -> Game {
        Game {
            game_id: Uuid::new_v4(),
            user_name: "alice".to_string(),
            target: target.to_string(),
            progress: ProgressMask::initial(target),
            history: String::new(),
            attempts_allowed: attempts,
            attempts_remaining: attempts,
            game_over: false,
            created_at: Utc::now(),
        }
    }

    async fn engine_with_word(word: &'static str) -> (GameEngine, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let engine = GameEngine::new(store.clone(), Arc::new(FixedWordSource(word)), 10);
        engine.register_user("alice", None).await.unwrap();
        (engine, store)
    }

    #[test]
    fn test_cat_scenario_loses_on_last_correct_letter() {
        let mut game = game_with_target("cat", 3);

        let outcome = advance(&mut game, "c");
        assert_eq!(outcome, GuessOutcome::Continue { good: true });
        assert_eq!(game.progress, "c**");
        assert_eq!(game.attempts_remaining, 2);
        assert_eq!(outcome.message(), "Good guess!");

        let outcome = advance(&mut game, "z");
        assert_eq!(outcome, GuessOutcome::Continue { good: false });
        assert_eq!(game.attempts_remaining, 1);
        assert_eq!(outcome.message(), "Bad guess!");

        let outcome = advance(&mut game, "a");
        assert_eq!(outcome, GuessOutcome::Lost { good: true });
        assert_eq!(game.progress, "ca*");
        assert_eq!(game.attempts_remaining, 0);
        assert!(game.game_over);
        assert_eq!(outcome.message(), "Good guess! Game over!");
        assert_eq!(outcome.termination(), Some(false));
    }

    #[test]
    fn test_bad_guess_on_last_attempt_message() {
        let mut game = game_with_target("cat", 1);
        let outcome = advance(&mut game, "q");
        assert_eq!(outcome.message(), "Bad guess! Game over!");
        assert!(game.game_over);
    }

    #[test]
    fn test_miss_costs_one_attempt_and_keeps_progress() {
        let mut game = game_with_target("cat", 5);
        advance(&mut game, "c");
        let before = game.progress.clone();

        advance(&mut game, "x");
        assert_eq!(game.attempts_remaining, 3);
        assert_eq!(game.progress, before);
    }

    #[test]
    fn test_malformed_guess_is_free() {
        let mut game = game_with_target("cat", 5);
        for raw in ["", "ab", "1", " ", "?"] {
            assert_eq!(advance(&mut game, raw), GuessOutcome::NotALetter);
        }
        assert_eq!(game.attempts_remaining, 5);
        assert!(game.history.is_empty());
        assert_eq!(
            GuessOutcome::NotALetter.message(),
            "Guess must be a letter!"
        );
    }

    #[test]
    fn test_repeated_letter_costs_attempt_without_duplicate() {
        let mut game = game_with_target("cat", 5);
        advance(&mut game, "c");
        let outcome = advance(&mut game, "C");

        assert_eq!(outcome, GuessOutcome::Repeated { exhausted: false });
        assert_eq!(outcome.message(), "You already guessed that letter!");
        assert_eq!(game.attempts_remaining, 3);
        assert_eq!(game.history, "c");
        assert_eq!(game.progress, "c**");
        assert!(!game.game_over);
    }

    #[test]
    fn test_repeated_letter_on_last_attempt_loses() {
        let mut game = game_with_target("cat", 2);
        advance(&mut game, "z");
        let outcome = advance(&mut game, "z");

        assert_eq!(outcome, GuessOutcome::Repeated { exhausted: true });
        assert_eq!(outcome.termination(), Some(false));
        assert_eq!(game.attempts_remaining, 0);
        assert!(game.game_over);
    }

    #[test]
    fn test_win_on_last_attempt() {
        let mut game = game_with_target("go", 2);
        advance(&mut game, "g");
        let outcome = advance(&mut game, "o");

        assert_eq!(outcome, GuessOutcome::Won);
        assert_eq!(game.attempts_remaining, 0);
        assert_eq!(outcome.message(), "You win!");
    }

    #[test]
    fn test_win_with_one_attempt_left() {
        let mut game = game_with_target("go", 3);
        advance(&mut game, "o");
        let outcome = advance(&mut game, "g");

        assert_eq!(outcome, GuessOutcome::Won);
        assert_eq!(outcome.termination(), Some(true));
        assert_eq!(game.attempts_remaining, 1);
        assert_eq!(game.progress, "go");
        assert!(game.game_over);
    }

    #[test]
    fn test_finished_game_is_frozen() {
        let mut game = game_with_target("go", 5);
        game.game_over = true;
        let snapshot = (game.progress.clone(), game.history.clone(), game.attempts_remaining);

        assert_eq!(advance(&mut game, "g"), GuessOutcome::AlreadyOver);
        assert_eq!(
            (game.progress.clone(), game.history.clone(), game.attempts_remaining),
            snapshot
        );
        assert!(!GuessOutcome::AlreadyOver.mutated());
    }

    #[test]
    fn test_history_keeps_submission_order() {
        let mut game = game_with_target("planet", 10);
        for raw in ["t", "a", "x", "p"] {
            advance(&mut game, raw);
        }
        assert_eq!(game.history, "taxp");
    }

    #[tokio::test]
    async fn test_start_game_requires_existing_user() {
        let (engine, _store) = engine_with_word("go").await;
        let err = engine.start_game("bob", None).await.unwrap_err();
        assert!(matches!(err, GameError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_start_game_rejects_non_positive_attempts() {
        let (engine, _store) = engine_with_word("go").await;
        let err = engine.start_game("alice", Some(0)).await.unwrap_err();
        assert!(matches!(err, GameError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_start_game_uses_default_attempts() {
        let (engine, store) = engine_with_word("Hangman").await;
        let game = assert_ok!(engine.start_game("alice", None).await);

        assert_eq!(game.target, "hangman");
        assert_eq!(game.progress, "*******");
        assert_eq!(game.attempts_allowed, 10);
        assert_eq!(game.attempts_remaining, 10);
        assert!(!game.game_over);
        assert!(store.get_game(game.game_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_word_source_failure_creates_no_game() {
        let store = Arc::new(MemoryStore::new());
        let engine = GameEngine::new(
            store.clone(),
            Arc::new(crate::words::DictionaryWordSource::from_words(Vec::<&str>::new())),
            10,
        );
        engine.register_user("alice", None).await.unwrap();

        let err = engine.start_game("alice", None).await.unwrap_err();
        assert!(matches!(err, GameError::DependencyFailure(_)));
        assert!(store.list_user_games("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_go_scenario_records_single_win() {
        let (engine, store) = engine_with_word("go").await;
        let game = engine.start_game("alice", Some(10)).await.unwrap();

        let (game_after, outcome) = engine.apply_guess(game.game_id, "g").await.unwrap();
        assert_eq!(outcome, GuessOutcome::Continue { good: true });
        assert_eq!(game_after.progress, "g*");

        let (game_after, outcome) = engine.apply_guess(game.game_id, "o").await.unwrap();
        assert_eq!(outcome, GuessOutcome::Won);
        assert!(game_after.game_over);

        let scores = store.list_user_scores("alice").await.unwrap();
        assert_eq!(scores.len(), 1);
        assert!(scores[0].won);
        assert_eq!(scores[0].guesses, 2);
        assert_eq!(scores[0].game_id, game.game_id);

        // Further guesses leave the game and ledger untouched
        let (_, outcome) = engine.apply_guess(game.game_id, "x").await.unwrap();
        assert_eq!(outcome, GuessOutcome::AlreadyOver);
        assert_eq!(store.list_scores().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_loss_records_all_attempts_used() {
        let (engine, store) = engine_with_word("go").await;
        let game = engine.start_game("alice", Some(2)).await.unwrap();

        engine.apply_guess(game.game_id, "x").await.unwrap();
        let (_, outcome) = engine.apply_guess(game.game_id, "y").await.unwrap();
        assert_eq!(outcome, GuessOutcome::Lost { good: false });

        let scores = store.list_user_scores("alice").await.unwrap();
        assert_eq!(scores.len(), 1);
        assert!(!scores[0].won);
        assert_eq!(scores[0].guesses, 2);
    }

    #[tokio::test]
    async fn test_repeated_guess_is_persisted() {
        let (engine, store) = engine_with_word("go").await;
        let game = engine.start_game("alice", Some(5)).await.unwrap();

        engine.apply_guess(game.game_id, "g").await.unwrap();
        engine.apply_guess(game.game_id, "g").await.unwrap();

        let stored = store.get_game(game.game_id).await.unwrap().unwrap();
        assert_eq!(stored.attempts_remaining, 3);
        assert_eq!(stored.history, "g");
    }

    #[tokio::test]
    async fn test_guess_on_unknown_game_is_not_found() {
        let (engine, _store) = engine_with_word("go").await;
        let err = engine.apply_guess(Uuid::new_v4(), "a").await.unwrap_err();
        assert!(matches!(err, GameError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_cancel_twice_fails_with_invalid_state() {
        let (engine, store) = engine_with_word("go").await;
        let game = engine.start_game("alice", None).await.unwrap();

        let cancelled = engine.cancel_game(game.game_id).await.unwrap();
        assert_eq!(cancelled.attempts_remaining, 0);
        assert!(cancelled.game_over);

        let err = engine.cancel_game(game.game_id).await.unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));

        // Cancellation does not touch the ledger
        assert!(store.list_scores().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_unknown_game_is_not_found() {
        let (engine, _store) = engine_with_word("go").await;
        let err = engine.cancel_game(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, GameError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_history_marks_correct_letters() {
        let (engine, _store) = engine_with_word("cat").await;
        let game = engine.start_game("alice", None).await.unwrap();
        for raw in ["t", "z", "c"] {
            engine.apply_guess(game.game_id, raw).await.unwrap();
        }

        let moves = engine.history(game.game_id).await.unwrap();
        assert_eq!(
            moves,
            vec![Move::new('t', true), Move::new('z', false), Move::new('c', true)]
        );
        assert_eq!(moves[1].outcome, "Bad guess!");
    }

    #[tokio::test]
    async fn test_concurrent_guesses_do_not_double_score() {
        let (engine, store) = engine_with_word("a").await;
        let engine = Arc::new(engine);
        let game = engine.start_game("alice", Some(5)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let engine = engine.clone();
            let game_id = game.game_id;
            handles.push(tokio::spawn(async move {
                engine.apply_guess(game_id, "a").await.unwrap().1
            }));
        }

        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap() == GuessOutcome::Won {
                wins += 1;
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(store.list_scores().await.unwrap().len(), 1);
        let stored = store.get_game(game.game_id).await.unwrap().unwrap();
        assert_eq!(stored.attempts_remaining, 4);
        assert!(engine.game_locks.is_empty());
    }

    #[tokio::test]
    async fn test_failed_score_write_leaves_game_playable() {
        let store = Arc::new(FlakyFinishStore::default());
        let engine = GameEngine::new(store.clone(), Arc::new(FixedWordSource("go")), 10);
        engine.register_user("alice", None).await.unwrap();
        let game = engine.start_game("alice", None).await.unwrap();

        engine.apply_guess(game.game_id, "g").await.unwrap();
        store.fail_next_finish.store(true, Ordering::SeqCst);
        let err = engine.apply_guess(game.game_id, "o").await.unwrap_err();
        assert!(matches!(err, GameError::Storage(_)));

        // Neither the finished game nor a score was written
        let stored = store.get_game(game.game_id).await.unwrap().unwrap();
        assert!(!stored.game_over);
        assert_eq!(stored.attempts_remaining, 9);
        assert_eq!(stored.progress, "g*");
        assert!(store.list_scores().await.unwrap().is_empty());

        // Retrying the same guess completes the game exactly once
        let (game_after, outcome) = engine.apply_guess(game.game_id, "o").await.unwrap();
        assert_eq!(outcome, GuessOutcome::Won);
        assert_eq!(game_after.attempts_remaining, 8);
        let scores = store.list_scores().await.unwrap();
        assert_eq!(scores.len(), 1);
        assert!(scores[0].won);
        assert_eq!(scores[0].guesses, 2);
    }

    #[tokio::test]
    async fn test_game_locks_released_after_requests() {
        let (engine, _store) = engine_with_word("go").await;

        for _ in 0..50 {
            let game = engine.start_game("alice", None).await.unwrap();
            engine.apply_guess(game.game_id, "g").await.unwrap();
            engine.apply_guess(game.game_id, "o").await.unwrap();
        }
        let cancelled = engine.start_game("alice", None).await.unwrap();
        engine.cancel_game(cancelled.game_id).await.unwrap();
        engine.cancel_game(cancelled.game_id).await.unwrap_err();
        engine.apply_guess(Uuid::new_v4(), "a").await.unwrap_err();

        assert!(engine.game_locks.is_empty());
    }

    #[tokio::test]
    async fn test_user_games_unknown_user() {
        let (engine, _store) = engine_with_word("go").await;
        engine.start_game("alice", None).await.unwrap();
        assert_eq!(engine.user_games("alice").await.unwrap().len(), 1);
        assert!(matches!(
            engine.user_games("nobody").await.unwrap_err(),
            GameError::NotFound(_)
        ));
    }
}

use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

/// One-way round lifecycle; a fresh round requires full re-initialization.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    Active,
    Over,
}

impl RoundPhase {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

impl Default for RoundPhase {
    fn default() -> Self {
        Self::Active
    }
}

/// Score, countdown and special-action budgets for one timed round.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    score: Score,
    time_left: u32,
    bombs_left: CellCount,
    mixes_left: CellCount,
    phase: RoundPhase,
}

impl RoundState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            time_left: config.time_limit_secs,
            bombs_left: config.bombs,
            mixes_left: config.mixes,
            phase: Default::default(),
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn bombs_left(&self) -> CellCount {
        self.bombs_left
    }

    pub fn mixes_left(&self) -> CellCount {
        self.mixes_left
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub(crate) fn check_active(&self) -> Result<()> {
        if self.phase.is_over() {
            Err(GameError::RoundOver)
        } else {
            Ok(())
        }
    }

    pub(crate) fn award(&mut self, points: Score) {
        self.score = self.score.saturating_add(points);
    }

    pub(crate) fn spend_bomb(&mut self) -> Result<()> {
        if self.bombs_left == 0 {
            return Err(GameError::BudgetExhausted);
        }
        self.bombs_left -= 1;
        Ok(())
    }

    pub(crate) fn spend_mix(&mut self) -> Result<()> {
        if self.mixes_left == 0 {
            return Err(GameError::BudgetExhausted);
        }
        self.mixes_left -= 1;
        Ok(())
    }
}

/// Outcome of one timer tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Running,
    /// The countdown just hit zero; emitted exactly once per round.
    Expired,
    AlreadyOver,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        use TickOutcome::*;
        match self {
            Running => true,
            Expired => true,
            AlreadyOver => false,
        }
    }
}

/// Outcome of a score submission attempt.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Sent,
    AlreadySent,
}

impl SubmitOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Sent => true,
            Self::AlreadySent => false,
        }
    }
}

/// Payload handed to the score-submission collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub username: String,
    pub level: u32,
    pub score: Score,
}

/// Source of the player identity (the Telegram bridge in production).
pub trait IdentitySource {
    fn username(&self) -> Option<&str>;
}

/// Backend collaborator accepting the final score of a round. A failing
/// sink should report [`GameError::SubmissionFailed`]; the round stays
/// over either way and the submission may be retried by the user.
pub trait ScoreSink {
    fn submit(&mut self, report: &ScoreReport) -> Result<()>;
}

/// Owns the round state, the board engine and the submission guard, and
/// funnels user input and timer ticks through one serialization point.
#[derive(Debug)]
pub struct Round {
    config: GameConfig,
    engine: BoardEngine,
    state: RoundState,
    submitted: bool,
}

impl Round {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let board = RandomBoardGenerator::new(seed, StartBoard::Unchecked).generate(&config);
        Self::from_board(config, board, seed)
    }

    pub fn from_board(config: GameConfig, board: Board, seed: u64) -> Self {
        // Decorrelate the refill stream from the generator stream.
        let engine_seed = seed ^ 0x9e37_79b9_7f4a_7c15;
        Self {
            config,
            engine: BoardEngine::new(board, &config, engine_seed),
            state: RoundState::new(&config),
            submitted: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn score(&self) -> Score {
        self.state.score()
    }

    pub fn is_over(&self) -> bool {
        self.state.phase().is_over()
    }

    pub fn propose_swap(&mut self, a: Coord2, b: Coord2) -> Result<SwapOutcome> {
        self.engine.propose_swap(&mut self.state, a, b)
    }

    pub fn use_bomb(&mut self, center: Coord2) -> Result<CellCount> {
        self.engine.use_bomb(&mut self.state, center)
    }

    pub fn mix_grid(&mut self) -> Result<()> {
        self.engine.mix_grid(&mut self.state)
    }

    pub fn step(&mut self) -> StepOutcome {
        self.engine.step(&mut self.state)
    }

    pub fn settle(&mut self) -> u32 {
        self.engine.settle(&mut self.state)
    }

    /// External 1-second countdown tick. The terminal transition fires
    /// once; late timer callbacks observe [`TickOutcome::AlreadyOver`].
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.phase.is_over() {
            return TickOutcome::AlreadyOver;
        }

        self.state.time_left = self.state.time_left.saturating_sub(1);
        if self.state.time_left == 0 {
            self.state.phase = RoundPhase::Over;
            log::debug!("round over, final score {}", self.state.score);
            TickOutcome::Expired
        } else {
            TickOutcome::Running
        }
    }

    /// Submits the final score exactly once. A failed attempt leaves the
    /// guard unset so the user can retry; success makes later calls
    /// harmless no-ops.
    pub fn submit_score<I, S>(&mut self, identity: &I, sink: &mut S) -> Result<SubmitOutcome>
    where
        I: IdentitySource + ?Sized,
        S: ScoreSink + ?Sized,
    {
        if !self.state.phase.is_over() {
            return Err(GameError::RoundActive);
        }
        if self.submitted {
            return Ok(SubmitOutcome::AlreadySent);
        }

        let username = identity.username().ok_or(GameError::MissingIdentity)?;
        let report = ScoreReport {
            username: String::from(username),
            level: self.config.level,
            score: self.state.score,
        };
        sink.submit(&report)?;
        self.submitted = true;
        Ok(SubmitOutcome::Sent)
    }

    /// Starts a fresh round from the same configuration: new board, full
    /// budgets and countdown, cleared submission guard.
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(self.config, seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    struct TelegramUser(Option<&'static str>);

    impl IdentitySource for TelegramUser {
        fn username(&self) -> Option<&str> {
            self.0
        }
    }

    struct RecordingSink {
        sent: Vec<ScoreReport>,
        failing: bool,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                sent: Vec::new(),
                failing: false,
            }
        }
    }

    impl ScoreSink for RecordingSink {
        fn submit(&mut self, report: &ScoreReport) -> Result<()> {
            if self.failing {
                return Err(GameError::SubmissionFailed);
            }
            self.sent.push(report.clone());
            Ok(())
        }
    }

    fn short_round(time_limit_secs: u32) -> Round {
        let config = GameConfig {
            time_limit_secs,
            ..GameConfig::default()
        };
        Round::new(config, 42)
    }

    #[test]
    fn countdown_expires_exactly_once() {
        let mut round = short_round(2);

        assert_eq!(round.tick(), TickOutcome::Running);
        assert_eq!(round.tick(), TickOutcome::Expired);
        assert_eq!(round.tick(), TickOutcome::AlreadyOver);
        assert!(!TickOutcome::AlreadyOver.has_update());
        assert!(round.is_over());
    }

    #[test]
    fn input_is_rejected_after_the_round_ends() {
        let mut round = short_round(1);
        round.tick();

        assert_eq!(round.propose_swap((0, 0), (0, 1)), Err(GameError::RoundOver));
        assert_eq!(round.use_bomb((4, 4)), Err(GameError::RoundOver));
        assert_eq!(round.mix_grid(), Err(GameError::RoundOver));
    }

    #[test]
    fn late_timer_fires_submit_only_once() {
        let mut round = short_round(1);
        let user = TelegramUser(Some("player_one"));
        let mut sink = RecordingSink::new();

        // The shell submits on every Expired; a late timer callback after
        // teardown must not produce a second report.
        for _ in 0..3 {
            if round.tick() == TickOutcome::Expired {
                round.submit_score(&user, &mut sink).unwrap();
            }
        }
        assert_eq!(
            round.submit_score(&user, &mut sink),
            Ok(SubmitOutcome::AlreadySent)
        );

        assert_eq!(sink.sent.len(), 1);
        assert_eq!(sink.sent[0].username, "player_one");
        assert_eq!(sink.sent[0].level, 1);
    }

    #[test]
    fn submission_requires_a_finished_round() {
        let mut round = short_round(60);
        let user = TelegramUser(Some("player_one"));
        let mut sink = RecordingSink::new();

        assert_eq!(
            round.submit_score(&user, &mut sink),
            Err(GameError::RoundActive)
        );
        assert!(sink.sent.is_empty());
    }

    #[test]
    fn missing_identity_fails_but_stays_retryable() {
        let mut round = short_round(1);
        round.tick();
        let mut sink = RecordingSink::new();

        assert_eq!(
            round.submit_score(&TelegramUser(None), &mut sink),
            Err(GameError::MissingIdentity)
        );
        assert_eq!(
            round.submit_score(&TelegramUser(Some("late_login")), &mut sink),
            Ok(SubmitOutcome::Sent)
        );
        assert_eq!(sink.sent.len(), 1);
    }

    #[test]
    fn failed_submission_keeps_the_round_over_and_retries() {
        let mut round = short_round(1);
        round.tick();
        let user = TelegramUser(Some("player_one"));
        let mut sink = RecordingSink::new();
        sink.failing = true;

        assert_eq!(
            round.submit_score(&user, &mut sink),
            Err(GameError::SubmissionFailed)
        );
        assert!(round.is_over());

        sink.failing = false;
        assert_eq!(
            round.submit_score(&user, &mut sink),
            Ok(SubmitOutcome::Sent)
        );
        assert_eq!(sink.sent.len(), 1);
    }

    #[test]
    fn reset_restores_a_fresh_active_round() {
        let mut round = short_round(1);
        round.tick();
        assert!(round.is_over());

        round.reset(77);

        assert!(!round.is_over());
        assert_eq!(round.score(), 0);
        assert_eq!(round.state().time_left(), 1);
        assert_eq!(round.state().bombs_left(), 100);
        assert_eq!(round.state().mixes_left(), 3);
    }

    #[test]
    fn zero_second_round_expires_on_first_tick() {
        let mut round = short_round(0);

        assert_eq!(round.tick(), TickOutcome::Expired);
    }

    #[test]
    fn state_and_board_snapshot_as_json_for_the_render_sink() {
        let round = short_round(60);

        let state = serde_json::to_string(round.state()).unwrap();
        assert!(state.contains("\"score\":0"));
        assert!(state.contains("\"time_left\":60"));

        let board: Board = serde_json::from_str(&serde_json::to_string(round.board()).unwrap()).unwrap();
        assert_eq!(&board, round.board());
    }
}

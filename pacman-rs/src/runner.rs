use pacman_minimax::{
    types::{
        AgentCountGettableGame, AgentIndex, ScoreGettableGame, SimulableGame,
        VictorDeterminableGame,
    },
    SearchAgent,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{GhostPolicy, Outcome, PacmanGame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameResult {
    Win,
    Lose,
    /// Ran out of moves before the game finished
    MoveLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcome {
    pub result: GameResult,
    pub score: f64,
    /// Full rounds played, pacman and then every ghost
    pub moves: usize,
}

/// Play a single game, `agent` moving pacman and `ghosts` moving every ghost
///
/// The game ends when it is won or lost, or after `max_moves` rounds.
#[tracing::instrument(
    level = "info",
    skip_all,
    fields(layout = game.layout().name(), agent = agent.name(), ghosts = %ghosts, result, score, moves)
)]
pub fn play_game<R: Rng + ?Sized>(
    game: PacmanGame,
    agent: &dyn SearchAgent<PacmanGame>,
    ghosts: GhostPolicy,
    rng: &mut R,
    max_moves: usize,
) -> GameOutcome {
    let current_span = tracing::Span::current();

    let mut game = game;
    let mut moves = 0;

    'game: while !game.is_over() && moves < max_moves {
        for index in 0..game.num_agents() {
            if game.is_over() {
                break;
            }

            let mover = AgentIndex(index);
            let action = if mover.is_player() {
                match agent.select_action(&game) {
                    Some(action) => action,
                    None => break 'game,
                }
            } else {
                match ghosts.choose(&game, mover, rng) {
                    Some(action) => action,
                    None => continue,
                }
            };

            debug!(agent = %mover, %action, "Moving");
            game = game.next_state(mover, action);
        }

        moves += 1;
        debug!(moves, score = game.score(), "Finished round");
    }

    let result = match game.outcome() {
        Some(Outcome::Win) => GameResult::Win,
        Some(Outcome::Lose) => GameResult::Lose,
        None => GameResult::MoveLimit,
    };

    current_span.record("result", format!("{result:?}").as_str());
    current_span.record("score", game.score());
    current_span.record("moves", moves);
    info!("Game over");

    GameOutcome {
        result,
        score: game.score(),
        moves,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub games: usize,
    pub wins: usize,
    pub average_score: f64,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[GameOutcome]) -> Self {
        let games = outcomes.len();
        let wins = outcomes
            .iter()
            .filter(|o| o.result == GameResult::Win)
            .count();
        let average_score = if games == 0 {
            0.0
        } else {
            outcomes.iter().map(|o| o.score).sum::<f64>() / games as f64
        };

        Self {
            games,
            wins,
            average_score,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

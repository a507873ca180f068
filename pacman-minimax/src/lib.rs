#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements adversarial tree search for turn based pursuit games. You provide a
//! 'scoring' function that turns a given game state into a [decorum::N64], and one of the search
//! agents picks the next move for the player.
//!
//! Three searches are provided, all sharing the same game traits from [types]:
//!
//! - [MinimaxAgent] explores the full tree, maximizing for the player and minimizing for every
//!   adversary
//! - [AlphaBetaAgent] returns the same move as [MinimaxAgent] but prunes branches that can't
//!   change the outcome
//! - [ExpectimaxAgent] treats every adversary as picking uniformly at random between its legal
//!   actions
//!
//! ```rust
//! use decorum::N64;
//! use pacman_minimax::{AgentConfig, EvaluationRegistry, SearchAgent, SearchStrategy};
//! # use pacman_minimax::types::*;
//! # #[derive(Debug, Clone)]
//! # struct Countdown(u8);
//! # impl AgentCountGettableGame for Countdown { fn num_agents(&self) -> usize { 2 } }
//! # impl VictorDeterminableGame for Countdown {
//! #     fn is_win(&self) -> bool { self.0 == 0 }
//! #     fn is_lose(&self) -> bool { false }
//! # }
//! # impl ScoreGettableGame for Countdown { fn score(&self) -> f64 { -(self.0 as f64) } }
//! # impl SimulableGame for Countdown {
//! #     type Action = u8;
//! #     fn legal_actions(&self, _agent: AgentIndex) -> Vec<u8> { vec![0, 1] }
//! #     fn next_state(&self, _agent: AgentIndex, action: u8) -> Self {
//! #         Countdown(self.0.saturating_sub(action))
//! #     }
//! # }
//!
//! fn score_function(game: &Countdown) -> N64 {
//!     N64::from(game.score())
//! }
//!
//! let mut registry = EvaluationRegistry::<Countdown>::new();
//! registry.register("scoreEvaluationFunction", &score_function);
//!
//! let config: AgentConfig = "evalFn=scoreEvaluationFunction,depth=2".parse().unwrap();
//! let agent = SearchStrategy::AlphaBeta.build(&config, &registry).unwrap();
//!
//! assert_eq!(agent.select_action(&Countdown(3)), Some(1));
//! ```

pub mod types;

mod score;
pub use score::{CountedScore, Scorable};

mod search_return;
pub use search_return::{NodeKind, SearchReport, SearchReturn};

mod config;
pub use config::{AgentConfig, AgentOptions, ConfigError};

mod registry;
pub use registry::{EvaluationFn, EvaluationRegistry};

mod agent;
pub use agent::{BoxedAgent, SearchAgent, SearchStrategy};

mod search;
pub use search::{AlphaBetaAgent, ExpectimaxAgent, MinimaxAgent};

#[cfg(test)]
mod stub;

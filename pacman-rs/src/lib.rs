//! Pacman, played on the classic text layouts, as a game for the searches in [pacman_minimax]
//!
//! ```
//! use pacman_minimax::{AgentConfig, SearchAgent, SearchStrategy};
//! use pacman_rs::{evaluation_registry, Direction, Layout, PacmanGame};
//!
//! let game = PacmanGame::new(Layout::parse("corridor", "%%%%%%\n%.P G%\n%%%%%%").unwrap());
//! let config: AgentConfig = "evalFn=score,depth=2".parse().unwrap();
//! let agent = SearchStrategy::AlphaBeta
//!     .build(&config, &evaluation_registry())
//!     .unwrap();
//!
//! assert_eq!(agent.select_action(&game), Some(Direction::West));
//! ```

mod direction;
pub use direction::{Direction, Position, UnknownDirection};

mod layout;
pub use layout::{Layout, LayoutError};

pub mod game;
pub use game::{GhostState, Outcome, PacmanGame};

mod eval;
pub use eval::{better_evaluation, evaluation_registry, score_evaluation};

mod ghosts;
pub use ghosts::{GhostPolicy, UnknownGhostPolicy, DIRECTIONAL_PROBABILITY};

mod runner;
pub use runner::{play_game, GameOutcome, GameResult, Summary};

use std::{fmt, str::FromStr};

use crate::{
    types::SearchableGame, AgentConfig, AgentOptions, AlphaBetaAgent, ConfigError,
    EvaluationRegistry, ExpectimaxAgent, MinimaxAgent, SearchReport,
};

/// Something that picks the player's next move by searching the game tree
pub trait SearchAgent<GameType: SearchableGame> {
    /// A human readable name, used in traces
    fn name(&self) -> &'static str;

    /// The options this agent was built with
    fn options(&self) -> &AgentOptions;

    /// Run a full search from `game`, returning the explored tree
    fn search(&self, game: &GameType) -> SearchReport<GameType::Action>;

    /// Pick the next move to make
    ///
    /// Returns None when the player has nothing to choose from, either because `game` is
    /// already over or because the player has no legal actions
    fn select_action(&self, game: &GameType) -> Option<GameType::Action> {
        self.search(game).best_action()
    }
}

/// A search agent that can be passed between threads
pub type BoxedAgent<GameType> = Box<dyn SearchAgent<GameType> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The search algorithms an agent can be built with
pub enum SearchStrategy {
    /// Full minimax, see [MinimaxAgent]
    Minimax,
    /// Minimax with alpha-beta pruning, see [AlphaBetaAgent]
    AlphaBeta,
    /// Expectimax with uniformly random adversaries, see [ExpectimaxAgent]
    Expectimax,
}

impl SearchStrategy {
    /// Every strategy, in the order they are usually listed
    pub const ALL: [SearchStrategy; 3] = [
        SearchStrategy::Minimax,
        SearchStrategy::AlphaBeta,
        SearchStrategy::Expectimax,
    ];

    /// The canonical name of this strategy
    pub fn name(self) -> &'static str {
        match self {
            SearchStrategy::Minimax => "minimax",
            SearchStrategy::AlphaBeta => "alphabeta",
            SearchStrategy::Expectimax => "expectimax",
        }
    }

    /// Build an agent with this strategy
    ///
    /// The evaluation function is looked up by name in `registry`, and the depth is validated.
    /// Either failing rejects the construction.
    pub fn build<GameType>(
        self,
        config: &AgentConfig,
        registry: &EvaluationRegistry<GameType>,
    ) -> Result<BoxedAgent<GameType>, ConfigError>
    where
        GameType: SearchableGame + 'static,
    {
        let score_function = registry.get(&config.evaluation_function)?;
        let options = config.options()?;

        let agent: BoxedAgent<GameType> = match self {
            SearchStrategy::Minimax => Box::new(MinimaxAgent::new(
                score_function,
                options,
                self.name(),
            )),
            SearchStrategy::AlphaBeta => Box::new(AlphaBetaAgent::new(
                score_function,
                options,
                self.name(),
            )),
            SearchStrategy::Expectimax => Box::new(ExpectimaxAgent::new(
                score_function,
                options,
                self.name(),
            )),
        };

        Ok(agent)
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SearchStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimax" | "MinimaxAgent" => Ok(SearchStrategy::Minimax),
            "alphabeta" | "alpha-beta" | "AlphaBetaAgent" => Ok(SearchStrategy::AlphaBeta),
            "expectimax" | "ExpectimaxAgent" => Ok(SearchStrategy::Expectimax),
            other => Err(ConfigError::UnknownStrategy(other.to_owned())),
        }
    }
}

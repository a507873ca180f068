//! The traits a game needs to implement to be searched
//!
//! Each trait covers one capability so that scoring functions can ask for only what they use.
//! [SearchableGame] is implemented for anything that has all of them.

use std::fmt::{self, Debug, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// Identifies an agent taking part in the game
///
/// Index 0 is always the player we are searching for. Every other index is an adversary, and
/// adversaries move in increasing index order after the player.
pub struct AgentIndex(pub usize);

impl AgentIndex {
    /// The maximizing player
    pub const PLAYER: AgentIndex = AgentIndex(0);

    /// Is this the maximizing player
    pub fn is_player(self) -> bool {
        self == Self::PLAYER
    }

    /// Returns the agent that moves after this one, along with whether that wraps around back to
    /// the player. A wrap means a full ply has been played.
    ///
    /// ```
    /// use pacman_minimax::types::AgentIndex;
    ///
    /// assert_eq!(AgentIndex(0).next(3), (AgentIndex(1), false));
    /// assert_eq!(AgentIndex(2).next(3), (AgentIndex(0), true));
    /// ```
    pub fn next(self, num_agents: usize) -> (AgentIndex, bool) {
        let next = self.0 + 1;

        if next >= num_agents {
            (Self::PLAYER, true)
        } else {
            (AgentIndex(next), false)
        }
    }
}

impl Display for AgentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_player() {
            write!(f, "player")
        } else {
            write!(f, "adversary {}", self.0)
        }
    }
}

/// A game that knows how many agents are taking turns
pub trait AgentCountGettableGame {
    /// The number of agents, including the player
    fn num_agents(&self) -> usize;
}

/// A game that can tell if it has been won or lost
pub trait VictorDeterminableGame {
    /// Has the player won
    fn is_win(&self) -> bool;

    /// Has the player lost
    fn is_lose(&self) -> bool;

    /// Is this a terminal state
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// A game with a running score
pub trait ScoreGettableGame {
    /// The raw score of this state
    fn score(&self) -> f64;
}

/// A game that can produce successor states
///
/// States are never mutated by the search, every transition returns a new value.
pub trait SimulableGame: Sized {
    /// The moves agents can make
    type Action: Copy + PartialEq + Debug;

    /// All the actions the given agent can take from this state
    ///
    /// Terminal states are expected to return an empty list
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// The state that results from the given agent taking `action`
    fn next_state(&self, agent: AgentIndex, action: Self::Action) -> Self;
}

/// Everything the search agents need from a game
pub trait SearchableGame:
    AgentCountGettableGame + VictorDeterminableGame + ScoreGettableGame + SimulableGame + Clone
{
}

impl<T> SearchableGame for T where
    T: AgentCountGettableGame + VictorDeterminableGame + ScoreGettableGame + SimulableGame + Clone
{
}

use std::{fmt, str::FromStr};

use itertools::Itertools;
use pacman_minimax::types::{AgentIndex, SimulableGame};
use rand::{
    distributions::{Distribution, WeightedIndex},
    seq::SliceRandom,
    Rng,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Direction, PacmanGame};

/// How often a directional ghost makes its preferred move
pub const DIRECTIONAL_PROBABILITY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// How the ghosts pick their moves when actually playing a game
pub enum GhostPolicy {
    /// Uniformly random between the legal moves
    Random,
    /// Heads for pacman, or away from it while scared, most of the time
    Directional,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown ghost policy `{0}`, expected `random` or `directional`")]
pub struct UnknownGhostPolicy(String);

impl GhostPolicy {
    pub fn name(self) -> &'static str {
        match self {
            GhostPolicy::Random => "random",
            GhostPolicy::Directional => "directional",
        }
    }

    /// Pick a move for the ghost moving as `agent`, or `None` when it has none
    pub fn choose<R: Rng + ?Sized>(
        self,
        game: &PacmanGame,
        agent: AgentIndex,
        rng: &mut R,
    ) -> Option<Direction> {
        let actions = game.legal_actions(agent);

        match self {
            GhostPolicy::Random => actions.choose(rng).copied(),
            GhostPolicy::Directional => {
                let ghost = game.ghost(agent);
                let pacman = game.pacman_position();

                let distances = actions
                    .iter()
                    .map(|a| ghost.position.step(*a).manhattan_distance(pacman))
                    .collect_vec();
                let best = if ghost.is_scared() {
                    distances.iter().max()
                } else {
                    distances.iter().min()
                }
                .copied()?;
                let best_count = distances.iter().filter(|d| **d == best).count();

                let weights = distances.iter().map(|d| {
                    let mut weight = (1.0 - DIRECTIONAL_PROBABILITY) / actions.len() as f64;
                    if *d == best {
                        weight += DIRECTIONAL_PROBABILITY / best_count as f64;
                    }
                    weight
                });

                let distribution = WeightedIndex::new(weights).ok()?;
                Some(actions[distribution.sample(rng)])
            }
        }
    }
}

impl fmt::Display for GhostPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GhostPolicy {
    type Err = UnknownGhostPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" | "RandomGhost" => Ok(GhostPolicy::Random),
            "directional" | "DirectionalGhost" => Ok(GhostPolicy::Directional),
            other => Err(UnknownGhostPolicy(other.to_owned())),
        }
    }
}

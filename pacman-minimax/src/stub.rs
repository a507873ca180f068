//! A hand built game tree used to test the searches
//!
//! Every node lists its children explicitly and the action for a child is its index. The tree
//! doesn't care which agent is moving, so tests lay out levels in turn order themselves.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::types::*;

#[derive(Debug, Clone)]
pub(crate) struct StubGame {
    pub num_agents: usize,
    pub value: f64,
    pub terminal: bool,
    pub children: Vec<StubGame>,
}

/// A node without children, scored as `value`
pub(crate) fn leaf(value: f64) -> StubGame {
    StubGame {
        num_agents: 2,
        value,
        terminal: false,
        children: vec![],
    }
}

/// An interior node, scored as 0 if the search ever stops on it
pub(crate) fn node(children: Vec<StubGame>) -> StubGame {
    StubGame {
        num_agents: 2,
        value: 0.0,
        terminal: false,
        children,
    }
}

impl StubGame {
    /// Set the number of agents for this node and everything below it
    pub fn agents(mut self, num_agents: usize) -> Self {
        self.num_agents = num_agents;
        self.children = self
            .children
            .into_iter()
            .map(|c| c.agents(num_agents))
            .collect();
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// A complete tree where every interior node has `branching` children and every node is
    /// valued by how many levels below the root it is
    pub fn uniform(branching: usize, levels: usize, num_agents: usize) -> Self {
        fn build(branching: usize, level: usize, levels: usize) -> StubGame {
            let children = if level == levels {
                vec![]
            } else {
                (0..branching)
                    .map(|_| build(branching, level + 1, levels))
                    .collect()
            };

            node(children).with_value(level as f64)
        }

        build(branching, 0, levels).agents(num_agents)
    }

    /// A complete tree of `levels` levels with between one and `max_branching` children per node,
    /// and leaf values drawn from a small range so that ties are common
    pub fn random(seed: u64, max_branching: usize, levels: usize, num_agents: usize) -> Self {
        fn build(rng: &mut StdRng, max_branching: usize, levels: usize) -> StubGame {
            if levels == 0 {
                return leaf(rng.gen_range(-5..=5) as f64);
            }

            let branching = rng.gen_range(1..=max_branching);
            node(
                (0..branching)
                    .map(|_| build(rng, max_branching, levels - 1))
                    .collect(),
            )
        }

        let mut rng = StdRng::seed_from_u64(seed);
        build(&mut rng, max_branching, levels).agents(num_agents)
    }
}

impl AgentCountGettableGame for StubGame {
    fn num_agents(&self) -> usize {
        self.num_agents
    }
}

impl VictorDeterminableGame for StubGame {
    fn is_win(&self) -> bool {
        self.terminal
    }

    fn is_lose(&self) -> bool {
        false
    }
}

impl ScoreGettableGame for StubGame {
    fn score(&self) -> f64 {
        self.value
    }
}

impl SimulableGame for StubGame {
    type Action = usize;

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<usize> {
        (0..self.children.len()).collect()
    }

    fn next_state(&self, _agent: AgentIndex, action: usize) -> Self {
        self.children[action].clone()
    }
}

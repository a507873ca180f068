use std::{cmp::Reverse, fmt::Debug};

use decorum::N64;
use text_trees::StringTreeNode;
use tracing::Span;

use crate::types::AgentIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a node in the search tree combined the scores of its children
pub enum NodeKind {
    /// The player picked the highest score
    Max,
    /// An adversary picked the lowest score
    Min,
    /// An adversary moved at random, the score is the average of the children
    Chance,
}

#[derive(Debug, Clone)]
/// This is returned from a search
/// It contains all the information we generated about the game tree
pub enum SearchReturn<Action> {
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen score
    Node {
        /// How the score of this node was chosen
        kind: NodeKind,
        /// Which agent was moving at this node
        moving_agent: AgentIndex,
        /// A 'recursive' look at all the moves under us
        ///
        /// For [NodeKind::Max] nodes this is sorted best first and for [NodeKind::Min] nodes
        /// worst first. Ties keep the order the actions were explored in, so the first element is
        /// always the first action that achieved the chosen score. [NodeKind::Chance] nodes keep
        /// the order of the legal actions.
        options: Vec<(Action, Self)>,
        /// The chosen score
        score: N64,
        /// Whether alpha-beta stopped exploring this node's actions early
        pruned: bool,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach a terminal state (win/lose), the depth limit, or an agent with
    /// no legal actions
    Leaf {
        #[allow(missing_docs)]
        score: N64,
    },
}

impl<Action> SearchReturn<Action>
where
    Action: Copy + PartialEq + Debug,
{
    /// Build a Max or Min node from the explored options
    ///
    /// `options` must not be empty, callers turn action-less states into leaves
    pub(crate) fn decided(
        kind: NodeKind,
        moving_agent: AgentIndex,
        mut options: Vec<(Action, Self)>,
        pruned: bool,
    ) -> Self {
        debug_assert!(!options.is_empty());

        // Both sorts are stable, which keeps the first encountered best action at the front
        match kind {
            NodeKind::Max => options.sort_by_key(|(_, r)| Reverse(*r.score())),
            NodeKind::Min => options.sort_by_key(|(_, r)| *r.score()),
            NodeKind::Chance => {}
        }

        let score = *options[0].1.score();

        SearchReturn::Node {
            kind,
            moving_agent,
            options,
            score,
            pruned,
        }
    }

    /// Build a chance node whose score is the mean of its children
    ///
    /// `options` must not be empty, callers turn action-less states into leaves
    pub(crate) fn chance(moving_agent: AgentIndex, options: Vec<(Action, Self)>) -> Self {
        debug_assert!(!options.is_empty());

        let total = options
            .iter()
            .fold(N64::from(0.0), |total, (_, r)| total + *r.score());
        let score = total / N64::from(options.len() as f64);

        SearchReturn::Node {
            kind: NodeKind::Chance,
            moving_agent,
            options,
            score,
            pruned: false,
        }
    }

    /// Returns the score for this node
    pub fn score(&self) -> &N64 {
        match self {
            SearchReturn::Node { score, .. } => score,
            SearchReturn::Leaf { score } => score,
        }
    }

    /// Returns the action the moving agent chose at this node
    ///
    /// Leaves and chance nodes don't choose, so they return None
    pub fn best_action(&self) -> Option<Action> {
        match self {
            SearchReturn::Node {
                kind: NodeKind::Max | NodeKind::Min,
                options,
                ..
            } => options.first().map(|x| x.0),
            _ => None,
        }
    }

    /// Returns all the moves in the 'route' through the game tree that the search expects to be
    /// played. The route stops at the first leaf or chance node.
    ///
    /// This is useful for debugging as it shows each of the moves we and our adversaries made
    /// during the search
    pub fn chosen_route(&self) -> Vec<(AgentIndex, Action)> {
        match self {
            SearchReturn::Node {
                kind: NodeKind::Max | NodeKind::Min,
                moving_agent,
                options,
                ..
            } => {
                if let Some(chosen) = options.first() {
                    let mut tail = chosen.1.chosen_route();
                    tail.insert(0, (*moving_agent, chosen.0));
                    tail
                } else {
                    vec![]
                }
            }
            _ => vec![],
        }
    }

    /// The number of nodes in this tree, leaves included
    pub fn node_count(&self) -> usize {
        match self {
            SearchReturn::Leaf { .. } => 1,
            SearchReturn::Node { options, .. } => {
                1 + options.iter().map(|(_, r)| r.node_count()).sum::<usize>()
            }
        }
    }

    /// The number of leaves in this tree
    pub fn leaf_count(&self) -> usize {
        match self {
            SearchReturn::Leaf { .. } => 1,
            SearchReturn::Node { options, .. } => {
                options.iter().map(|(_, r)| r.leaf_count()).sum::<usize>()
            }
        }
    }

    /// This returns a visual representation of the game tree that the search generated
    /// It shows the chosen score, the moving agent and the chosen move at each level
    pub fn to_text_tree(&self) -> String {
        let tree_node = self.to_text_tree_node("root".to_owned());
        format!("{}", tree_node)
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            SearchReturn::Leaf { score } => {
                StringTreeNode::new(format!("{} {}", label, score.into_inner()))
            }
            SearchReturn::Node {
                kind,
                moving_agent,
                options,
                score,
                pruned,
            } => {
                let pruned = if *pruned { " (pruned)" } else { "" };
                let mut node = StringTreeNode::new(format!(
                    "{} {:?} {}{}",
                    label,
                    kind,
                    score.into_inner(),
                    pruned
                ));
                for (m, result) in options {
                    node.push_node(result.to_text_tree_node(format!("{} {:?}", moving_agent, m)));
                }

                node
            }
        }
    }
}

#[derive(Debug, Clone)]
/// Everything a single search produced
pub struct SearchReport<Action> {
    /// The explored game tree
    pub tree: SearchReturn<Action>,
    /// How many times the scoring function was called
    pub evaluations: usize,
}

impl<Action> SearchReport<Action>
where
    Action: Copy + PartialEq + Debug,
{
    /// The action the player should take, None if the player had nothing to choose from
    pub fn best_action(&self) -> Option<Action> {
        self.tree.best_action()
    }

    /// The value of the root of the tree
    pub fn score(&self) -> N64 {
        *self.tree.score()
    }

    /// Fill in the result fields of the given span
    pub(crate) fn record(&self, span: &Span) {
        span.record("chosen_score", self.score().into_inner());
        span.record(
            "chosen_action",
            format!("{:?}", self.best_action()).as_str(),
        );
        span.record("evaluations", self.evaluations);
    }
}

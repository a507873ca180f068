use std::{cmp, marker::PhantomData};

use decorum::{Infinite, N64};
use derivative::Derivative;
use tracing::{info_span, warn};

use crate::{
    types::{AgentIndex, SearchableGame},
    AgentOptions, CountedScore, NodeKind, Scorable, SearchAgent, SearchReport, SearchReturn,
};

use super::cutoff_score;

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = ""))]
/// Minimax with Alpha-Beta pruning
///
/// This always picks the same action as [crate::MinimaxAgent] for the same game and depth, but
/// stops exploring a node as soon as it is clear the node can't affect the decision above it.
/// Pruning uses strict comparisons against the opposing bound so that ties are still resolved
/// the same way as full minimax, in favor of the first action explored.
///
/// Actions are explored in the order the game returns them, no reordering is done.
pub struct AlphaBetaAgent<GameType, ScorableType> {
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: AgentOptions,
    name: &'static str,
    #[derivative(Debug = "ignore")]
    _phantom: PhantomData<fn(&GameType)>,
}

impl<GameType, ScorableType> AlphaBetaAgent<GameType, ScorableType>
where
    GameType: SearchableGame,
    ScorableType: Scorable<GameType>,
{
    /// Construct a new `AlphaBetaAgent`
    pub fn new(score_function: ScorableType, options: AgentOptions, name: &'static str) -> Self {
        Self {
            score_function,
            options,
            name,
            _phantom: PhantomData,
        }
    }

    /// `alpha` is the best score the player can already guarantee on the path to the root,
    /// `beta` the best score the adversaries can already guarantee
    fn alpha_beta(
        &self,
        scorer: &CountedScore<'_, ScorableType>,
        node: &GameType,
        agent: AgentIndex,
        depth: usize,
        alpha: N64,
        beta: N64,
    ) -> SearchReturn<GameType::Action> {
        let mut alpha = alpha;
        let mut beta = beta;

        if let Some(score) = cutoff_score(scorer, node, depth, &self.options) {
            return SearchReturn::Leaf { score };
        }

        let actions = node.legal_actions(agent);
        if actions.is_empty() {
            return SearchReturn::Leaf {
                score: scorer.score(node),
            };
        }

        let (next_agent, ply_complete) = agent.next(node.num_agents());
        let next_depth = if ply_complete { depth + 1 } else { depth };

        let is_maximizing = agent.is_player();
        let mut best = if is_maximizing {
            N64::NEG_INFINITY
        } else {
            N64::INFINITY
        };

        let mut options = Vec::with_capacity(actions.len());
        let mut alpha_beta_cutoff = false;

        for action in actions {
            let child = node.next_state(agent, action);
            let next_return =
                self.alpha_beta(scorer, &child, next_agent, next_depth, alpha, beta);
            let value = *next_return.score();
            options.push((action, next_return));

            if is_maximizing {
                best = cmp::max(best, value);
                alpha = cmp::max(alpha, best);

                if best > beta {
                    alpha_beta_cutoff = true;
                    break;
                }
            } else {
                best = cmp::min(best, value);
                beta = cmp::min(beta, best);

                if best < alpha {
                    alpha_beta_cutoff = true;
                    break;
                }
            }
        }

        let kind = if is_maximizing {
            NodeKind::Max
        } else {
            NodeKind::Min
        };

        SearchReturn::decided(kind, agent, options, alpha_beta_cutoff)
    }
}

impl<GameType, ScorableType> SearchAgent<GameType> for AlphaBetaAgent<GameType, ScorableType>
where
    GameType: SearchableGame,
    ScorableType: Scorable<GameType>,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn options(&self) -> &AgentOptions {
        &self.options
    }

    fn search(&self, game: &GameType) -> SearchReport<GameType::Action> {
        info_span!(
            "alpha_beta",
            agent_name = self.name,
            depth = self.options.depth(),
            num_agents = game.num_agents(),
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
            evaluations = tracing::field::Empty,
        )
        .in_scope(|| {
            let scorer = CountedScore::new(&self.score_function);
            let tree = self.alpha_beta(
                &scorer,
                game,
                AgentIndex::PLAYER,
                0,
                N64::NEG_INFINITY,
                N64::INFINITY,
            );

            let report = SearchReport {
                tree,
                evaluations: scorer.calls(),
            };

            if report.best_action().is_none() {
                warn!("The player had no action to choose from");
            }
            report.record(&tracing::Span::current());

            report
        })
    }
}

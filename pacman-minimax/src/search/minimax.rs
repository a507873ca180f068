use std::marker::PhantomData;

use derivative::Derivative;
use itertools::Itertools;
use tracing::{info_span, warn};

use crate::{
    types::{AgentIndex, SearchableGame},
    AgentOptions, CountedScore, NodeKind, Scorable, SearchAgent, SearchReport,
    SearchReturn,
};

use super::cutoff_score;

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = ""))]
/// This is the struct that wraps a scoring function and can be used to run full minimax
///
/// The player maximizes the score and every adversary minimizes it. Every legal action is
/// explored down to the depth limit, see [crate::AlphaBetaAgent] for a version that skips
/// branches which can't change the result.
///
/// It also outputs traces using the [tracing] crate.
pub struct MinimaxAgent<GameType, ScorableType> {
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: AgentOptions,
    name: &'static str,
    #[derivative(Debug = "ignore")]
    _phantom: PhantomData<fn(&GameType)>,
}

impl<GameType, ScorableType> MinimaxAgent<GameType, ScorableType>
where
    GameType: SearchableGame,
    ScorableType: Scorable<GameType>,
{
    /// Construct a new `MinimaxAgent`
    pub fn new(score_function: ScorableType, options: AgentOptions, name: &'static str) -> Self {
        Self {
            score_function,
            options,
            name,
            _phantom: PhantomData,
        }
    }

    fn minimax(
        &self,
        scorer: &CountedScore<'_, ScorableType>,
        node: &GameType,
        agent: AgentIndex,
        depth: usize,
    ) -> SearchReturn<GameType::Action> {
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

        let options = actions
            .into_iter()
            .map(|action| {
                let child = node.next_state(agent, action);
                (action, self.minimax(scorer, &child, next_agent, next_depth))
            })
            .collect_vec();

        let kind = if agent.is_player() {
            NodeKind::Max
        } else {
            NodeKind::Min
        };

        SearchReturn::decided(kind, agent, options, false)
    }
}

impl<GameType, ScorableType> SearchAgent<GameType> for MinimaxAgent<GameType, ScorableType>
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
            "minimax",
            agent_name = self.name,
            depth = self.options.depth(),
            num_agents = game.num_agents(),
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
            evaluations = tracing::field::Empty,
        )
        .in_scope(|| {
            let scorer = CountedScore::new(&self.score_function);
            let tree = self.minimax(&scorer, game, AgentIndex::PLAYER, 0);

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

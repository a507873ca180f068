use std::marker::PhantomData;

use derivative::Derivative;
use itertools::Itertools;
use tracing::{info_span, warn};

use crate::{
    types::{AgentIndex, SearchableGame},
    AgentOptions, CountedScore, NodeKind, Scorable, SearchAgent, SearchReport, SearchReturn,
};

use super::cutoff_score;

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = ""))]
/// Expectimax search
///
/// The player still maximizes, but every adversary is modeled as picking uniformly at random
/// between its legal actions. Adversary nodes score as the mean of their children, so this agent
/// will take risks that [crate::MinimaxAgent] would avoid when the risky branch pays off on
/// average.
pub struct ExpectimaxAgent<GameType, ScorableType> {
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: AgentOptions,
    name: &'static str,
    #[derivative(Debug = "ignore")]
    _phantom: PhantomData<fn(&GameType)>,
}

impl<GameType, ScorableType> ExpectimaxAgent<GameType, ScorableType>
where
    GameType: SearchableGame,
    ScorableType: Scorable<GameType>,
{
    /// Construct a new `ExpectimaxAgent`
    pub fn new(score_function: ScorableType, options: AgentOptions, name: &'static str) -> Self {
        Self {
            score_function,
            options,
            name,
            _phantom: PhantomData,
        }
    }

    fn expectimax(
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
                (action, self.expectimax(scorer, &child, next_agent, next_depth))
            })
            .collect_vec();

        if agent.is_player() {
            SearchReturn::decided(NodeKind::Max, agent, options, false)
        } else {
            SearchReturn::chance(agent, options)
        }
    }
}

impl<GameType, ScorableType> SearchAgent<GameType> for ExpectimaxAgent<GameType, ScorableType>
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
            "expectimax",
            agent_name = self.name,
            depth = self.options.depth(),
            num_agents = game.num_agents(),
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
            evaluations = tracing::field::Empty,
        )
        .in_scope(|| {
            let scorer = CountedScore::new(&self.score_function);
            let tree = self.expectimax(&scorer, game, AgentIndex::PLAYER, 0);

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

#[cfg(test)]
mod tests {
    use decorum::N64;

    use super::*;
    use crate::{
        stub::{leaf, node, StubGame},
        MinimaxAgent,
    };

    fn stub_value(game: &StubGame) -> N64 {
        N64::from(game.value)
    }

    fn agent(depth: i64) -> ExpectimaxAgent<StubGame, fn(&StubGame) -> N64> {
        ExpectimaxAgent::new(stub_value, AgentOptions::new(depth).unwrap(), "expectimax")
    }

    #[test]
    fn test_chance_node_is_exact_mean() {
        let values = [0.1, -7.25, 1.0 / 3.0, 12.5, 2.2];

        for k in [1, 2, 3, 5] {
            let children = &values[..k];
            let game = node(vec![node(children.iter().map(|v| leaf(*v)).collect())]);

            let report = agent(1).search(&game);

            let expected = children.iter().fold(0.0, |total, v| total + v) / k as f64;
            assert_eq!(report.score().into_inner(), expected, "k = {k}");
            assert_eq!(report.evaluations, k);
        }
    }

    #[test]
    fn test_integer_scores_average_to_fractions() {
        let game = node(vec![node(vec![leaf(1.0), leaf(2.0)])]);

        assert_eq!(agent(1).search(&game).score(), N64::from(1.5));
    }

    #[test]
    fn test_differs_from_minimax_on_risky_branch() {
        // Left is safe, the ghost can only hold us to 4 and on average we get 4.5.
        // Right risks a 0 but averages 6, so expectimax gambles while minimax plays it safe.
        let game = node(vec![
            node(vec![
                node(vec![node(vec![leaf(4.0)])]),
                node(vec![node(vec![leaf(5.0)])]),
            ]),
            node(vec![
                node(vec![node(vec![leaf(0.0)])]),
                node(vec![node(vec![leaf(12.0)])]),
            ]),
        ]);

        let minimax = MinimaxAgent::new(stub_value, AgentOptions::new(2).unwrap(), "minimax");
        let minimax_report = minimax.search(&game);
        let expectimax_report = agent(2).search(&game);

        assert_eq!(minimax_report.best_action(), Some(0));
        assert_eq!(minimax_report.score(), N64::from(4.0));

        assert_eq!(expectimax_report.best_action(), Some(1));
        assert_eq!(expectimax_report.score(), N64::from(6.0));
    }

    #[test]
    fn test_multiple_ghosts_average_in_turn() {
        // Ghost one averages over ghost two, which averages over its own moves
        let game = node(vec![node(vec![
            node(vec![leaf(2.0), leaf(4.0)]),
            node(vec![leaf(9.0)]),
        ])])
        .agents(3);

        let report = agent(1).search(&game);

        assert_eq!(report.score(), N64::from((3.0 + 9.0) / 2.0));
        assert_eq!(report.tree.chosen_route(), vec![(AgentIndex::PLAYER, 0)]);
    }
}

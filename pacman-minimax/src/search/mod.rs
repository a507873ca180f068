//! The three searches share the same shape. They recurse over `(agent, depth, state)` with the
//! player at index 0 moving first and every adversary following in index order. Depth counts
//! full plies, so it only goes up when the last adversary has moved.
//!
//! A state is scored with the evaluation function, instead of being expanded, when it is a win or
//! a loss, when the depth limit is reached, or when the moving agent has no legal actions.
//!
//! No state is ever cached or revisited, each call to `search` walks a fresh tree.

use decorum::N64;

use crate::{types::SearchableGame, AgentOptions, Scorable};

mod alpha_beta;
pub use alpha_beta::AlphaBetaAgent;

mod expectimax;
pub use expectimax::ExpectimaxAgent;

mod minimax;
pub use minimax::MinimaxAgent;

/// Returns the static score of `node` if the search should stop here
fn cutoff_score<GameType, ScorableType>(
    scorer: &ScorableType,
    node: &GameType,
    depth: usize,
    options: &AgentOptions,
) -> Option<N64>
where
    GameType: SearchableGame,
    ScorableType: Scorable<GameType> + ?Sized,
{
    if node.is_over() || depth >= options.depth() {
        return Some(scorer.score(node));
    }

    None
}

#[cfg(test)]
mod tests {
    use decorum::N64;

    use super::*;
    use crate::{
        stub::{leaf, node, StubGame},
        CountedScore, SearchAgent,
    };

    fn stub_value(game: &StubGame) -> N64 {
        N64::from(game.value)
    }

    fn options(depth: i64) -> AgentOptions {
        AgentOptions::new(depth).unwrap()
    }

    #[test]
    fn test_alpha_beta_matches_minimax_on_random_trees() {
        for seed in 0..200 {
            for num_agents in 1..=3 {
                for depth in 1..=3 {
                    let levels = depth as usize * num_agents;
                    let game = StubGame::random(seed, 4, levels, num_agents);

                    let minimax = MinimaxAgent::new(&stub_value, options(depth), "minimax");
                    let alpha_beta = AlphaBetaAgent::new(&stub_value, options(depth), "alpha");

                    let full = minimax.search(&game);
                    let pruned = alpha_beta.search(&game);

                    assert_eq!(
                        full.best_action(),
                        pruned.best_action(),
                        "seed {seed}, agents {num_agents}, depth {depth}"
                    );
                    assert_eq!(full.score(), pruned.score());
                    assert!(pruned.evaluations <= full.evaluations);
                }
            }
        }
    }

    #[test]
    fn test_alpha_beta_evaluates_fewer_leaves_when_it_can_prune() {
        // The second ghost branch finds a 1 after the player is already guaranteed a 3, so the
        // rest of that branch is never scored
        let game = node(vec![
            node(vec![leaf(3.0), leaf(5.0)]),
            node(vec![leaf(1.0), leaf(9.0), leaf(8.0)]),
        ]);

        let minimax = MinimaxAgent::new(&stub_value, options(1), "minimax");
        let alpha_beta = AlphaBetaAgent::new(&stub_value, options(1), "alpha");

        let full = minimax.search(&game);
        let pruned = alpha_beta.search(&game);

        assert_eq!(full.evaluations, 5);
        assert_eq!(pruned.evaluations, 3);
        assert_eq!(full.best_action(), Some(0));
        assert_eq!(pruned.best_action(), Some(0));
    }

    #[test]
    fn test_depth_limit_stops_after_whole_plies() {
        // Every node is valued by its level, so the evaluations tell us how deep we went
        for num_agents in 1..=3 {
            let game = StubGame::uniform(2, 4 * num_agents, num_agents);

            for depth in 1..=3 {
                let deepest = depth as usize * num_agents;
                let seen = std::cell::RefCell::new(vec![]);
                let recording = |g: &StubGame| {
                    seen.borrow_mut().push(g.value);
                    N64::from(g.value)
                };

                let minimax = MinimaxAgent::new(&recording, options(depth), "minimax");
                minimax.search(&game);
                let alpha_beta = AlphaBetaAgent::new(&recording, options(depth), "alpha");
                alpha_beta.search(&game);
                let expectimax = ExpectimaxAgent::new(&recording, options(depth), "expectimax");
                expectimax.search(&game);

                let seen = seen.borrow();
                assert!(!seen.is_empty());
                assert!(
                    seen.iter().all(|level| *level == deepest as f64),
                    "agents {num_agents}, depth {depth}: {seen:?}"
                );
            }
        }
    }

    #[test]
    fn test_terminal_root_is_scored_without_expanding() {
        let game = node(vec![leaf(10.0), leaf(20.0)]).with_value(-3.0).terminal();

        let minimax = MinimaxAgent::new(&stub_value, options(4), "minimax");
        let alpha_beta = AlphaBetaAgent::new(&stub_value, options(4), "alpha");
        let expectimax = ExpectimaxAgent::new(&stub_value, options(4), "expectimax");

        for report in [
            minimax.search(&game),
            alpha_beta.search(&game),
            expectimax.search(&game),
        ] {
            assert_eq!(report.score(), N64::from(-3.0));
            assert_eq!(report.evaluations, 1);
            assert_eq!(report.best_action(), None);
        }
    }

    #[test]
    fn test_terminal_state_below_root_short_circuits() {
        // The ghost's first move ends the game, the children under it are never looked at
        let game = node(vec![node(vec![
            node(vec![leaf(100.0)]).with_value(-50.0).terminal(),
            node(vec![leaf(7.0)]),
        ])]);

        let minimax = MinimaxAgent::new(&stub_value, options(3), "minimax");
        let report = minimax.search(&game);

        assert_eq!(report.score(), N64::from(-50.0));
    }

    #[test]
    fn test_agent_without_actions_is_a_leaf() {
        // The ghost has no moves under action 1, which is scored directly
        let game = node(vec![
            node(vec![leaf(1.0), leaf(2.0)]),
            node(vec![]).with_value(4.0),
        ]);

        let minimax = MinimaxAgent::new(&stub_value, options(2), "minimax");
        let alpha_beta = AlphaBetaAgent::new(&stub_value, options(2), "alpha");
        let expectimax = ExpectimaxAgent::new(&stub_value, options(2), "expectimax");

        assert_eq!(minimax.select_action(&game), Some(1));
        assert_eq!(alpha_beta.select_action(&game), Some(1));
        assert_eq!(expectimax.select_action(&game), Some(1));
    }

    #[test]
    fn test_player_without_actions_selects_nothing() {
        let game = leaf(2.0);

        let minimax = MinimaxAgent::new(&stub_value, options(2), "minimax");

        assert_eq!(minimax.select_action(&game), None);
    }

    #[test]
    fn test_repeated_searches_agree() {
        let game = StubGame::random(42, 3, 6, 3);

        let minimax = MinimaxAgent::new(&stub_value, options(2), "minimax");
        let alpha_beta = AlphaBetaAgent::new(&stub_value, options(2), "alpha");
        let expectimax = ExpectimaxAgent::new(&stub_value, options(2), "expectimax");

        let agents: [&dyn SearchAgent<StubGame>; 3] = [&minimax, &alpha_beta, &expectimax];

        for agent in agents {
            let first = agent.select_action(&game);

            for _ in 0..5 {
                assert_eq!(agent.select_action(&game), first);
            }
        }
    }

    #[test]
    fn test_cutoff_score_counts_one_evaluation() {
        let scorer = CountedScore::new(&stub_value);
        let game = leaf(1.0);

        assert_eq!(
            cutoff_score(&scorer, &game, 2, &options(2)),
            Some(N64::from(1.0))
        );
        assert_eq!(cutoff_score(&scorer, &game, 1, &options(2)), None);
        assert_eq!(scorer.calls(), 1);
    }
}

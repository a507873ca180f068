use decorum::N64;
use pacman_minimax::{
    types::{ScoreGettableGame, VictorDeterminableGame},
    EvaluationRegistry,
};

use crate::PacmanGame;

const FOOD_DISTANCE_WEIGHT: f64 = 10.0;
const FOOD_REMAINING_WEIGHT: f64 = 4.0;
const CAPSULE_REMAINING_WEIGHT: f64 = 20.0;
const SCARED_GHOST_WEIGHT: f64 = 100.0;
const ACTIVE_GHOST_PENALTY: f64 = 1000.0;

/// The score of the game and nothing else
pub fn score_evaluation(game: &PacmanGame) -> N64 {
    N64::from(game.score())
}

/// Adds some lookahead to the raw score
///
/// Rewards being close to food and to ghosts that will still be scared when we get to them,
/// penalizes food and capsules left on the board and standing next to an active ghost. Finished
/// games are scored as is, so a win or a loss always dominates.
pub fn better_evaluation(game: &PacmanGame) -> N64 {
    if game.is_over() {
        return N64::from(game.score());
    }

    let pacman = game.pacman_position();
    let mut value = game.score();

    if let Some(nearest_food) = game
        .food_positions()
        .into_iter()
        .map(|f| pacman.manhattan_distance(f))
        .min()
    {
        value += FOOD_DISTANCE_WEIGHT / f64::from(nearest_food.max(1));
    }

    value -= FOOD_REMAINING_WEIGHT * game.food_remaining() as f64;
    value -= CAPSULE_REMAINING_WEIGHT * game.capsules().len() as f64;

    for ghost in game.ghosts() {
        let distance = pacman.manhattan_distance(ghost.position);

        if ghost.is_scared() {
            if ghost.scared_timer > distance {
                value += SCARED_GHOST_WEIGHT / f64::from(distance + 1);
            }
        } else if distance <= 1 {
            value -= ACTIVE_GHOST_PENALTY;
        }
    }

    N64::from(value)
}

/// Every evaluation function for Pacman, under both its long and short name
pub fn evaluation_registry() -> EvaluationRegistry<PacmanGame> {
    let mut registry = EvaluationRegistry::new();

    registry
        .register("scoreEvaluationFunction", &score_evaluation)
        .register("score", &score_evaluation)
        .register("betterEvaluationFunction", &better_evaluation)
        .register("better", &better_evaluation);

    registry
}

#[cfg(test)]
mod tests {
    use pacman_minimax::types::{AgentCountGettableGame, AgentIndex, SimulableGame};
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    use super::*;
    use crate::{Direction, Layout};

    fn game(text: &str) -> PacmanGame {
        PacmanGame::new(Layout::parse("test", text).unwrap())
    }

    #[test]
    fn test_score_evaluation_is_the_score() {
        let next = game("%%%%%\n%P..%\n%%%%%").next_state(AgentIndex::PLAYER, Direction::East);

        assert_eq!(score_evaluation(&next), N64::from(9.0));
    }

    #[test]
    fn test_finished_games_use_the_raw_score() {
        let won = game("%%%%\n%P.%\n%%%%").next_state(AgentIndex::PLAYER, Direction::East);

        assert_eq!(better_evaluation(&won), N64::from(509.0));
    }

    #[test]
    fn test_moving_towards_food_beats_stopping() {
        let start = game("%%%%%%%\n%P   .%\n%%%%%%%");

        let towards = start.next_state(AgentIndex::PLAYER, Direction::East);
        let stopped = start.next_state(AgentIndex::PLAYER, Direction::Stop);

        assert_eq!(score_evaluation(&towards), score_evaluation(&stopped));
        assert!(better_evaluation(&towards) > better_evaluation(&stopped));
    }

    #[test]
    fn test_next_to_an_active_ghost_is_heavily_penalized() {
        let near = game("%%%%%%%\n%.PG  %\n%%%%%%%");
        let far = game("%%%%%%%\n%.P  G%\n%%%%%%%");

        assert!(better_evaluation(&far) - better_evaluation(&near) >= N64::from(ACTIVE_GHOST_PENALTY));
    }

    #[test]
    fn test_scared_ghosts_in_reach_are_rewarded() {
        let start = game("%%%%%%%%\n%Po  G.%\n%%%%%%%%");
        let scared = start.next_state(AgentIndex::PLAYER, Direction::East);

        // Same score and food, but the capsule is gone and the ghost is worth chasing
        let without_ghost = game("%%%%%%%%\n% P   .%\n%%%%%%%%");
        let baseline = better_evaluation(&without_ghost) - N64::from(1.0);

        assert_eq!(
            better_evaluation(&scared),
            baseline + N64::from(SCARED_GHOST_WEIGHT / 4.0)
        );
    }

    #[test]
    fn test_registry_names() {
        let registry = evaluation_registry();

        assert_eq!(
            registry.names(),
            vec![
                "better",
                "betterEvaluationFunction",
                "score",
                "scoreEvaluationFunction"
            ]
        );

        let start = game("%%%%%\n%P..%\n%%%%%");
        let better = registry.get("better").unwrap();
        assert_eq!(better(&start), better_evaluation(&start));
    }

    #[test]
    fn test_better_evaluation_handles_every_state_of_random_play() {
        for name in Layout::built_in_names() {
            let mut rng = StdRng::seed_from_u64(5);
            let mut game = PacmanGame::new(Layout::built_in(name).unwrap());
            let mut states = 0;

            'game: for _ in 0..300 {
                for index in 0..game.num_agents() {
                    let value = better_evaluation(&game);
                    states += 1;

                    assert!(
                        value.into_inner().is_finite(),
                        "{name}: {} after {states} states",
                        value.into_inner()
                    );
                    assert_eq!(better_evaluation(&game.clone()), value, "{name}");

                    if game.is_over() {
                        assert_eq!(value, score_evaluation(&game), "{name}");
                        break 'game;
                    }

                    let agent = AgentIndex(index);
                    let Some(action) = game.legal_actions(agent).choose(&mut rng).copied() else {
                        continue;
                    };
                    game = game.next_state(agent, action);
                }
            }

            let last = better_evaluation(&game);
            assert!(
                last.into_inner().is_finite(),
                "{name}: {} at the end",
                last.into_inner()
            );
        }
    }
}

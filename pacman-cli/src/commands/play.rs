use color_eyre::eyre::{eyre, Result};
use itertools::Itertools;
use pacman_rs::{play_game, GameOutcome, GameResult, GhostPolicy, Summary};
use rand::{rngs::StdRng, SeedableRng};

use super::AgentArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    #[clap(flatten)]
    pub agent: AgentArgs,

    /// How the ghosts move
    #[clap(short, long, default_value = "random")]
    pub ghosts: GhostPolicy,

    /// Number of games to play
    #[clap(short = 'n', long, default_value_t = 1)]
    pub games: usize,

    /// Seed for the ghosts, a random seed is used if not specified
    #[clap(short, long)]
    pub seed: Option<u64>,

    /// Rounds to play before giving up on a game
    #[clap(short, long, default_value_t = 500)]
    pub max_moves: usize,

    /// Print every outcome and the summary as JSON
    #[clap(long)]
    pub json: bool,
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        if self.games == 0 {
            return Err(eyre!("At least one game has to be played"));
        }

        let agent = self.agent.agent()?;
        let game = self.agent.game()?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut outcomes = Vec::with_capacity(self.games);
        for number in 1..=self.games {
            let outcome = play_game(
                game.clone(),
                agent.as_ref(),
                self.ghosts,
                &mut rng,
                self.max_moves,
            );

            if self.json {
                println!("{}", serde_json::to_string(&outcome)?);
            } else {
                println!(
                    "Game {number}: {:?} with a score of {} after {} moves",
                    outcome.result, outcome.score, outcome.moves
                );
            }

            outcomes.push(outcome);
        }

        let summary = Summary::from_outcomes(&outcomes);

        if self.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!("Average Score: {}", summary.average_score);
            println!(
                "Win Rate:      {}/{} ({:.2})",
                summary.wins,
                summary.games,
                summary.win_rate()
            );
            println!("Record:        {}", record(&outcomes));
        }

        Ok(())
    }
}

fn record(outcomes: &[GameOutcome]) -> String {
    outcomes
        .iter()
        .map(|o| match o.result {
            GameResult::Win => "Win",
            GameResult::Lose => "Loss",
            GameResult::MoveLimit => "Unfinished",
        })
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let outcome = |result| GameOutcome {
            result,
            score: 0.0,
            moves: 1,
        };

        assert_eq!(
            record(&[
                outcome(GameResult::Win),
                outcome(GameResult::Lose),
                outcome(GameResult::MoveLimit)
            ]),
            "Win, Loss, Unfinished"
        );
    }
}

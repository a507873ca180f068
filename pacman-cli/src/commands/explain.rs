use color_eyre::eyre::Result;
use pacman_minimax::types::ScoreGettableGame;

use super::AgentArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Explain {
    #[clap(flatten)]
    pub agent: AgentArgs,
}

impl Explain {
    pub(crate) fn run(self) -> Result<()> {
        let agent = self.agent.agent()?;
        let game = self.agent.game()?;

        println!("{game}");
        println!("Score: {}", game.score());
        println!();

        let report = agent.search(&game);

        println!("{}", report.tree.to_text_tree());
        match report.best_action() {
            Some(action) => println!("{} chose {action}", agent.name()),
            None => println!("{} had nothing to choose from", agent.name()),
        }
        println!("Expected score: {}", report.score().into_inner());
        println!(
            "Explored {} nodes, {} scored by the evaluation function",
            report.tree.node_count(),
            report.evaluations
        );

        Ok(())
    }
}

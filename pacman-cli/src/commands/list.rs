use color_eyre::eyre::Result;
use itertools::Itertools;
use pacman_minimax::SearchStrategy;
use pacman_rs::{evaluation_registry, GhostPolicy, Layout};

#[derive(clap::Args, Debug)]
pub(crate) struct List {}

impl List {
    pub(crate) fn run(self) -> Result<()> {
        println!("Layouts: {}", Layout::built_in_names().join(", "));
        println!(
            "Agents: {}",
            SearchStrategy::ALL.iter().map(|s| s.name()).join(", ")
        );
        println!(
            "Evaluation functions: {}",
            evaluation_registry().names().join(", ")
        );
        println!(
            "Ghosts: {}",
            [GhostPolicy::Random, GhostPolicy::Directional]
                .iter()
                .map(|g| g.name())
                .join(", ")
        );

        Ok(())
    }
}

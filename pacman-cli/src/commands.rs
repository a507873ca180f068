pub mod explain;
pub mod list;
pub mod play;

use std::{fs, path::PathBuf};

use explain::Explain;
use list::List;
use play::Play;

use clap::Subcommand;
use color_eyre::eyre::{Result, WrapErr};
use pacman_minimax::{AgentConfig, BoxedAgent, SearchStrategy};
use pacman_rs::{evaluation_registry, Layout, PacmanGame};

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Play games and report how the agent did
    Play(Play),
    /// Print the search tree behind the agent's first move
    Explain(Explain),
    /// List the layouts, strategies and evaluation functions that can be used
    List(List),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Play(p) => p.run()?,
            Command::Explain(e) => e.run()?,
            Command::List(l) => l.run()?,
        }

        Ok(())
    }
}

/// The flags that pick the board and the agent, shared by the commands that search
#[derive(clap::Args, Debug)]
pub(crate) struct AgentArgs {
    /// A built in layout name or a path to a `.lay` file
    #[clap(short, long, default_value = "minimaxClassic")]
    pub layout: String,

    /// Only keep this many ghosts from the layout
    #[clap(short = 'k', long)]
    pub num_ghosts: Option<usize>,

    /// The search strategy for pacman
    #[clap(short = 'p', long = "agent", default_value = "minimax")]
    pub strategy: SearchStrategy,

    /// Agent options, as `evalFn=<name>,depth=<plies>`
    #[clap(short, long, conflicts_with = "config")]
    pub agent_args: Option<AgentConfig>,

    /// Read the agent options from a JSON file instead
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Search depth, overriding the agent options
    #[clap(short, long)]
    pub depth: Option<i64>,
}

impl AgentArgs {
    pub fn config(&self) -> Result<AgentConfig> {
        let mut config = match (&self.config, &self.agent_args) {
            (Some(path), _) => {
                let json = fs::read_to_string(path)
                    .wrap_err_with(|| format!("Could not read {}", path.display()))?;

                AgentConfig::from_json(&json)
                    .wrap_err_with(|| format!("Invalid agent config in {}", path.display()))?
            }
            (None, Some(args)) => args.clone(),
            (None, None) => AgentConfig::default(),
        };

        if let Some(depth) = self.depth {
            config.depth = depth;
        }

        Ok(config)
    }

    pub fn agent(&self) -> Result<BoxedAgent<PacmanGame>> {
        let config = self.config()?;

        let agent = self
            .strategy
            .build(&config, &evaluation_registry())
            .wrap_err("Could not build the agent")?;

        Ok(agent)
    }

    pub fn game(&self) -> Result<PacmanGame> {
        let path = PathBuf::from(&self.layout);
        let layout = if path.is_file() {
            Layout::from_file(&path)
        } else {
            Layout::built_in(&self.layout)
        }
        .wrap_err_with(|| format!("Could not load layout {}", self.layout))?;

        let game = PacmanGame::new(layout);

        Ok(match self.num_ghosts {
            Some(count) => game.with_ghost_limit(count),
            None => game,
        })
    }
}

use std::{fmt, sync::Arc};

use itertools::Itertools;
use pacman_minimax::types::{
    AgentCountGettableGame, AgentIndex, ScoreGettableGame, SimulableGame, VictorDeterminableGame,
};
use serde::{Deserialize, Serialize};

use crate::{Direction, Layout, Position};

/// How many ghost moves a capsule keeps the ghosts scared for
pub const SCARED_TIME: u32 = 40;
pub const TIME_PENALTY: i64 = 1;
pub const FOOD_REWARD: i64 = 10;
pub const WIN_REWARD: i64 = 500;
pub const GHOST_EATEN_REWARD: i64 = 200;
pub const DEATH_PENALTY: i64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostState {
    pub start: Position,
    pub position: Position,
    /// The last move made, ghosts may not turn straight back
    pub direction: Direction,
    pub scared_timer: u32,
}

impl GhostState {
    fn new(start: Position) -> Self {
        Self {
            start,
            position: start,
            direction: Direction::Stop,
            scared_timer: 0,
        }
    }

    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

#[derive(Debug, Clone)]
/// A Pacman game between pacman, agent 0, and the ghosts, agents 1 and up
///
/// Every transition returns a new state. The board itself is shared between all the states of a
/// game.
pub struct PacmanGame {
    layout: Arc<Layout>,
    pacman: Position,
    pacman_direction: Direction,
    ghosts: Vec<GhostState>,
    food: Vec<bool>,
    food_remaining: usize,
    capsules: Vec<Position>,
    score: i64,
    outcome: Option<Outcome>,
}

impl PacmanGame {
    pub fn new(layout: Layout) -> Self {
        let mut food = vec![false; layout.width() * layout.height()];
        for index in layout.food().iter().filter_map(|p| layout.index(*p)) {
            food[index] = true;
        }

        Self {
            pacman: layout.pacman_start(),
            pacman_direction: Direction::Stop,
            ghosts: layout
                .ghost_starts()
                .iter()
                .map(|start| GhostState::new(*start))
                .collect(),
            food_remaining: layout.food().len(),
            capsules: layout.capsules().to_vec(),
            food,
            score: 0,
            outcome: None,
            layout: Arc::new(layout),
        }
    }

    /// Keep only the first `count` ghosts
    pub fn with_ghost_limit(mut self, count: usize) -> Self {
        self.ghosts.truncate(count);
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn pacman_position(&self) -> Position {
        self.pacman
    }

    pub fn pacman_direction(&self) -> Direction {
        self.pacman_direction
    }

    pub fn ghosts(&self) -> &[GhostState] {
        &self.ghosts
    }

    /// The ghost moving as `agent`
    ///
    /// Panics if `agent` is pacman or out of range
    pub fn ghost(&self, agent: AgentIndex) -> &GhostState {
        &self.ghosts[agent.0 - 1]
    }

    pub fn has_food(&self, position: Position) -> bool {
        self.layout.index(position).map_or(false, |i| self.food[i])
    }

    pub fn food_remaining(&self) -> usize {
        self.food_remaining
    }

    /// Every cell that still has food, in reading order
    pub fn food_positions(&self) -> Vec<Position> {
        let width = self.layout.width();

        self.food
            .iter()
            .positions(|f| *f)
            .map(|i| Position::new((i % width) as i32, (i / width) as i32))
            .collect()
    }

    pub fn capsules(&self) -> &[Position] {
        &self.capsules
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn move_pacman(&mut self, action: Direction) {
        let target = self.pacman.step(action);
        if !self.layout.is_wall(target) {
            self.pacman = target;
        }
        self.pacman_direction = action;
        self.score -= TIME_PENALTY;

        self.consume(self.pacman);

        for ghost in 0..self.ghosts.len() {
            self.check_collision(ghost);
        }
    }

    fn move_ghost(&mut self, ghost: usize, action: Direction) {
        let state = &mut self.ghosts[ghost];

        let target = state.position.step(action);
        if !self.layout.is_wall(target) {
            state.position = target;
        }
        state.direction = action;
        state.scared_timer = state.scared_timer.saturating_sub(1);

        self.check_collision(ghost);
    }

    fn consume(&mut self, position: Position) {
        if let Some(index) = self.layout.index(position).filter(|i| self.food[*i]) {
            self.food[index] = false;
            self.food_remaining -= 1;
            self.score += FOOD_REWARD;

            if self.food_remaining == 0 && self.outcome != Some(Outcome::Lose) {
                self.score += WIN_REWARD;
                self.outcome = Some(Outcome::Win);
            }
        }

        if let Some(capsule) = self.capsules.iter().position(|c| *c == position) {
            self.capsules.remove(capsule);

            for ghost in self.ghosts.iter_mut() {
                ghost.scared_timer = SCARED_TIME;
            }
        }
    }

    fn check_collision(&mut self, ghost: usize) {
        let state = &mut self.ghosts[ghost];
        if state.position != self.pacman {
            return;
        }

        if state.is_scared() {
            self.score += GHOST_EATEN_REWARD;
            *state = GhostState::new(state.start);
        } else if self.outcome != Some(Outcome::Win) {
            self.score -= DEATH_PENALTY;
            self.outcome = Some(Outcome::Lose);
        }
    }

    fn open_neighbors(&self, from: Position) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |d| *d != Direction::Stop && !self.layout.is_wall(from.step(*d)))
    }
}

impl AgentCountGettableGame for PacmanGame {
    fn num_agents(&self) -> usize {
        self.ghosts.len() + 1
    }
}

impl VictorDeterminableGame for PacmanGame {
    fn is_win(&self) -> bool {
        self.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.outcome == Some(Outcome::Lose)
    }
}

impl ScoreGettableGame for PacmanGame {
    fn score(&self) -> f64 {
        self.score as f64
    }
}

impl SimulableGame for PacmanGame {
    type Action = Direction;

    /// Pacman may step into any open cell or stop. Ghosts can't stop, and only turn around when
    /// there is nowhere else to go.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.is_over() {
            return vec![];
        }

        if agent.is_player() {
            return self
                .open_neighbors(self.pacman)
                .chain(std::iter::once(Direction::Stop))
                .collect();
        }

        let ghost = self.ghost(agent);
        let mut possible = self.open_neighbors(ghost.position).collect_vec();
        let reverse = ghost.direction.reverse();

        if possible.len() > 1 {
            possible.retain(|d| *d != reverse);
        }

        possible
    }

    fn next_state(&self, agent: AgentIndex, action: Direction) -> Self {
        let mut next = self.clone();
        if self.is_over() {
            return next;
        }

        if agent.is_player() {
            next.move_pacman(action);
        } else {
            next.move_ghost(agent.0 - 1, action);
        }

        next
    }
}

impl fmt::Display for PacmanGame {
    /// Draws the board, scared ghosts are a lowercase `g`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = &self.layout;

        for y in 0..layout.height() as i32 {
            let row: String = (0..layout.width() as i32)
                .map(|x| {
                    let position = Position::new(x, y);

                    if let Some(ghost) = self.ghosts.iter().find(|g| g.position == position) {
                        if ghost.is_scared() {
                            'g'
                        } else {
                            'G'
                        }
                    } else if position == self.pacman {
                        'P'
                    } else if layout.is_wall(position) {
                        '%'
                    } else if self.has_food(position) {
                        '.'
                    } else if self.capsules.contains(&position) {
                        'o'
                    } else {
                        ' '
                    }
                })
                .collect();

            writeln!(f, "{row}")?;
        }

        Ok(())
    }
}

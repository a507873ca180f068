//! Boards in the classic text format
//!
//! `%` is a wall, `.` food, `o` a capsule, `P` pacman and `G` a ghost. Anything else besides a
//! space is rejected. Ghosts are numbered in reading order, top to bottom then left to right.

use std::{fs, path::Path};

use itertools::Itertools;
use thiserror::Error;

use crate::Position;

const BUILT_IN: [(&str, &str); 5] = [
    ("testClassic", include_str!("../layouts/testClassic.lay")),
    ("minimaxClassic", include_str!("../layouts/minimaxClassic.lay")),
    ("trappedClassic", include_str!("../layouts/trappedClassic.lay")),
    ("smallClassic", include_str!("../layouts/smallClassic.lay")),
    ("openClassic", include_str!("../layouts/openClassic.lay")),
];

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout `{0}` has no rows")]
    Empty(String),
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown character {character:?} at row {row}, column {column}")]
    UnknownCharacter {
        character: char,
        row: usize,
        column: usize,
    },
    #[error("layout has no pacman")]
    MissingPacman,
    #[error("layout has more than one pacman, the second is at {0}")]
    ExtraPacman(Position),
    #[error("unknown layout `{name}`, expected one of: {}", .known.join(", "))]
    UnknownLayout {
        name: String,
        known: Vec<&'static str>,
    },
    #[error("could not read layout file")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    name: String,
    width: usize,
    height: usize,
    walls: Vec<bool>,
    food: Vec<Position>,
    capsules: Vec<Position>,
    pacman_start: Position,
    ghost_starts: Vec<Position>,
}

impl Layout {
    /// The names of the layouts compiled into the crate
    pub fn built_in_names() -> Vec<&'static str> {
        BUILT_IN.iter().map(|(name, _)| *name).collect()
    }

    pub fn built_in(name: &str) -> Result<Self, LayoutError> {
        let (name, text) = BUILT_IN
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| LayoutError::UnknownLayout {
                name: name.to_owned(),
                known: Self::built_in_names(),
            })?;

        Self::parse(name, text)
    }

    /// Read a `.lay` file, named after its file stem
    pub fn from_file(path: &Path) -> Result<Self, LayoutError> {
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::parse(&name, &text)
    }

    pub fn parse(name: &str, text: &str) -> Result<Self, LayoutError> {
        let rows = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect_vec();

        let width = rows
            .first()
            .map(|r| r.chars().count())
            .ok_or_else(|| LayoutError::Empty(name.to_owned()))?;
        let height = rows.len();

        let mut walls = Vec::with_capacity(width * height);
        let mut food = vec![];
        let mut capsules = vec![];
        let mut pacman_start = None;
        let mut ghost_starts = vec![];

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, character) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                walls.push(character == '%');

                match character {
                    '%' | ' ' => {}
                    '.' => food.push(position),
                    'o' => capsules.push(position),
                    'G' => ghost_starts.push(position),
                    'P' => {
                        if pacman_start.is_some() {
                            return Err(LayoutError::ExtraPacman(position));
                        }
                        pacman_start = Some(position);
                    }
                    character => {
                        return Err(LayoutError::UnknownCharacter {
                            character,
                            row: y,
                            column: x,
                        })
                    }
                }
            }
        }

        Ok(Self {
            name: name.to_owned(),
            width,
            height,
            walls,
            food,
            capsules,
            pacman_start: pacman_start.ok_or(LayoutError::MissingPacman)?,
            ghost_starts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Index of `position` into a row major grid, `None` when it is off the board
    pub fn index(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;

        if x >= self.width || y >= self.height {
            return None;
        }

        Some(y * self.width + x)
    }

    /// Cells off the board count as walls
    pub fn is_wall(&self, position: Position) -> bool {
        self.index(position).map_or(true, |i| self.walls[i])
    }

    pub fn food(&self) -> &[Position] {
        &self.food
    }

    pub fn capsules(&self) -> &[Position] {
        &self.capsules
    }

    pub fn pacman_start(&self) -> Position {
        self.pacman_start
    }

    pub fn ghost_starts(&self) -> &[Position] {
        &self.ghost_starts
    }
}

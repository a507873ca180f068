use std::fmt;

use decorum::N64;
use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::ConfigError;

/// A registered evaluation function
pub type EvaluationFn<GameType> = &'static (dyn Fn(&GameType) -> N64 + Send + Sync);

/// Maps names to evaluation functions so agents can be configured by name
///
/// The registry is filled in explicitly at start up, usually by the crate that defines the game.
pub struct EvaluationRegistry<GameType: 'static> {
    functions: FxHashMap<&'static str, EvaluationFn<GameType>>,
}

impl<GameType: 'static> EvaluationRegistry<GameType> {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            functions: FxHashMap::default(),
        }
    }

    /// Register `function` under `name`, replacing anything already registered with that name
    pub fn register(&mut self, name: &'static str, function: EvaluationFn<GameType>) -> &mut Self {
        self.functions.insert(name, function);
        self
    }

    /// Look up the function registered under `name`
    pub fn get(&self, name: &str) -> Result<EvaluationFn<GameType>, ConfigError> {
        self.functions
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownEvaluationFunction {
                name: name.to_owned(),
                registered: self.names(),
            })
    }

    /// Every registered name, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.functions.keys().copied().sorted().collect()
    }
}

impl<GameType: 'static> Default for EvaluationRegistry<GameType> {
    fn default() -> Self {
        Self::new()
    }
}

impl<GameType: 'static> fmt::Debug for EvaluationRegistry<GameType> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationRegistry")
            .field("names", &self.names())
            .finish()
    }
}

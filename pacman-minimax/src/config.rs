use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The evaluation function used when none is configured
pub const DEFAULT_EVALUATION_FUNCTION: &str = "scoreEvaluationFunction";

/// The depth used when none is configured
pub const DEFAULT_DEPTH: i64 = 2;

#[derive(Debug, Error)]
/// Everything that can go wrong while configuring a search agent
pub enum ConfigError {
    /// The named evaluation function isn't in the registry
    #[error("unknown evaluation function `{name}`, expected one of: {}", .registered.join(", "))]
    UnknownEvaluationFunction {
        /// The name that was asked for
        name: String,
        /// Every name the registry knows about
        registered: Vec<&'static str>,
    },
    /// Depth has to be at least one ply
    #[error("depth must be a positive integer, got {0}")]
    InvalidDepth(i64),
    /// No search strategy goes by this name
    #[error("unknown search strategy `{0}`, expected one of: minimax, alphabeta, expectimax")]
    UnknownStrategy(String),
    /// An agent argument wasn't a `key=value` pair, or its value didn't parse
    #[error("malformed agent argument `{0}`, expected key=value")]
    MalformedArgument(String),
    /// An agent argument used a key we don't recognize
    #[error("unknown agent option `{0}`, expected evalFn or depth")]
    UnknownOption(String),
    /// A JSON config couldn't be read
    #[error("invalid agent config")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The validated options shared by every search agent
///
/// ```
/// use pacman_minimax::AgentOptions;
///
/// let defaults: AgentOptions = Default::default();
///
/// assert_eq!(defaults.depth(), 2);
/// assert!(AgentOptions::new(0).is_err());
/// ```
pub struct AgentOptions {
    depth: usize,
}

impl AgentOptions {
    /// Build options searching `depth` plies ahead, rejecting non-positive depths
    pub fn new(depth: i64) -> Result<Self, ConfigError> {
        match usize::try_from(depth) {
            Ok(depth) if depth > 0 => Ok(Self { depth }),
            _ => Err(ConfigError::InvalidDepth(depth)),
        }
    }

    /// How many plies the search looks ahead
    ///
    /// A ply is one move from the player followed by one move from every adversary
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH as usize,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// The raw configuration for a search agent, before it is checked against a registry
///
/// This can be read from JSON, or from the comma separated `key=value` syntax used on the command
/// line:
///
/// ```
/// use pacman_minimax::AgentConfig;
///
/// let from_args: AgentConfig = "evalFn=better,depth=3".parse().unwrap();
/// let from_json = AgentConfig::from_json(r#"{"evaluationFunction": "better", "depth": 3}"#).unwrap();
///
/// assert_eq!(from_args, from_json);
/// ```
pub struct AgentConfig {
    /// The registered name of the evaluation function
    #[serde(default = "default_evaluation_function", alias = "evalFn")]
    pub evaluation_function: String,
    /// How many plies to search
    #[serde(default = "default_depth")]
    pub depth: i64,
}

fn default_evaluation_function() -> String {
    DEFAULT_EVALUATION_FUNCTION.to_owned()
}

fn default_depth() -> i64 {
    DEFAULT_DEPTH
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            evaluation_function: default_evaluation_function(),
            depth: default_depth(),
        }
    }
}

impl AgentConfig {
    /// Read a config from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the depth of this config
    pub fn options(&self) -> Result<AgentOptions, ConfigError> {
        AgentOptions::new(self.depth)
    }
}

impl FromStr for AgentConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = AgentConfig::default();

        for argument in s.split(',').map(str::trim).filter(|a| !a.is_empty()) {
            let (key, value) = argument
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedArgument(argument.to_owned()))?;

            match key.trim() {
                "evalFn" | "evaluationFunction" => {
                    config.evaluation_function = value.trim().to_owned();
                }
                "depth" => {
                    config.depth = value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::MalformedArgument(argument.to_owned()))?;
                }
                other => return Err(ConfigError::UnknownOption(other.to_owned())),
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_arguments_use_defaults() {
        let config: AgentConfig = "".parse().unwrap();

        assert_eq!(config, AgentConfig::default());
        assert_eq!(config.evaluation_function, "scoreEvaluationFunction");
        assert_eq!(config.options().unwrap().depth(), 2);
    }

    #[test]
    fn test_arguments_override_defaults() {
        let config: AgentConfig = "depth=4, evalFn=better".parse().unwrap();

        assert_eq!(config.evaluation_function, "better");
        assert_eq!(config.depth, 4);
    }

    #[test]
    fn test_argument_without_value_is_rejected() {
        let err = "depth".parse::<AgentConfig>().unwrap_err();

        assert!(matches!(err, ConfigError::MalformedArgument(a) if a == "depth"));
    }

    #[test]
    fn test_non_numeric_depth_is_rejected() {
        let err = "depth=deep".parse::<AgentConfig>().unwrap_err();

        assert!(matches!(err, ConfigError::MalformedArgument(_)));
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let err = "speed=3".parse::<AgentConfig>().unwrap_err();

        assert!(matches!(err, ConfigError::UnknownOption(k) if k == "speed"));
    }

    #[test]
    fn test_non_positive_depth_is_a_config_error() {
        for depth in [0, -1] {
            let config = AgentConfig {
                depth,
                ..Default::default()
            };

            assert!(matches!(
                config.options(),
                Err(ConfigError::InvalidDepth(d)) if d == depth
            ));
        }
    }

    #[test]
    fn test_json_uses_defaults_for_missing_keys() {
        let config = AgentConfig::from_json(r#"{"depth": 3}"#).unwrap();

        assert_eq!(config.evaluation_function, DEFAULT_EVALUATION_FUNCTION);
        assert_eq!(config.depth, 3);
    }

    #[test]
    fn test_json_accepts_eval_fn_alias() {
        let config = AgentConfig::from_json(r#"{"evalFn": "better"}"#).unwrap();

        assert_eq!(config.evaluation_function, "better");
    }

    #[test]
    fn test_json_rejects_unknown_keys() {
        let err = AgentConfig::from_json(r#"{"depth": 3, "speed": 1}"#).unwrap_err();

        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = AgentConfig {
            evaluation_function: "better".to_owned(),
            depth: 3,
        };
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"evaluationFunction": "better", "depth": 3})
        );
    }
}

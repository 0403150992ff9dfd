//! Interaction scripts for the demo: `"right,right,dot:0,tick:1500"`.

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Click the right (next) arrow.
    Right,
    /// Click the left (previous) arrow.
    Left,
    /// Click indicator dot `n`.
    Dot(usize),
    /// Click slide `n` itself; carousels ignore this.
    Item(usize),
    /// Let `n` milliseconds pass.
    Tick(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub step: String,
    pub reason: &'static str,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bad script step {:?}: {}", self.step, self.reason)
    }
}

impl std::error::Error for ScriptError {}

impl FromStr for Step {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ScriptError {
            step: s.to_string(),
            reason,
        };
        let (verb, arg) = match s.trim().split_once(':') {
            Some((verb, arg)) => (verb.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };
        let number = || -> Result<u64, ScriptError> {
            arg.ok_or(err("missing number"))?
                .parse::<u64>()
                .map_err(|_| err("not a non-negative number"))
        };
        match (verb.to_ascii_lowercase().as_str(), arg) {
            ("right" | "next", None) => Ok(Step::Right),
            ("left" | "prev", None) => Ok(Step::Left),
            ("dot", _) => Ok(Step::Dot(number()? as usize)),
            ("item", _) => Ok(Step::Item(number()? as usize)),
            ("tick", _) => Ok(Step::Tick(number()?)),
            ("right" | "next" | "left" | "prev", Some(_)) => Err(err("takes no argument")),
            _ => Err(err("unknown step")),
        }
    }
}

pub fn parse_script(script: &str) -> Result<Vec<Step>, ScriptError> {
    script
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Right => f.write_str("right"),
            Step::Left => f.write_str("left"),
            Step::Dot(n) => write!(f, "dot:{n}"),
            Step::Item(n) => write!(f, "item:{n}"),
            Step::Tick(ms) => write!(f, "tick:{ms}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_script() {
        assert_eq!(
            parse_script("right, left ,dot:2,tick:1500,item:0,"),
            Ok(vec![
                Step::Right,
                Step::Left,
                Step::Dot(2),
                Step::Tick(1500),
                Step::Item(0)
            ])
        );
        assert_eq!(parse_script(""), Ok(vec![]));
    }

    #[test]
    fn rejects_malformed_steps() {
        assert_eq!(parse_script("up").unwrap_err().reason, "unknown step");
        assert_eq!(parse_script("dot").unwrap_err().reason, "missing number");
        assert_eq!(
            parse_script("tick:-5").unwrap_err().reason,
            "not a non-negative number"
        );
        assert_eq!(parse_script("right:1").unwrap_err().reason, "takes no argument");
    }
}

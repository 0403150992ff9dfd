use crate::config::CarouselConfig;
use crate::error::CarouselError;
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn from_backwards(backwards: bool) -> Self {
        if backwards {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }
}

/// Operation requested of a carousel container.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Init(CarouselConfig),
    Navigate(Direction),
    Display(usize),
}

impl Command {
    /// Interpret a call in the "options or method name" convention:
    /// - a falsy value (`null`, `false`, `0`, `""`) initializes with defaults,
    /// - an options object initializes,
    /// - a string names a method, with `args` as its argument,
    /// - anything else is rejected as an unknown method.
    pub fn parse(method_or_options: &Value, args: &Value) -> Result<Command, CarouselError> {
        if is_falsy(method_or_options) {
            return Ok(Command::Init(CarouselConfig::default()));
        }
        match method_or_options {
            Value::String(name) => Command::from_method(name, args),
            Value::Object(_) => Command::init_from_value(method_or_options),
            other => Err(CarouselError::UnknownMethod(other.to_string())),
        }
    }

    pub fn from_method(name: &str, args: &Value) -> Result<Command, CarouselError> {
        match name {
            "init" => Command::init_from_value(args),
            "navigate" => match args {
                Value::Null => Ok(Command::Navigate(Direction::Forward)),
                Value::Bool(backwards) => Ok(Command::Navigate(Direction::from_backwards(*backwards))),
                other => Err(CarouselError::InvalidArguments {
                    method: "navigate",
                    reason: format!("expected a `backwards` flag, got {other}"),
                }),
            },
            "display" => args
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Command::Display)
                .ok_or_else(|| CarouselError::InvalidArguments {
                    method: "display",
                    reason: format!("expected a non-negative index, got {args}"),
                }),
            other => Err(CarouselError::UnknownMethod(other.to_string())),
        }
    }

    fn init_from_value(options: &Value) -> Result<Command, CarouselError> {
        if options.is_null() {
            return Ok(Command::Init(CarouselConfig::default()));
        }
        CarouselConfig::deserialize(options)
            .map(Command::Init)
            .map_err(|err| CarouselError::InvalidArguments {
                method: "init",
                reason: err.to_string(),
            })
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

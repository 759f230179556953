//! Line-oriented input for the headless viewer.

use std::fmt;

use foundation::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Place the marker and resolve its active consideration.
    Move(Vec3),
    /// Classify a point without touching the marker.
    Predict(Vec3),
    /// Pointer position in viewport pixels.
    Pointer { x: f64, y: f64 },
    Resize { width: f64, height: f64 },
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    Arity { command: &'static str, expected: usize },
    Number(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "empty command"),
            CommandError::Unknown(word) => write!(f, "unknown command '{word}'"),
            CommandError::Arity { command, expected } => {
                write!(f, "'{command}' takes {expected} numbers")
            }
            CommandError::Number(raw) => write!(f, "not a finite number: '{raw}'"),
        }
    }
}

impl std::error::Error for CommandError {}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        match head {
            "move" => numbers::<3>("move", &args).map(|[x, y, z]| Command::Move(Vec3::new(x, y, z))),
            "predict" => {
                numbers::<3>("predict", &args).map(|[x, y, z]| Command::Predict(Vec3::new(x, y, z)))
            }
            "pointer" => numbers::<2>("pointer", &args).map(|[x, y]| Command::Pointer { x, y }),
            "resize" => {
                numbers::<2>("resize", &args).map(|[width, height]| Command::Resize { width, height })
            }
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn numbers<const N: usize>(command: &'static str, args: &[&str]) -> Result<[f64; N], CommandError> {
    if args.len() != N {
        return Err(CommandError::Arity {
            command,
            expected: N,
        });
    }
    let mut out = [0.0; N];
    for (slot, raw) in out.iter_mut().zip(args) {
        *slot = raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CommandError::Number(raw.to_string()))?;
    }
    Ok(out)
}

use crop_core::{Facing, GridPosition, ItemCode};
use thiserror::Error;

/// One line of a command script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Plant {
        position: GridPosition,
        seed: ItemCode,
    },
    UseTool {
        position: GridPosition,
        tool: ItemCode,
        facing: Facing,
    },
    AnimationFinished {
        position: GridPosition,
    },
    Inventory,
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("{command} expects {expected} arguments, got {actual}")]
    Arity {
        command: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid number {0:?}")]
    Number(String),
    #[error("invalid facing {0:?}, expected right, left, up or down")]
    Facing(String),
}

/// Parses a script line. Blank lines and `#` comments give `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match name {
        "plant" => {
            expect_arity("plant", &args, 3)?;
            Command::Plant {
                position: position(args[0], args[1])?,
                seed: item(args[2])?,
            }
        }
        "use" => {
            expect_arity("use", &args, 4)?;
            Command::UseTool {
                position: position(args[0], args[1])?,
                tool: item(args[2])?,
                facing: facing(args[3])?,
            }
        }
        "animation" => {
            expect_arity("animation", &args, 2)?;
            Command::AnimationFinished {
                position: position(args[0], args[1])?,
            }
        }
        "inventory" => {
            expect_arity("inventory", &args, 0)?;
            Command::Inventory
        }
        "save" => {
            expect_arity("save", &args, 0)?;
            Command::Save
        }
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn expect_arity(command: &'static str, args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(CommandError::Arity {
            command,
            expected,
            actual: args.len(),
        })
    }
}

fn position(x: &str, y: &str) -> Result<GridPosition, CommandError> {
    Ok(GridPosition::new(number(x)?, number(y)?))
}

fn item(raw: &str) -> Result<ItemCode, CommandError> {
    number(raw).map(ItemCode)
}

fn number<T: std::str::FromStr>(raw: &str) -> Result<T, CommandError> {
    raw.parse().map_err(|_| CommandError::Number(raw.to_string()))
}

fn facing(raw: &str) -> Result<Facing, CommandError> {
    match raw {
        "right" => Ok(Facing::Right),
        "left" => Ok(Facing::Left),
        "up" => Ok(Facing::Up),
        "down" => Ok(Facing::Down),
        other => Err(CommandError::Facing(other.to_string())),
    }
}

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use crop_field::{save_field_state, Field};
use farm_logging::{farm_info, farm_warn};
use rand::rngs::StdRng;
use serde_json::{json, Value};

use crate::script::{parse_command, Command};

/// Runs command scripts against one field.
pub struct Session {
    field: Field,
    rng: StdRng,
    state_path: Option<PathBuf>,
}

impl Session {
    pub fn new(field: Field, rng: StdRng, state_path: Option<PathBuf>) -> Self {
        Self {
            field,
            rng,
            state_path,
        }
    }

    #[cfg(test)]
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Executes every line of `input`, writing one JSON line per command to `output`.
    /// Bad or failing lines are reported with their line number and skipped. The
    /// field is saved at the end when a state path is configured.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for (index, line) in input.lines().enumerate() {
            let line = line.context("reading command script")?;
            let line_no = index + 1;
            let reply = match parse_command(&line) {
                Ok(None) => continue,
                Ok(Some(command)) => self
                    .execute(command)
                    .unwrap_or_else(|err| line_error(line_no, err)),
                Err(err) => line_error(line_no, err),
            };
            writeln!(output, "{reply}").context("writing result")?;
        }

        if self.state_path.is_some() {
            let reply = self
                .save()
                .unwrap_or_else(|err| json!({ "error": err }));
            writeln!(output, "{reply}").context("writing result")?;
        }
        output.flush().context("flushing results")?;
        Ok(())
    }

    /// Runs one command; `Err` carries the message for the error reply.
    fn execute(&mut self, command: Command) -> Result<Value, String> {
        match command {
            Command::Plant { position, seed } => {
                self.field
                    .plant(position, seed)
                    .map_err(|err| err.to_string())?;
                Ok(json!({ "planted": { "position": position, "seed": seed } }))
            }
            Command::UseTool {
                position,
                tool,
                facing,
            } => {
                let tool_use = self
                    .field
                    .use_tool(position, tool, facing, &mut self.rng)
                    .map_err(|err| err.to_string())?;
                Ok(json!({ "tool_use": tool_use }))
            }
            Command::AnimationFinished { position } => {
                self.field
                    .animation_finished(position, &mut self.rng)
                    .map_err(|err| err.to_string())?;
                Ok(json!({ "animation_finished": position }))
            }
            Command::Inventory => {
                let items: Vec<Value> = self
                    .field
                    .inventory()
                    .iter()
                    .map(|(item, quantity)| json!({ "item": item, "quantity": quantity }))
                    .collect();
                Ok(json!({ "inventory": items, "scene_items": self.field.scene().items() }))
            }
            Command::Save => self.save(),
        }
    }

    fn save(&mut self) -> Result<Value, String> {
        let Some(path) = self.state_path.clone() else {
            return Err("no state file configured".to_string());
        };
        let snapshot = self.field.settled_snapshot(&mut self.rng);
        let written = save_field_state(&path, &snapshot).map_err(|err| err.to_string())?;
        farm_info!("Field saved to {:?}", written);
        Ok(json!({ "saved": written }))
    }
}

fn line_error(line_no: usize, err: impl Display) -> Value {
    farm_warn!("line {}: {}", line_no, err);
    json!({ "line": line_no, "error": err.to_string() })
}

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{anyhow, bail, Context, Result};
use gesture_engine::{
    touch::input::{MotionAction, MotionPointer, MotionSample},
    EdgeBounds, TouchEvent,
};

#[derive(Clone, Debug, PartialEq)]
pub struct TouchSample {
    pub ms: u64,
    pub action: MotionAction,
    pub pointers: Vec<MotionPointer>,
}

impl TouchSample {
    pub fn to_event(&self) -> TouchEvent {
        MotionSample {
            action: self.action.encode(),
            time_ms: self.ms,
            pointers: &self.pointers,
        }
        .to_touch_event()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TraceLine {
    Touch(TouchSample),
    Tick { ms: u64 },
    Bounds(EdgeBounds),
}

impl TraceLine {
    pub fn ms(&self) -> Option<u64> {
        match self {
            Self::Touch(sample) => Some(sample.ms),
            Self::Tick { ms } => Some(*ms),
            Self::Bounds(_) => None,
        }
    }
}

pub fn parse_trace(path: &Path) -> Result<Vec<TraceLine>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.with_context(|| format!("failed to read {}:{line_no}", path.display()))?;
        if let Some(parsed) =
            parse_line(&line).with_context(|| format!("{}:{line_no}", path.display()))?
        {
            out.push(parsed);
        }
    }
    Ok(out)
}

/// One trace line; `None` for blank lines and `#` comments.
pub fn parse_line(line: &str) -> Result<Option<TraceLine>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    let parsed = match parts.as_slice() {
        ["touch", ms, action, pointers] => TraceLine::Touch(TouchSample {
            ms: parse_number(ms, "ms")?,
            action: parse_action(action)?,
            pointers: parse_pointers(pointers)?,
        }),
        ["tick", ms] => TraceLine::Tick {
            ms: parse_number(ms, "ms")?,
        },
        ["bounds", left, top, right, bottom] => TraceLine::Bounds(EdgeBounds::new(
            parse_number(left, "left")?,
            parse_number(top, "top")?,
            parse_number(right, "right")?,
            parse_number(bottom, "bottom")?,
        )),
        [kind, ..] => bail!("unrecognized trace line `{kind}` ({} columns)", parts.len()),
        [] => return Ok(None),
    };
    Ok(Some(parsed))
}

fn parse_action(raw: &str) -> Result<MotionAction> {
    let action = match raw {
        "down" => MotionAction::Down,
        "up" => MotionAction::Up,
        "move" => MotionAction::Move { index: 0 },
        "cancel" => MotionAction::Cancel { index: 0 },
        _ => {
            let (name, index) = raw
                .split_once('@')
                .ok_or_else(|| anyhow!("invalid action `{raw}`"))?;
            let index = parse_number(index, "pointer index")?;
            match name {
                "pointer_down" => MotionAction::PointerDown { index },
                "pointer_up" => MotionAction::PointerUp { index },
                "move" => MotionAction::Move { index },
                "cancel" => MotionAction::Cancel { index },
                _ => bail!("invalid action `{raw}`"),
            }
        }
    };
    Ok(action)
}

fn parse_pointers(raw: &str) -> Result<Vec<MotionPointer>> {
    raw.split(';')
        .map(|pointer| {
            let fields: Vec<&str> = pointer.split(':').map(str::trim).collect();
            let [id, x, y] = fields.as_slice() else {
                bail!("invalid pointer `{pointer}`, expected id:x:y");
            };
            Ok(MotionPointer {
                id: parse_number(id, "pointer id")?,
                x: parse_number(x, "x")?,
                y: parse_number(y, "y")?,
            })
        })
        .collect()
}

fn parse_number<T>(raw: &str, field: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("invalid {field} '{}'", raw.trim()))
}

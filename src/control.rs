//! Control-surface commands and their key bindings.
//!
//! Commands are queued by whatever front end is attached (key presses, or
//! lines on stdin in the headless binary) and applied by the session at the
//! next tick boundary.

use std::fmt;
use std::str::FromStr;

use crate::params::{DisplacementStrategy, Modulation, Shape};

/// Step applied to the Gray–Scott kill rate by Up/Down
pub const KILL_STEP: f32 = 0.001;

/// One queued control-surface action
///
/// Commands apply at the start of the next frame, in queue order, except
/// the two exports: they run once that frame has rendered, after every
/// edit queued with them has been committed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Rebuild the artifact geometry on the next frame
    Recreate,

    /// Write the frame just rendered
    ExportFrame,

    /// Write one full loop starting at the frame just rendered
    ExportSequence,
    SaveSettings,
    LoadSettings,
    ResetRotation,
    ResetScale,
    ToggleAnimation,
    ResetExtrusion,
    SelectModulation(Modulation),

    /// Save the camera into slot `1..=3`
    SaveCamera(usize),

    /// Restore the camera from slot `1..=3`
    RestoreCamera(usize),

    /// Set the feed rate to preset `1..=9`
    FeedPreset(u8),
    IncreaseKill,
    DecreaseKill,
    ResetReaction,
    SetShape(Shape),
    SetStrategy(DisplacementStrategy),
}

/// Key press as seen by the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
}

impl Command {
    /// Whether the command waits for the frame to render
    pub fn is_export(&self) -> bool {
        matches!(self, Command::ExportFrame | Command::ExportSequence)
    }

    /// Command bound to `key`, if any
    pub fn from_key(key: Key) -> Option<Command> {
        let command = match key {
            Key::Up => Command::IncreaseKill,
            Key::Down => Command::DecreaseKill,
            Key::Char(c) => match c.to_ascii_lowercase() {
                'a' => Command::SaveCamera(1),
                's' => Command::SaveCamera(2),
                'd' => Command::SaveCamera(3),
                'f' => Command::RestoreCamera(1),
                'g' => Command::RestoreCamera(2),
                'h' => Command::RestoreCamera(3),
                'r' => Command::ResetReaction,
                n @ '1'..='9' => Command::FeedPreset(n as u8 - b'0'),
                _ => return None,
            },
        };
        Some(command)
    }
}

fn parse_slot(arg: Option<&str>) -> Result<usize, String> {
    let slot = arg
        .ok_or_else(|| "missing camera slot".to_string())?
        .parse::<usize>()
        .map_err(|e| format!("bad camera slot: {}", e))?;
    if (1..=crate::camera::CAMERA_SLOTS).contains(&slot) {
        Ok(slot)
    } else {
        Err(format!("camera slot {} out of range", slot))
    }
}

/// Parse one line of textual control input
///
/// A single character is treated as a key press; anything else is a
/// command word followed by its argument, e.g. `shape sphere`.
impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let mut chars = line.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Command::from_key(Key::Char(c)).ok_or_else(|| format!("unbound key '{}'", c));
        }

        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| "empty command".to_string())?
            .to_lowercase()
            .replace('_', "-");
        let arg = words.next();

        let command = match verb.as_str() {
            "recreate" => Command::Recreate,
            "export" | "export-frame" => Command::ExportFrame,
            "export-sequence" => Command::ExportSequence,
            "save" => Command::SaveSettings,
            "load" => Command::LoadSettings,
            "reset-rotation" => Command::ResetRotation,
            "reset-scale" => Command::ResetScale,
            "animate" | "toggle-animation" => Command::ToggleAnimation,
            "reset-extrusion" => Command::ResetExtrusion,
            "modulation" => {
                Command::SelectModulation(arg.ok_or("missing modulation")?.parse()?)
            }
            "camera-save" => Command::SaveCamera(parse_slot(arg)?),
            "camera-load" => Command::RestoreCamera(parse_slot(arg)?),
            "feed" => {
                let n = arg
                    .ok_or("missing feed preset")?
                    .parse::<u8>()
                    .map_err(|e| format!("bad feed preset: {}", e))?;
                if !(1..=9).contains(&n) {
                    return Err(format!("feed preset {} out of range", n));
                }
                Command::FeedPreset(n)
            }
            "up" | "kill+" => Command::IncreaseKill,
            "down" | "kill-" => Command::DecreaseKill,
            "reset-reaction" => Command::ResetReaction,
            "shape" => {
                let kind = arg.ok_or("missing shape kind")?;
                Command::SetShape(
                    Shape::from_kind(kind).ok_or_else(|| format!("unknown shape '{}'", kind))?,
                )
            }
            "strategy" => Command::SetStrategy(arg.ok_or("missing strategy")?.parse()?),
            other => return Err(format!("unknown command '{}'", other)),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SelectModulation(m) => write!(f, "modulation {:?}", m),
            Command::SaveCamera(n) => write!(f, "camera-save {}", n),
            Command::RestoreCamera(n) => write!(f, "camera-load {}", n),
            Command::FeedPreset(n) => write!(f, "feed {}", n),
            Command::SetShape(shape) => write!(f, "shape {}", shape.kind()),
            Command::SetStrategy(strategy) => write!(f, "strategy {}", strategy),
            other => write!(f, "{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_keys() {
        assert_eq!(Command::from_key(Key::Char('a')), Some(Command::SaveCamera(1)));
        assert_eq!(Command::from_key(Key::Char('d')), Some(Command::SaveCamera(3)));
        assert_eq!(Command::from_key(Key::Char('F')), Some(Command::RestoreCamera(1)));
        assert_eq!(Command::from_key(Key::Char('h')), Some(Command::RestoreCamera(3)));
    }

    #[test]
    fn test_reaction_keys() {
        assert_eq!(Command::from_key(Key::Char('1')), Some(Command::FeedPreset(1)));
        assert_eq!(Command::from_key(Key::Char('9')), Some(Command::FeedPreset(9)));
        assert_eq!(Command::from_key(Key::Char('0')), None);
        assert_eq!(Command::from_key(Key::Up), Some(Command::IncreaseKill));
        assert_eq!(Command::from_key(Key::Down), Some(Command::DecreaseKill));
        assert_eq!(Command::from_key(Key::Char('r')), Some(Command::ResetReaction));
        assert_eq!(Command::from_key(Key::Char('z')), None);
    }

    #[test]
    fn test_parse_lines() {
        assert_eq!("recreate".parse(), Ok(Command::Recreate));
        assert_eq!(" export_sequence ".parse(), Ok(Command::ExportSequence));
        assert_eq!("s".parse(), Ok(Command::SaveCamera(2)));
        assert_eq!("camera-load 2".parse(), Ok(Command::RestoreCamera(2)));
        assert_eq!("feed 4".parse(), Ok(Command::FeedPreset(4)));
        assert_eq!(
            "modulation sine".parse(),
            Ok(Command::SelectModulation(Modulation::Sine))
        );
        assert_eq!(
            "strategy ripple".parse(),
            Ok(Command::SetStrategy(DisplacementStrategy::Ripple))
        );
        assert!(matches!(
            "shape sphere".parse::<Command>(),
            Ok(Command::SetShape(Shape::Sphere(_)))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("".parse::<Command>().is_err());
        assert!("x".parse::<Command>().is_err());
        assert!("camera-save 4".parse::<Command>().is_err());
        assert!("feed 0".parse::<Command>().is_err());
        assert!("shape teapot".parse::<Command>().is_err());
        assert!("strategy".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }
}

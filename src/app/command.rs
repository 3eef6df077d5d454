//! Line commands accepted on stdin by the headless driver.

use glam::{IVec3, Vec3};
use thiserror::Error;

use minicraft::{InputEvent, Key};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(InputEvent),
    /// Report what a ray would hit without changing anything.
    Look { origin: Vec3, direction: Vec3 },
    Get(IVec3),
    Top { x: i32, z: i32 },
    Count,
    Hotbar,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' expects {expected} arguments")]
    Arity {
        command: &'static str,
        expected: usize,
    },
    #[error("bad number '{0}'")]
    Number(String),
    #[error("unknown key '{0}'")]
    Key(String),
}

pub const HELP: &str = "\
commands:
  break x y z              remove the block at (x, y, z)
  place x y z nx ny nz     place the equipped block on a face
  breaklook ox oy oz dx dy dz / placelook ...   act on the block a ray hits
  look ox oy oz dx dy dz   report the block a ray hits
  select n | scroll d      change the hotbar slot (0-based / relative)
  key NAME | keyup NAME    press or release space, shift, ctrl, esc, q, 1-9
  tick dt                  advance movement by dt seconds
  get x y z | top x z | count | hotbar | help | quit";

fn numbers<T: std::str::FromStr>(
    command: &'static str,
    args: &[&str],
    expected: usize,
) -> Result<Vec<T>, ParseError> {
    if args.len() != expected {
        return Err(ParseError::Arity { command, expected });
    }
    args.iter()
        .map(|arg| arg.parse::<T>().map_err(|_| ParseError::Number(arg.to_string())))
        .collect()
}

fn ray(command: &'static str, args: &[&str]) -> Result<(Vec3, Vec3), ParseError> {
    let v = numbers::<f32>(command, args, 6)?;
    Ok((Vec3::new(v[0], v[1], v[2]), Vec3::new(v[3], v[4], v[5])))
}

fn key(args: &[&str], command: &'static str) -> Result<Key, ParseError> {
    match args {
        [name] => Key::from_name(name).ok_or_else(|| ParseError::Key(name.to_string())),
        _ => Err(ParseError::Arity {
            command,
            expected: 1,
        }),
    }
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut parts = line.split_whitespace();
    let name = parts.next().ok_or(ParseError::Empty)?;
    let args: Vec<&str> = parts.collect();

    let command = match name.to_ascii_lowercase().as_str() {
        "break" => {
            let v = numbers::<i32>("break", &args, 3)?;
            Command::Event(InputEvent::Break {
                target: IVec3::new(v[0], v[1], v[2]),
            })
        }
        "place" => {
            let v = numbers::<i32>("place", &args, 6)?;
            Command::Event(InputEvent::Place {
                target: IVec3::new(v[0], v[1], v[2]),
                normal: IVec3::new(v[3], v[4], v[5]),
            })
        }
        "breaklook" => {
            let (origin, direction) = ray("breaklook", &args)?;
            Command::Event(InputEvent::BreakLook { origin, direction })
        }
        "placelook" => {
            let (origin, direction) = ray("placelook", &args)?;
            Command::Event(InputEvent::PlaceLook { origin, direction })
        }
        "look" => {
            let (origin, direction) = ray("look", &args)?;
            Command::Look { origin, direction }
        }
        "select" => {
            let v = numbers::<usize>("select", &args, 1)?;
            Command::Event(InputEvent::SelectSlot(v[0]))
        }
        "scroll" => {
            let v = numbers::<i32>("scroll", &args, 1)?;
            Command::Event(InputEvent::CycleSlot(v[0]))
        }
        "key" => Command::Event(InputEvent::KeyDown(key(&args, "key")?)),
        "keyup" => Command::Event(InputEvent::KeyUp(key(&args, "keyup")?)),
        "tick" => {
            let v = numbers::<f32>("tick", &args, 1)?;
            Command::Event(InputEvent::Tick { dt: v[0] })
        }
        "get" => {
            let v = numbers::<i32>("get", &args, 3)?;
            Command::Get(IVec3::new(v[0], v[1], v[2]))
        }
        "top" => {
            let v = numbers::<i32>("top", &args, 2)?;
            Command::Top { x: v[0], z: v[1] }
        }
        "count" => Command::Count,
        "hotbar" => Command::Hotbar,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

use std::io::{self, Write};

use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::engine::{SimulationEngine, Snapshot};
use crate::input::Direction;

/// Invalid character in a target nudge script.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unexpected {found:?} at position {index} in nudge script (expected one of u, r, d, l, .)")]
pub struct ScriptError {
    pub index: usize,
    pub found: char,
}

/// Parses a per-tick nudge script: `u`/`r`/`d`/`l` nudge the target, `.` waits.
///
/// Whitespace is ignored.
pub fn parse_script(script: &str) -> Result<Vec<Option<Direction>>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(index, c)| match c.to_ascii_lowercase() {
            'u' => Ok(Some(Direction::Up)),
            'r' => Ok(Some(Direction::Right)),
            'd' => Ok(Some(Direction::Down)),
            'l' => Ok(Some(Direction::Left)),
            '.' => Ok(None),
            found => Err(ScriptError { index, found }),
        })
        .collect()
}

/// Runs the tick loop without a terminal, writing one JSON snapshot per line.
///
/// The start state is written first, then one line per tick. Nudge `i` is
/// applied just before tick `i + 1`. Stops when the simulation ends or after
/// `max_ticks` ticks, and returns the final snapshot.
pub fn run<R: Rng, W: Write>(
    engine: &mut SimulationEngine<R>,
    nudges: &[Option<Direction>],
    max_ticks: Option<u64>,
    out: &mut W,
) -> io::Result<Snapshot> {
    write_snapshot(out, &engine.snapshot())?;

    let mut ticks = 0_u64;
    while !engine.is_terminal() && max_ticks.is_none_or(|max| ticks < max) {
        let nudge = usize::try_from(ticks)
            .ok()
            .and_then(|index| nudges.get(index))
            .copied()
            .flatten();
        if let Some(direction) = nudge {
            engine.relocate_target(direction);
        }

        engine.step();
        ticks += 1;
        write_snapshot(out, &engine.snapshot())?;
    }

    out.flush()?;
    let last = engine.snapshot();
    info!(ticks, score = last.score, terminal = last.terminal, "headless run finished");
    Ok(last)
}

fn write_snapshot<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    serde_json::to_writer(&mut *out, snapshot)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    out.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::engine::{EndReason, SimulationEngine};
    use crate::input::Direction;

    use super::{parse_script, run, ScriptError};

    #[test]
    fn script_parses_nudges_and_waits() {
        assert_eq!(
            parse_script("u r.\nL"),
            Ok(vec![
                Some(Direction::Up),
                Some(Direction::Right),
                None,
                Some(Direction::Left),
            ])
        );
    }

    #[test]
    fn script_reports_the_offending_character() {
        assert_eq!(
            parse_script("ux"),
            Err(ScriptError {
                index: 1,
                found: 'x'
            })
        );
    }

    #[test]
    fn max_ticks_bounds_the_run() {
        let mut engine = SimulationEngine::new_with_seed(GridSize::square(10), 8);
        let mut out = Vec::new();

        let last = run(&mut engine, &[], Some(2), &mut out).expect("writing to a Vec succeeds");

        let text = String::from_utf8(out).expect("JSON output is UTF-8");
        assert_eq!(text.lines().count(), 3);
        assert_eq!(last.tick_count, 2);

        let first: serde_json::Value =
            serde_json::from_str(text.lines().next().expect("first line")).expect("valid JSON");
        assert_eq!(first["body"][0]["x"], 5);
        assert_eq!(first["target"]["y"], 2);
        assert_eq!(first["terminal"], false);
        assert_eq!(first["heading"], "up");
    }

    #[test]
    fn run_stops_at_the_terminal_state() {
        let mut engine = SimulationEngine::new_with_seed(GridSize::square(10), 8);
        // Pull the target below the snake: it keeps heading up into the wall.
        let nudges = vec![Some(Direction::Down); 8];
        let mut out = Vec::new();

        let last = run(&mut engine, &nudges, None, &mut out).expect("writing to a Vec succeeds");

        assert!(last.terminal);
        assert_eq!(last.end_reason, Some(EndReason::WallCollision));
        let text = String::from_utf8(out).expect("JSON output is UTF-8");
        let final_line: serde_json::Value =
            serde_json::from_str(text.lines().last().expect("last line")).expect("valid JSON");
        assert_eq!(final_line["end_reason"], "wall_collision");
    }
}

//! Scripted input for driving a `Viewer` without a window.
//!
//! A script is a comma separated list of steps:
//! ```text
//! forward:1.5        hold a movement key for 1.5 seconds
//! look:40:-20        relative mouse motion in pixels
//! zoom:2             scroll wheel lines (positive zooms in)
//! wait:0.5           advance frames without input
//! spin               toggle the crate spin
//! target:0:0:0       aim the camera at a point
//! ```

use anyhow::{Context, Result, bail};
use cratecam_camera::Direction;
use cratecam_input::{Action, Viewer};
use glam::Vec3;

/// Longest duration a single `hold` or `wait` step may cover, in seconds.
pub const MAX_STEP_SECONDS: f32 = 3600.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Hold(Direction, f32),
    Look { dx: f32, dy: f32 },
    Zoom(f32),
    Wait(f32),
    ToggleSpin,
    Target(Vec3),
}

fn number(field: Option<&str>, step: &str) -> Result<f32> {
    let field = field.with_context(|| format!("missing value in step {step:?}"))?;
    let value: f32 = field
        .trim()
        .parse()
        .with_context(|| format!("bad number {field:?} in step {step:?}"))?;
    if !value.is_finite() {
        bail!("non-finite value in step {step:?}");
    }
    Ok(value)
}

fn parse_step(step: &str) -> Result<Step> {
    let mut fields = step.split(':');
    let name = fields.next().unwrap_or_default().trim();

    let parsed = match name {
        "look" => Step::Look {
            dx: number(fields.next(), step)?,
            dy: number(fields.next(), step)?,
        },
        "zoom" => Step::Zoom(number(fields.next(), step)?),
        "wait" => Step::Wait(number(fields.next(), step)?),
        "spin" => Step::ToggleSpin,
        "target" => Step::Target(Vec3::new(
            number(fields.next(), step)?,
            number(fields.next(), step)?,
            number(fields.next(), step)?,
        )),
        other => {
            let direction: Direction = other.parse()?;
            Step::Hold(direction, number(fields.next(), step)?)
        }
    };

    if fields.next().is_some() {
        bail!("too many fields in step {step:?}");
    }
    if let Step::Hold(_, seconds) | Step::Wait(seconds) = parsed {
        check_duration(seconds).with_context(|| format!("in step {step:?}"))?;
    }
    Ok(parsed)
}

fn check_duration(seconds: f32) -> Result<()> {
    if !(0.0..=MAX_STEP_SECONDS).contains(&seconds) {
        bail!("duration {seconds} is outside [0, {MAX_STEP_SECONDS}] seconds");
    }
    Ok(())
}

/// Parse a comma separated script. Empty steps are skipped.
pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_step)
        .collect()
}

/// Advance `seconds` of simulated time in frames of `dt`; the last frame
/// takes whatever is left. Returns the number of frames run.
fn advance(viewer: &mut Viewer, seconds: f32, dt: f32) -> Result<u64> {
    check_duration(seconds)?;
    let frames = (seconds / dt).ceil() as u64;
    for frame in 1..=frames {
        let delta = if frame == frames {
            seconds - (frames - 1) as f32 * dt
        } else {
            dt
        };
        viewer.update(delta);
    }
    Ok(frames)
}

/// Run every step against `viewer` with a fixed frame delta.
/// Returns the total number of frames simulated.
pub fn run_script(viewer: &mut Viewer, steps: &[Step], dt: f32) -> Result<u64> {
    if !(dt > 0.0 && dt.is_finite()) {
        bail!("frame delta must be positive, got {dt}");
    }

    let mut frames = 0;
    for step in steps {
        tracing::debug!(?step, "running step");
        match *step {
            Step::Hold(direction, seconds) => {
                check_duration(seconds)?;
                viewer.apply(Action::Move(direction));
                frames += advance(viewer, seconds, dt)?;
                viewer.release(direction);
            }
            Step::Look { dx, dy } => viewer.apply(Action::Look { dx, dy }),
            Step::Zoom(lines) => viewer.apply(Action::Zoom(lines)),
            Step::Wait(seconds) => frames += advance(viewer, seconds, dt)?,
            Step::ToggleSpin => viewer.apply(Action::ToggleSpin),
            Step::Target(point) => viewer
                .camera_mut()
                .look_at(point)
                .with_context(|| format!("cannot aim at {point}"))?,
        }
    }
    Ok(frames)
}

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Args;
use scrubber_core::scroll::{
    InputEvent, InputSource, NavKey, ScrollLockController, ScrollSurface, ZoneGeometry,
};

use super::load_config;
use crate::summary::{print_replay_header, print_replay_row};

#[derive(Args)]
pub struct ReplayArgs {
    /// Input script, one event per line
    pub script: PathBuf,

    /// Total frames of the simulated sequence
    #[arg(long, default_value = "36")]
    pub total: u32,

    /// Top offset of the interaction section in page pixels
    #[arg(long, default_value = "1200")]
    pub section_top: f64,

    /// Viewport height in pixels
    #[arg(long, default_value = "800")]
    pub viewport_height: f64,

    /// Milliseconds of simulated time between consecutive events
    #[arg(long, default_value = "0")]
    pub step_ms: u64,

    /// TOML config file (scroll section is used)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// A scripted line: either an input event or a pause.
#[derive(Debug, PartialEq)]
enum ScriptLine {
    Event(InputEvent),
    Wait(Duration),
}

/// Page stand-in that tracks the scroll offset the controller pins to.
#[derive(Default)]
struct ScriptHost {
    scroll_y: f64,
}

impl InputSource for ScriptHost {
    fn subscribe(&mut self) {
        tracing::debug!("replay host subscribed");
    }

    fn unsubscribe(&mut self) {
        tracing::debug!("replay host unsubscribed");
    }
}

impl ScrollSurface for ScriptHost {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
    }
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read {}", args.script.display()))?;

    let mut controller = ScrollLockController::new(ScriptHost::default(), config.scroll);
    controller.sync(
        ZoneGeometry::new(args.section_top, args.viewport_height),
        args.total,
        args.total > 0,
    );

    let start = Instant::now();
    let mut elapsed = Duration::ZERO;

    print_replay_header();
    for (n, raw) in text.lines().enumerate() {
        let line = n + 1;
        let Some(parsed) = parse_line(raw).with_context(|| format!("line {line}"))? else {
            continue;
        };
        match parsed {
            ScriptLine::Wait(d) => elapsed += d,
            ScriptLine::Event(event) => {
                if let InputEvent::Scroll { scroll_y } = event {
                    controller.host_mut().scroll_y = scroll_y;
                }
                let disposition = controller.handle(event, start + elapsed);
                print_replay_row(
                    line,
                    raw.trim(),
                    &controller.state(),
                    controller.phase(),
                    controller.host().scroll_y,
                    disposition,
                );
                elapsed += Duration::from_millis(args.step_ms);
            }
        }
    }

    Ok(())
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
fn parse_line(raw: &str) -> Result<Option<ScriptLine>> {
    let line = raw.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let arg = parts.next();
    if parts.next().is_some() {
        bail!("too many arguments: {line}");
    }

    let number = |what: &str| -> Result<f64> {
        let value = arg.with_context(|| format!("{verb} needs a {what}"))?;
        value
            .parse::<f64>()
            .with_context(|| format!("invalid {what}: {value}"))
    };

    let parsed = match verb {
        "scroll" => ScriptLine::Event(InputEvent::Scroll {
            scroll_y: number("position")?,
        }),
        "wheel" => ScriptLine::Event(InputEvent::Wheel {
            delta_y: number("delta")?,
        }),
        "touch-start" => ScriptLine::Event(InputEvent::TouchStart { y: number("position")? }),
        "touch-move" => ScriptLine::Event(InputEvent::TouchMove { y: number("position")? }),
        "touch-end" => ScriptLine::Event(InputEvent::TouchEnd),
        "key" => {
            let key = match arg {
                Some("up") => NavKey::ArrowUp,
                Some("down") => NavKey::ArrowDown,
                Some("pageup") => NavKey::PageUp,
                Some("pagedown") => NavKey::PageDown,
                Some("space") => NavKey::Space,
                other => bail!("unknown key: {}", other.unwrap_or("<none>")),
            };
            ScriptLine::Event(InputEvent::Key(key))
        }
        "wait" => {
            let ms = number("duration")?;
            if !ms.is_finite() || ms < 0.0 {
                bail!("invalid wait: {ms}");
            }
            let duration = Duration::try_from_secs_f64(ms / 1000.0)
                .with_context(|| format!("invalid duration: {ms}"))?;
            ScriptLine::Wait(duration)
        }
        other => bail!("unknown event: {other}"),
    };
    Ok(Some(parsed))
}

use std::time::Duration;

use console::Style;
use scrubber_core::asset::AssetLayout;
use scrubber_core::probe::{FrameSet, ProbeOutcome};
use scrubber_core::scroll::{Disposition, Phase, ScrollState};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    good: Style,
    bad: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            bad: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_probe_summary(sequence: &str, layout: &AssetLayout, frames: &FrameSet, elapsed: Duration) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(format!("Sequence {sequence}")));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("First asset"),
        s.path.apply_to(layout.location(0))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(frames.total_frames)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Found"),
        s.value.apply_to(frames.found())
    );
    let outcome = match frames.outcome {
        ProbeOutcome::Completed => s.good.apply_to(frames.outcome.to_string()),
        _ => s.bad.apply_to(frames.outcome.to_string()),
    };
    println!("  {:<14}{}", s.label.apply_to("Outcome"), outcome);
    println!(
        "  {:<14}{}",
        s.label.apply_to("Status"),
        frames.status_text
    );
    println!(
        "  {:<14}{:.2}s",
        s.label.apply_to("Elapsed"),
        elapsed.as_secs_f64()
    );
    println!();
}

pub fn print_replay_header() {
    let s = Styles::new();
    println!(
        "{}",
        s.title.apply_to(format!(
            "{:>4}  {:<18} {:>6} {:>9} {:>8} {:>9} {:>8}",
            "Line", "Event", "Frame", "Phase", "Progress", "Scroll Y", "Default"
        ))
    );
    println!("{}", "-".repeat(70));
}

pub fn print_replay_row(
    line: usize,
    event: &str,
    state: &ScrollState,
    phase: Phase,
    scroll_y: f64,
    disposition: Disposition,
) {
    let s = Styles::new();
    let default = if disposition.prevent_default {
        s.bad.apply_to("blocked")
    } else {
        s.good.apply_to("native")
    };
    println!(
        "{:>4}  {:<18} {:>6} {:>9} {:>7.0}% {:>9.0} {:>8}",
        line,
        event,
        state.current_frame,
        phase.to_string(),
        state.progress * 100.0,
        scroll_y,
        default
    );
}

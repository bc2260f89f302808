//! Command implementations

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::app::AppContainer;
use crate::cli::args::{ClipArgs, ReadAnchorsArgs, SetHalfStartsArgs};
use crate::domain::errors::DomainError;
use crate::domain::model::{Anchor, ClipRange};
use crate::utils::time::{format_clock, parse_clock};

/// Execute the set-half-starts command
pub fn set_half_starts(container: &AppContainer, args: SetHalfStartsArgs) -> Result<()> {
    let first = parse_clock(&args.first_half_start)
        .with_context(|| format!("Invalid first half start '{}'", args.first_half_start))?;
    let second = parse_clock(&args.second_half_start)
        .with_context(|| format!("Invalid second half start '{}'", args.second_half_start))?;

    let output = args.output.as_deref().unwrap_or(&args.input);
    info!(input = %args.input.display(), output = %output.display(), "Setting half starts");

    container
        .anchor_interactor()
        .set_half_starts(&args.input, Some(output), first, second)
        .with_context(|| format!("Failed to write anchors to {}", output.display()))?;

    Ok(())
}

/// Execute the read-anchors command, printing to `out`
pub fn read_anchors(
    container: &AppContainer,
    args: ReadAnchorsArgs,
    out: &mut impl Write,
) -> Result<()> {
    let anchors = container
        .anchor_interactor()
        .read_anchors(&args.video)
        .with_context(|| format!("Failed to read anchors from {}", args.video.display()))?;

    print_anchors(&anchors, args.json, out)
}

/// Execute the clip command
pub fn clip(container: &AppContainer, args: ClipArgs) -> Result<()> {
    let ranges = args
        .ranges
        .iter()
        .map(|spec| parse_range(spec))
        .collect::<Result<Vec<_>, _>>()?;

    let clip_interactor = container.clip_interactor();
    let bytes = match ranges.as_slice() {
        [range] => clip_interactor.get_clip(&args.video, range),
        _ => clip_interactor.get_clips(&args.video, &ranges),
    }
    .with_context(|| format!("Failed to extract clips from {}", args.video.display()))?;

    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(output = %args.output.display(), bytes = bytes.len(), "Clip saved");
    Ok(())
}

/// Print anchors either as one line each or as a JSON array
pub fn print_anchors(anchors: &[Anchor], json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, anchors)
            .context("Failed to serialize anchors to JSON")?;
        writeln!(out)?;
        return Ok(());
    }

    if anchors.is_empty() {
        writeln!(out, "No anchors set for video")?;
    }

    for anchor in anchors {
        writeln!(out, "{}", format_anchor_line(anchor))?;
    }

    Ok(())
}

/// Human-readable anchor line, e.g. `Period 2 0:00 | 60:00 in video`
pub fn format_anchor_line(anchor: &Anchor) -> String {
    format!(
        "Period {} {} | {} in video",
        anchor.period(),
        format_clock(anchor.clock()),
        format_clock(anchor.video_time())
    )
}

/// Parse a `PERIOD@START-END` clip range
pub fn parse_range(spec: &str) -> Result<ClipRange, DomainError> {
    let invalid = || {
        DomainError::BadArgs(format!(
            "Invalid clip range '{}', expected PERIOD@START-END (e.g. 2@45:00-45:30)",
            spec
        ))
    };

    let (period, clocks) = spec.trim().split_once('@').ok_or_else(invalid)?;
    let (start, end) = clocks.split_once('-').ok_or_else(invalid)?;

    let period = period.trim().parse::<u32>().map_err(|_| invalid())?;
    if period == 0 {
        return Err(invalid());
    }
    let start_clock = parse_clock(start)?;
    let end_clock = parse_clock(end)?;

    if end_clock <= start_clock {
        return Err(DomainError::BadArgs(format!(
            "Clip range '{}' must end after it starts",
            spec
        )));
    }

    Ok(ClipRange::new(period, start_clock, end_clock))
}

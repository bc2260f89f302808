// Anchor codec - Anchors stored as container chapter metadata
//
// Anchors live in the video's own metadata as ffmetadata chapter blocks:
//
//     [CHAPTER]
//     TIMEBASE=1/1000
//     START=<video time in ms>
//     END=<START + 1>
//     title=Period <period>, <clock>
//
// Everything in this module is text manipulation; callers only ever see
// `Anchor` values.

use crate::domain::errors::DomainError;
use crate::domain::model::{Anchor, ChapterRecord};

/// Marker opening a chapter block in ffmetadata text
pub const CHAPTER_MARKER: &str = "[CHAPTER]";

const TITLE_PREFIX: &str = "Period ";
const TITLE_SEPARATOR: &str = ", ";

// ffmetadata assumes nanoseconds when a chapter omits its TIMEBASE
const DEFAULT_TIMEBASE: (i64, i64) = (1, 1_000_000_000);

/// Serializes anchors to and from chapter metadata
pub struct AnchorCodec;

impl AnchorCodec {
    /// Replace the chapter section of `existing_metadata` with one block per anchor.
    ///
    /// Blocks are emitted in input order. The output is deterministic.
    pub fn write(anchors: &[Anchor], existing_metadata: &str) -> String {
        let mut metadata = Self::strip_chapters(existing_metadata).to_string();

        for anchor in anchors {
            let start = Self::timestamp_ms(anchor.video_time());
            metadata.push_str(&format!(
                "\n\n{}\nTIMEBASE=1/1000\nSTART={}\nEND={}\ntitle={}",
                CHAPTER_MARKER,
                start,
                start + 1,
                Self::format_title(anchor)
            ));
        }

        metadata
    }

    /// Convert chapter records reported by the backend into anchors, preserving order
    pub fn read(records: &[ChapterRecord]) -> Result<Vec<Anchor>, DomainError> {
        records
            .iter()
            .map(|record| {
                let (period, clock) = Self::parse_title(&record.title)?;
                Anchor::new(period, clock, record.start_time)
            })
            .collect()
    }

    /// Metadata preceding the first chapter block; untouched when there is none
    pub fn strip_chapters(metadata: &str) -> &str {
        match metadata.find(CHAPTER_MARKER) {
            Some(index) => metadata[..index].trim(),
            None => metadata,
        }
    }

    /// Title carrying an anchor's period and clock
    pub fn format_title(anchor: &Anchor) -> String {
        // Debug formatting keeps the trailing `.0` and round-trips exactly
        format!(
            "{}{}{}{:?}",
            TITLE_PREFIX,
            anchor.period(),
            TITLE_SEPARATOR,
            anchor.clock()
        )
    }

    /// Parse a `Period {int}, {real}` title into `(period, clock)`
    pub fn parse_title(title: &str) -> Result<(u32, f64), DomainError> {
        let malformed = || DomainError::MalformedAnchorTitle {
            title: title.to_string(),
        };

        let parts: Vec<&str> = title.split(TITLE_SEPARATOR).collect();
        let [period_part, clock_part] = parts.as_slice() else {
            return Err(malformed());
        };

        let period = period_part
            .strip_prefix(TITLE_PREFIX)
            .ok_or_else(malformed)?
            .parse::<u32>()
            .map_err(|_| malformed())?;
        let clock = clock_part.parse::<f64>().map_err(|_| malformed())?;

        Ok((period, clock))
    }

    /// Read the chapter blocks back out of ffmetadata text
    pub fn chapters_from_metadata(metadata: &str) -> Result<Vec<ChapterRecord>, DomainError> {
        let mut chapters = Vec::new();
        let mut current: Option<ChapterBlock> = None;

        for line in metadata.lines() {
            let line = line.trim_end_matches('\r');
            if line.starts_with(';') || line.starts_with('#') || line.trim().is_empty() {
                continue;
            }

            if line.starts_with('[') {
                if let Some(block) = current.take() {
                    chapters.push(block.finish()?);
                }
                if line == CHAPTER_MARKER {
                    current = Some(ChapterBlock::default());
                }
                continue;
            }

            let Some(block) = current.as_mut() else {
                continue;
            };
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = unescape(value);

            match key {
                "TIMEBASE" => block.timebase = Some(parse_timebase(&value)?),
                "START" => {
                    block.start = Some(value.parse::<i64>().map_err(|_| {
                        DomainError::MalformedMetadata(format!("invalid START '{}'", value))
                    })?)
                }
                "title" => block.title = value,
                _ => {}
            }
        }

        if let Some(block) = current.take() {
            chapters.push(block.finish()?);
        }

        Ok(chapters)
    }

    // `Anchor::new` keeps the rounded value below `i64::MAX`
    fn timestamp_ms(seconds: f64) -> i64 {
        (seconds * 1000.0).round() as i64
    }
}

#[derive(Default)]
struct ChapterBlock {
    timebase: Option<(i64, i64)>,
    start: Option<i64>,
    title: String,
}

impl ChapterBlock {
    fn finish(self) -> Result<ChapterRecord, DomainError> {
        let start = self
            .start
            .ok_or_else(|| DomainError::MalformedMetadata("chapter without START".to_string()))?;
        let (num, den) = self.timebase.unwrap_or(DEFAULT_TIMEBASE);
        let start_time = start as f64 * num as f64 / den as f64;

        Ok(ChapterRecord::new(start_time, self.title))
    }
}

fn parse_timebase(value: &str) -> Result<(i64, i64), DomainError> {
    let invalid = || DomainError::MalformedMetadata(format!("invalid TIMEBASE '{}'", value));

    let (num, den) = value.split_once('/').ok_or_else(invalid)?;
    let num = num.trim().parse::<i64>().map_err(|_| invalid())?;
    let den = den.trim().parse::<i64>().map_err(|_| invalid())?;
    if den == 0 {
        return Err(invalid());
    }

    Ok((num, den))
}

// ffmetadata escapes '=', ';', '#', '\' and newlines with a backslash
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests;

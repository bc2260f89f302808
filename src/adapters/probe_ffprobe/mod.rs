//! FFprobe adapter for chapter probing
//!
//! Runs `ffprobe -show_error -show_chapters` and turns its JSON report into a
//! `ProbeReport`.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::domain::model::ChapterRecord;
use crate::error::{MatchVideoError, MatchVideoResult};
use crate::ports::ProbeReport;

const TOOL: &str = "ffprobe";

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    chapters: Vec<FfprobeChapter>,
    error: Option<FfprobeError>,
}

#[derive(Debug, Deserialize)]
struct FfprobeChapter {
    start_time: String,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeError {
    #[allow(dead_code)]
    code: Option<i64>,
    string: String,
}

/// Probe the chapters of `video` with the ffprobe binary at `ffprobe`
pub fn probe_chapters(ffprobe: &Path, video: &Path) -> MatchVideoResult<ProbeReport> {
    debug!(tool = TOOL, video = %video.display(), "Probing chapters");

    let output = Command::new(ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_error",
            "-show_chapters",
        ])
        .arg(video)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MatchVideoError::ToolNotFound {
                    tool: TOOL.to_string(),
                }
            } else {
                MatchVideoError::Io(e)
            }
        })?;

    // ffprobe exits non-zero when it reports an error, but the report itself is
    // still on stdout.
    let json_str = String::from_utf8(output.stdout)
        .map_err(|e| MatchVideoError::parse_error(TOOL, format!("Invalid UTF-8: {}", e)))?;

    if json_str.trim().is_empty() && !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MatchVideoError::backend_failed(TOOL, stderr.trim().to_string()));
    }

    parse_probe_output(&json_str)
}

/// Parse the JSON printed by `ffprobe -print_format json -show_error -show_chapters`
pub fn parse_probe_output(json_str: &str) -> MatchVideoResult<ProbeReport> {
    let output: FfprobeOutput = serde_json::from_str(json_str)
        .map_err(|e| MatchVideoError::parse_error(TOOL, e.to_string()))?;

    let chapters = output
        .chapters
        .into_iter()
        .map(|chapter| {
            let start_time = chapter.start_time.trim().parse::<f64>().map_err(|_| {
                MatchVideoError::parse_error(
                    TOOL,
                    format!("invalid chapter start_time '{}'", chapter.start_time),
                )
            })?;
            Ok(ChapterRecord::new(
                start_time,
                chapter.tags.title.unwrap_or_default(),
            ))
        })
        .collect::<MatchVideoResult<Vec<_>>>()?;

    Ok(ProbeReport {
        chapters,
        error: output.error.map(|e| e.string),
    })
}

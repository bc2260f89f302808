//! FFmpeg execution adapter
//!
//! This module implements the media backend on top of the `ffmpeg` and
//! `ffprobe` command-line tools. Every operation is a stream copy.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::NamedTempFile;

use tracing::debug;

use crate::adapters::probe_ffprobe;
use crate::adapters::toml_config::Config;
use crate::error::{MatchVideoError, MatchVideoResult};
use crate::ports::{MediaBackend, ProbeReport};
use crate::utils::time::format_cut_seconds;

const FFMPEG: &str = "ffmpeg";
const FFPROBE: &str = "ffprobe";

// Keep only the end of a failing tool's stderr in error messages
const STDERR_TAIL_LINES: usize = 5;

/// FFmpeg-based media backend
#[derive(Debug, Clone)]
pub struct FfmpegBackend {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
    temp_dir: Option<PathBuf>,
}

impl FfmpegBackend {
    /// Create a backend from configuration, resolving both tools
    pub fn new(config: &Config) -> MatchVideoResult<Self> {
        let ffmpeg = resolve_tool(FFMPEG, config.ffmpeg_path.as_deref())?;
        let ffprobe = resolve_tool(FFPROBE, config.ffprobe_path.as_deref())?;
        debug!(ffmpeg = %ffmpeg.display(), ffprobe = %ffprobe.display(), "Resolved media tools");

        Ok(Self::with_paths(ffmpeg, ffprobe).with_temp_dir(config.temp_dir.clone()))
    }

    /// Create a backend using the given tool paths as-is
    pub fn with_paths(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
            temp_dir: None,
        }
    }

    /// Place metadata and concat-list files under `temp_dir` instead of the system temp dir
    pub fn with_temp_dir(mut self, temp_dir: Option<PathBuf>) -> Self {
        self.temp_dir = temp_dir;
        self
    }

    /// Scratch text file handed to ffmpeg, removed on drop
    fn scratch_file(&self, prefix: &str) -> MatchVideoResult<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix).suffix(".txt");
        let file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        Ok(file)
    }

    /// Start an ffmpeg invocation that overwrites its output and only logs errors
    fn ffmpeg_command(&self) -> Command {
        let mut command = Command::new(&self.ffmpeg);
        command.args(["-hide_banner", "-loglevel", "error", "-y"]);
        command
    }

    fn run(&self, mut command: Command) -> MatchVideoResult<()> {
        debug!(command = ?command, "Running ffmpeg");

        let output = command.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MatchVideoError::ToolNotFound {
                    tool: FFMPEG.to_string(),
                }
            } else {
                MatchVideoError::Io(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MatchVideoError::backend_failed(
                FFMPEG,
                format!("{} ({})", stderr_tail(&stderr), output.status),
            ));
        }

        Ok(())
    }
}

impl MediaBackend for FfmpegBackend {
    fn probe(&self, video: &Path) -> MatchVideoResult<ProbeReport> {
        probe_ffprobe::probe_chapters(&self.ffprobe, video)
    }

    fn extract_metadata_text(&self, video: &Path) -> MatchVideoResult<String> {
        let metadata_file = self.scratch_file("match-video-metadata-")?;

        let mut command = self.ffmpeg_command();
        command
            .arg("-i")
            .arg(video)
            .args(["-f", "ffmetadata"])
            .arg(metadata_file.path());
        self.run(command)?;

        Ok(fs::read_to_string(metadata_file.path())?)
    }

    fn rewrite_with_metadata(
        &self,
        input: &Path,
        metadata: &str,
        output: &Path,
    ) -> MatchVideoResult<()> {
        let mut metadata_file = self.scratch_file("match-video-metadata-")?;
        metadata_file.write_all(metadata.as_bytes())?;
        metadata_file.flush()?;

        let mut command = self.ffmpeg_command();
        command
            .arg("-i")
            .arg(input)
            .arg("-i")
            .arg(metadata_file.path())
            .args([
                "-map",
                "0",
                "-map_metadata",
                "1",
                "-map_chapters",
                "1",
                "-codec",
                "copy",
            ])
            .arg(output);
        self.run(command)
    }

    fn strip_chapters(&self, input: &Path, output: &Path) -> MatchVideoResult<()> {
        let mut command = self.ffmpeg_command();
        command
            .arg("-i")
            .arg(input)
            .args([
                "-map",
                "0",
                "-vcodec",
                "copy",
                "-acodec",
                "copy",
                "-map_chapters",
                "-1",
            ])
            .arg(output);
        self.run(command)
    }

    fn cut_range(
        &self,
        input: &Path,
        output: &Path,
        start: f64,
        end: f64,
    ) -> MatchVideoResult<()> {
        let mut command = self.ffmpeg_command();
        command
            .arg("-ss")
            .arg(format_cut_seconds(start))
            .arg("-to")
            .arg(format_cut_seconds(end))
            .arg("-i")
            .arg(input)
            .args(["-map", "0", "-vcodec", "copy", "-acodec", "copy"])
            .arg(output);
        self.run(command)
    }

    fn concat(&self, inputs: &[PathBuf], output: &Path) -> MatchVideoResult<()> {
        let mut list_file = self.scratch_file("match-video-concat-")?;
        list_file.write_all(concat_list(inputs).as_bytes())?;
        list_file.flush()?;

        let mut command = self.ffmpeg_command();
        command
            .args(["-f", "concat", "-safe", "0", "-i"])
            .arg(list_file.path())
            .args(["-c", "copy"])
            .arg(output);
        self.run(command)
    }
}

/// Get the path to a tool, preferring a configured path over PATH lookup
pub fn resolve_tool(name: &str, configured: Option<&Path>) -> MatchVideoResult<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return which::which(path).map_err(|_| MatchVideoError::ToolNotFound {
            tool: path.display().to_string(),
        });
    }

    which::which(name).map_err(|_| MatchVideoError::ToolNotFound {
        tool: name.to_string(),
    })
}

/// Concat demuxer list with one `file '<path>'` line per input
fn concat_list(inputs: &[PathBuf]) -> String {
    inputs
        .iter()
        .map(|path| {
            let escaped = path.to_string_lossy().replace('\'', r"'\''");
            format!("file '{}'", escaped)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_list() {
        let inputs = vec![PathBuf::from("/tmp/a/clip-0000.mp4"), PathBuf::from("/tmp/a/clip-0001.mp4")];
        assert_eq!(
            concat_list(&inputs),
            "file '/tmp/a/clip-0000.mp4'\nfile '/tmp/a/clip-0001.mp4'"
        );
    }

    #[test]
    fn test_concat_list_escapes_quotes() {
        let inputs = vec![PathBuf::from("/tmp/it's/clip.mp4")];
        assert_eq!(concat_list(&inputs), r"file '/tmp/it'\''s/clip.mp4'");
    }

    #[test]
    fn test_stderr_tail() {
        let stderr = "1\n2\n3\n4\n5\n6\n7\n";
        assert_eq!(stderr_tail(stderr), "3\n4\n5\n6\n7");
        assert_eq!(stderr_tail(""), "");
    }

    #[test]
    fn test_resolve_missing_tool() {
        let result = resolve_tool("definitely_not_a_media_tool_12345", None);
        assert!(matches!(result, Err(MatchVideoError::ToolNotFound { .. })));
    }

    #[test]
    fn test_resolve_configured_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let resolved = resolve_tool(FFMPEG, Some(file.path())).unwrap();
        assert_eq!(resolved, file.path());
    }

    #[test]
    fn test_scratch_files_use_configured_temp_dir() {
        let root = tempfile::TempDir::new().unwrap();
        let backend = FfmpegBackend::with_paths(FFMPEG, FFPROBE)
            .with_temp_dir(Some(root.path().to_path_buf()));

        let scratch = backend.scratch_file("match-video-concat-").unwrap();
        assert_eq!(scratch.path().parent().unwrap(), root.path());

        let config = Config {
            ffmpeg_path: Some(scratch.path().to_path_buf()),
            ffprobe_path: Some(scratch.path().to_path_buf()),
            temp_dir: Some(root.path().to_path_buf()),
            ..Config::default()
        };
        let backend = FfmpegBackend::new(&config).unwrap();
        let scratch = backend.scratch_file("match-video-metadata-").unwrap();
        assert_eq!(scratch.path().parent().unwrap(), root.path());
    }

    #[test]
    fn test_missing_binary_is_tool_not_found() {
        let backend = FfmpegBackend::with_paths(
            "/nonexistent/bin/ffmpeg-12345",
            "/nonexistent/bin/ffprobe-12345",
        );
        let err = backend
            .strip_chapters(Path::new("in.mp4"), Path::new("out.mp4"))
            .unwrap_err();
        assert!(matches!(err, MatchVideoError::ToolNotFound { .. }));

        let err = backend.probe(Path::new("in.mp4")).unwrap_err();
        assert!(matches!(err, MatchVideoError::ToolNotFound { .. }));
    }
}

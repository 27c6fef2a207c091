//! Command line for turning the numbered frames into a video.
//!
//! The video itself is assembled by an external tool; this only describes
//! how to invoke it for the naming scheme written by [`super::sequence`].

use std::fmt;
use std::path::{Path, PathBuf};

use super::sequence::FRAME_EXTENSION;

/// Default playback rate of the assembled display.
pub const DEFAULT_FRAME_RATE: u32 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyHint {
    output_dir: PathBuf,
    frame_rate: u32,
}

impl AssemblyHint {
    pub fn new(output_dir: &Path, frame_rate: u32) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            frame_rate,
        }
    }

    /// `ffmpeg` arguments reading `1.png, 2.png, ...` at the configured rate.
    pub fn args(&self) -> Vec<String> {
        let pattern = self.output_dir.join(format!("%d.{FRAME_EXTENSION}"));
        let movie = self.output_dir.join("pointlight.mp4");
        vec![
            "-framerate".to_string(),
            self.frame_rate.to_string(),
            "-i".to_string(),
            pattern.display().to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            movie.display().to_string(),
        ]
    }

    /// The full command line, ready to paste into a shell.
    pub fn command(&self) -> String {
        format!("ffmpeg {}", self.args().join(" "))
    }
}

impl fmt::Display for AssemblyHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command())
    }
}

//! Remuxing of separate video and audio parts with ffmpeg.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};

/// ffmpeg prints this in its final report when the output was written.
const MUXING_MARKER: &str = "muxing overhead";

/// Combines one video part and one audio part into a single file.
#[async_trait]
pub trait Remuxer: Send + Sync {
    async fn remux(&self, video: &Path, audio: &Path, output: &Path) -> Result<()>;
}

/// Remuxer backed by the ffmpeg executable.
#[derive(Debug, Clone)]
pub struct FfmpegRemuxer {
    binary: PathBuf,
}

impl FfmpegRemuxer {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }
}

#[async_trait]
impl Remuxer for FfmpegRemuxer {
    async fn remux(&self, video: &Path, audio: &Path, output: &Path) -> Result<()> {
        let output_result = Command::new(&self.binary)
            .arg("-n")
            .arg("-i")
            .arg(video)
            .arg("-i")
            .arg(audio)
            .args(["-c", "copy", "-loglevel", "info"])
            .arg(output)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::FFmpegNotFound
                } else {
                    Error::FFmpeg(format!("Failed to run ffmpeg: {}", e))
                }
            })?;

        let mut report = String::from_utf8_lossy(&output_result.stdout).into_owned();
        report.push_str(&String::from_utf8_lossy(&output_result.stderr));
        tracing::debug!("ffmpeg output:\n{}", report);

        if !report.contains(MUXING_MARKER) {
            return Err(Error::FFmpeg(format!(
                "ffmpeg exited with status {} without writing '{}'",
                output_result.status,
                output.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repair::repair_location;

    #[cfg(unix)]
    fn write_script(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("ffmpeg");
        std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Writes its last argument and reports success like ffmpeg does.
    #[cfg(unix)]
    const MERGING_FFMPEG: &str = r#"for last; do :; done
echo merged > "$last"
echo "video:10kB audio:2kB subtitle:0kB other streams:0kB global headers:0kB muxing overhead: 0.4%" >&2
"#;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_marker_means_parts_are_replaced() {
        let bin = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Foo.f137.mp4"), b"v").unwrap();
        std::fs::write(dir.path().join("Foo.f140.m4a"), b"a").unwrap();

        let remuxer = FfmpegRemuxer::new(write_script(bin.path(), MERGING_FFMPEG));
        assert!(remuxer
            .remux(
                &dir.path().join("Foo.f137.mp4"),
                &dir.path().join("Foo.f140.m4a"),
                &dir.path().join("Check.mp4"),
            )
            .await
            .is_ok());
        std::fs::remove_file(dir.path().join("Check.mp4")).unwrap();

        assert_eq!(repair_location(dir.path(), &remuxer).await.unwrap(), 1);
        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Foo.mp4"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_marker_keeps_parts() {
        let bin = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Foo.f137.mp4"), b"v").unwrap();
        std::fs::write(dir.path().join("Foo.f140.m4a"), b"a").unwrap();

        let remuxer = FfmpegRemuxer::new(write_script(bin.path(), "echo 'nothing done'\nexit 0\n"));
        let err = remuxer
            .remux(
                &dir.path().join("Foo.f137.mp4"),
                &dir.path().join("Foo.f140.m4a"),
                &dir.path().join("Foo.mp4"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FFmpeg(_)));

        assert_eq!(repair_location(dir.path(), &remuxer).await.unwrap(), 0);
        assert!(dir.path().join("Foo.f137.mp4").exists());
        assert!(dir.path().join("Foo.f140.m4a").exists());
    }

    #[tokio::test]
    async fn test_missing_ffmpeg() {
        let remuxer = FfmpegRemuxer::new(PathBuf::from("/nonexistent/ffmpeg-binary"));
        let err = remuxer
            .remux(Path::new("a.mp4"), Path::new("a.m4a"), Path::new("out.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FFmpegNotFound));
    }
}

//! Download passes through the yt-dlp executable.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::sync::planner::Addressing;
use crate::ytdlp::events::{
    parse_output_line, DownloadObserver, OutputEvent, DOWNLOAD_TEMPLATE, POSTPROCESS_TEMPLATE,
};

/// Everything one download pass needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRequest {
    pub url: String,
    /// yt-dlp format selection.
    pub format: String,
    /// yt-dlp output template, relative to `root`.
    pub template: String,
    pub addressing: Addressing,
    /// Directory downloads are placed under.
    pub root: PathBuf,
}

/// Runs one download pass, reporting events to `observer`.
///
/// Failing items must not abort the pass; an `Err` means the pass could not
/// run at all.
#[async_trait]
pub trait DownloadExecutor: Send + Sync {
    async fn execute(&self, request: &PassRequest, observer: &mut dyn DownloadObserver)
        -> Result<()>;
}

/// Executor backed by the yt-dlp executable.
#[derive(Debug, Clone)]
pub struct YtDlpExecutor {
    binary: PathBuf,
}

impl YtDlpExecutor {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Command-line arguments for a pass.
    pub fn build_args(request: &PassRequest) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--newline".into(),
            "--no-colors".into(),
            "--ignore-errors".into(),
            "--progress-template".into(),
            DOWNLOAD_TEMPLATE.into(),
            "--progress-template".into(),
            POSTPROCESS_TEMPLATE.into(),
            "-f".into(),
            request.format.clone(),
            "-o".into(),
            request.template.clone(),
            "-P".into(),
            format!("home:{}", request.root.display()),
        ];

        match &request.addressing {
            Addressing::Indexes(indexes) => {
                let items: Vec<String> = indexes.iter().map(u32::to_string).collect();
                args.push("--playlist-items".into());
                args.push(items.join(","));
            }
            Addressing::DateAfter(date) => {
                args.push("--dateafter".into());
                args.push(date.format("%Y%m%d").to_string());
            }
            Addressing::FromStart => {
                args.push("--playlist-start".into());
                args.push("1".into());
            }
        }

        args.push(request.url.clone());
        args
    }
}

#[async_trait]
impl DownloadExecutor for YtDlpExecutor {
    async fn execute(
        &self,
        request: &PassRequest,
        observer: &mut dyn DownloadObserver,
    ) -> Result<()> {
        let args = Self::build_args(request);
        tracing::debug!("Running yt-dlp with parameters: {:?}", args);

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::YtDlpNotFound(self.binary.display().to_string())
                } else {
                    Error::Executor(format!("Failed to start yt-dlp: {}", e))
                }
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Executor("yt-dlp stdout unavailable".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Executor("yt-dlp stderr unavailable".into()))?;

        let read_stdout = for_each_line(stdout, |line| match parse_output_line(line) {
            Some(OutputEvent::Progress(progress)) => observer.on_progress(&progress),
            Some(OutputEvent::PostProcess(event)) => observer.on_postprocess(&event),
            None => tracing::debug!("yt-dlp: {}", line),
        });

        let read_stderr = for_each_line(stderr, |line| {
            if line.starts_with("ERROR:") {
                tracing::warn!("yt-dlp: {}", line);
            } else {
                tracing::debug!("yt-dlp: {}", line);
            }
        });

        let (stdout_result, stderr_result) = futures::join!(read_stdout, read_stderr);
        if let Err(e) = stdout_result.and(stderr_result) {
            tracing::warn!("Lost part of the yt-dlp output for '{}': {}", request.url, e);
        }

        let status = child.wait().await?;
        if !status.success() {
            // With --ignore-errors a non-zero status means some items failed.
            tracing::warn!(
                "yt-dlp exited with {} for '{}'; some items may have failed",
                status,
                request.url
            );
        }

        Ok(())
    }
}

/// Feed every line of `reader` to `handle`, decoding invalid UTF-8 lossily.
async fn for_each_line<R, F>(reader: R, mut handle: F) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    F: FnMut(&str),
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        handle(line.trim_end_matches(|c| c == '\n' || c == '\r'));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use crate::ytdlp::events::{DownloadProgress, PostProcessEvent, PostProcessTracker};

    fn request(addressing: Addressing) -> PassRequest {
        PassRequest {
            url: "https://www.youtube.com/playlist?list=PL1".to_string(),
            format: "bestaudio".to_string(),
            template: "./Audio/P/%(playlist_index)03d - %(title)s.%(ext)s".to_string(),
            addressing,
            root: PathBuf::from("/srv/music"),
        }
    }

    fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }

    #[test]
    fn test_indexes_addressing() {
        let args = YtDlpExecutor::build_args(&request(Addressing::Indexes(vec![2, 4, 9])));
        assert_eq!(flag_value(&args, "--playlist-items"), Some("2,4,9"));
        assert_eq!(flag_value(&args, "-f"), Some("bestaudio"));
        assert_eq!(flag_value(&args, "-P"), Some("home:/srv/music"));
        assert_eq!(
            args.last().map(String::as_str),
            Some("https://www.youtube.com/playlist?list=PL1")
        );
    }

    #[test]
    fn test_date_addressing() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        let args = YtDlpExecutor::build_args(&request(Addressing::DateAfter(date)));
        assert_eq!(flag_value(&args, "--dateafter"), Some("20240209"));
        assert!(!args.contains(&"--playlist-items".to_string()));
    }

    #[test]
    fn test_from_start_addressing() {
        let args = YtDlpExecutor::build_args(&request(Addressing::FromStart));
        assert_eq!(flag_value(&args, "--playlist-start"), Some("1"));
        assert!(args.contains(&"--ignore-errors".to_string()));
    }

    struct Nothing;

    impl DownloadObserver for Nothing {
        fn on_progress(&mut self, _: &DownloadProgress) {}
        fn on_postprocess(&mut self, _: &PostProcessEvent) {}
    }

    /// Collects successes the way the sync loop does for a primary pass.
    struct Collect(PostProcessTracker);

    impl DownloadObserver for Collect {
        fn on_progress(&mut self, _: &DownloadProgress) {}
        fn on_postprocess(&mut self, event: &PostProcessEvent) {
            self.0.record(event);
        }
    }

    #[cfg(unix)]
    fn write_script(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_undecodable_output_does_not_abort_pass() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            dir.path(),
            "yt-dlp",
            r"echo 'AYDL_PP|Merger|finished|1'
echo 'AYDL_PP|MoveFiles|finished|1'
printf 'Caf\351.mp4\n'
printf 'ERROR: Caf\351 is unavailable\n' >&2
echo 'AYDL_PP|Merger|finished|2'
echo 'AYDL_PP|MoveFiles|finished|2'
exit 1
",
        );

        let executor = YtDlpExecutor::new(script);
        let mut observer = Collect(PostProcessTracker::new(true));
        let result = executor
            .execute(&request(Addressing::FromStart), &mut observer)
            .await;

        assert!(result.is_ok());
        assert_eq!(observer.0.into_successes(), BTreeSet::from([1, 2]));
    }

    #[tokio::test]
    async fn test_lines_are_decoded_lossily() {
        let input: &[u8] = b"first\r\nCaf\xe9\nlast";
        let mut lines = Vec::new();
        for_each_line(input, |line| lines.push(line.to_string()))
            .await
            .unwrap();
        assert_eq!(lines, vec!["first", "Caf\u{FFFD}", "last"]);
    }

    #[tokio::test]
    async fn test_missing_binary_is_reported() {
        let executor = YtDlpExecutor::new(PathBuf::from("/nonexistent/yt-dlp-binary"));
        let err = executor
            .execute(&request(Addressing::FromStart), &mut Nothing)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::YtDlpNotFound(_)));
    }
}

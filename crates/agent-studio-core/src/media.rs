//! Turns uploaded files into inline media parts.
//!
//! Images are sent as-is. Videos are reduced to one JPEG frame taken at the
//! temporal midpoint of the clip; the two decode stages (load metadata, seek
//! and capture) run as one future bounded by a single timeout.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use agent_studio_harness::InlineData;
use tokio::process::Command;
use tracing::debug;

use crate::catalog::InputKind;

/// MIME type of captured video frames.
pub const FRAME_MIME_TYPE: &str = "image/jpeg";

/// Errors from reading or decoding user media.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MediaError {
    #[error("could not read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
    #[error("file is empty: {}", .0.display())]
    EmptyFile(PathBuf),
    #[error("{0} input cannot be encoded as media")]
    UnsupportedKind(InputKind),
    #[error("{0} not found on PATH; please install FFmpeg")]
    ToolMissing(&'static str),
    #[error("could not load video metadata: {0}")]
    Metadata(String),
    #[error("video has no usable duration ({0:?})")]
    InvalidDuration(Option<f64>),
    #[error("could not capture video frame: {0}")]
    Frame(String),
    #[error("video frame capture produced no image data")]
    EmptyFrame,
    #[error("video frame extraction did not finish within {0:?}")]
    Timeout(Duration),
}

/// Binary payload plus MIME type, ready to be embedded in a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaPart {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl MediaPart {
    pub fn to_inline_data(&self) -> InlineData {
        InlineData::from_bytes(self.mime_type.clone(), &self.bytes)
    }
}

/// A user-selected file and its declared MIME type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    pub path: PathBuf,
    pub mime_type: String,
}

impl UploadedFile {
    pub fn new(path: impl Into<PathBuf>, mime_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Declares the MIME type from the file extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime_type = guess_mime_type(&path).to_string();
        Self { path, mime_type }
    }
}

/// Best-effort MIME type from a file extension.
pub fn guess_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}

/// Decode pipeline used to sample a still frame from a video.
#[async_trait::async_trait]
pub trait FrameSource: Send + Sync {
    /// Loads the clip metadata and returns its duration in seconds, if known.
    async fn duration(&self, path: &Path) -> Result<Option<f64>, MediaError>;

    /// Seeks to `at_seconds` and returns that frame encoded as JPEG.
    async fn capture_jpeg(&self, path: &Path, at_seconds: f64) -> Result<Vec<u8>, MediaError>;
}

/// `FrameSource` backed by the `ffprobe` and `ffmpeg` binaries.
#[derive(Clone, Debug, Default)]
pub struct FfmpegFrameSource;

impl FfmpegFrameSource {
    fn tool(name: &'static str) -> Result<PathBuf, MediaError> {
        which::which(name).map_err(|_| MediaError::ToolMissing(name))
    }
}

#[async_trait::async_trait]
impl FrameSource for FfmpegFrameSource {
    async fn duration(&self, path: &Path) -> Result<Option<f64>, MediaError> {
        let ffprobe = Self::tool("ffprobe")?;
        let out = Command::new(ffprobe)
            .arg("-v")
            .arg("error")
            .arg("-show_entries")
            .arg("format=duration")
            .arg("-of")
            .arg("default=noprint_wrappers=1:nokey=1")
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| MediaError::Metadata(e.to_string()))?;
        if !out.status.success() {
            return Err(MediaError::Metadata(
                String::from_utf8_lossy(&out.stderr).trim().to_string(),
            ));
        }
        Ok(String::from_utf8_lossy(&out.stdout).trim().parse().ok())
    }

    async fn capture_jpeg(&self, path: &Path, at_seconds: f64) -> Result<Vec<u8>, MediaError> {
        let ffmpeg = Self::tool("ffmpeg")?;
        let out = Command::new(ffmpeg)
            .arg("-v")
            .arg("error")
            .arg("-ss")
            .arg(format!("{at_seconds:.3}"))
            .arg("-i")
            .arg(path)
            .arg("-frames:v")
            .arg("1")
            .arg("-f")
            .arg("image2")
            .arg("-vcodec")
            .arg("mjpeg")
            .arg("pipe:1")
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| MediaError::Frame(e.to_string()))?;
        if !out.status.success() {
            return Err(MediaError::Frame(
                String::from_utf8_lossy(&out.stderr).trim().to_string(),
            ));
        }
        Ok(out.stdout)
    }
}

/// Converts uploaded files into `MediaPart`s.
#[derive(Clone)]
pub struct MediaEncoder {
    frames: Arc<dyn FrameSource>,
    frame_timeout: Duration,
}

impl MediaEncoder {
    pub fn new(frames: Arc<dyn FrameSource>, frame_timeout: Duration) -> Self {
        Self {
            frames,
            frame_timeout,
        }
    }

    /// Encoder using the FFmpeg command line tools for video.
    pub fn with_ffmpeg(frame_timeout: Duration) -> Self {
        Self::new(Arc::new(FfmpegFrameSource), frame_timeout)
    }

    /// Encodes `file` according to the accepted input kind of its task.
    pub async fn encode(
        &self,
        file: &UploadedFile,
        kind: InputKind,
    ) -> Result<MediaPart, MediaError> {
        match kind {
            InputKind::Image => self.encode_image(file).await,
            InputKind::Video => self.encode_video_frame(&file.path).await,
            InputKind::Text => Err(MediaError::UnsupportedKind(kind)),
        }
    }

    async fn encode_image(&self, file: &UploadedFile) -> Result<MediaPart, MediaError> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| MediaError::Read {
                path: file.path.clone(),
                message: e.to_string(),
            })?;
        if bytes.is_empty() {
            return Err(MediaError::EmptyFile(file.path.clone()));
        }
        debug!(
            event = "media.image_encoded",
            domain = "media",
            bytes = bytes.len() as u64,
            mime_type = file.mime_type.as_str()
        );
        Ok(MediaPart {
            bytes,
            mime_type: file.mime_type.clone(),
        })
    }

    async fn encode_video_frame(&self, path: &Path) -> Result<MediaPart, MediaError> {
        match tokio::time::timeout(self.frame_timeout, self.capture_midpoint(path)).await {
            Ok(result) => result,
            Err(_) => Err(MediaError::Timeout(self.frame_timeout)),
        }
    }

    async fn capture_midpoint(&self, path: &Path) -> Result<MediaPart, MediaError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(MediaError::Read {
                path: path.to_path_buf(),
                message: "file does not exist".to_string(),
            });
        }
        let duration = self.frames.duration(path).await?;
        let seconds = match duration {
            Some(d) if d.is_finite() && d > 0.0 => d,
            other => return Err(MediaError::InvalidDuration(other)),
        };
        let at_seconds = seconds / 2.0;
        let bytes = self.frames.capture_jpeg(path, at_seconds).await?;
        if bytes.is_empty() {
            return Err(MediaError::EmptyFrame);
        }
        debug!(
            event = "media.frame_captured",
            domain = "media",
            duration_s = seconds,
            at_s = at_seconds,
            bytes = bytes.len() as u64
        );
        Ok(MediaPart {
            bytes,
            mime_type: FRAME_MIME_TYPE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::sync::Mutex;

    enum Stage {
        Ready(Vec<u8>),
        Stall,
    }

    struct FakeFrames {
        duration: Option<f64>,
        capture: Stage,
        seeks: Mutex<Vec<f64>>,
    }

    impl FakeFrames {
        fn new(duration: Option<f64>, capture: Stage) -> Arc<Self> {
            Arc::new(Self {
                duration,
                capture,
                seeks: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl FrameSource for FakeFrames {
        async fn duration(&self, _path: &Path) -> Result<Option<f64>, MediaError> {
            Ok(self.duration)
        }

        async fn capture_jpeg(&self, _path: &Path, at_seconds: f64) -> Result<Vec<u8>, MediaError> {
            self.seeks.lock().expect("lock").push(at_seconds);
            match &self.capture {
                Stage::Ready(bytes) => Ok(bytes.clone()),
                Stage::Stall => std::future::pending().await,
            }
        }
    }

    fn temp_file(bytes: &[u8], suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("tempfile");
        file.write_all(bytes).expect("write");
        file
    }

    #[tokio::test]
    async fn image_is_read_with_declared_mime_type() {
        let file = temp_file(b"\x89PNG", ".png");
        let encoder =
            MediaEncoder::new(FakeFrames::new(None, Stage::Stall), Duration::from_secs(1));
        let part = encoder
            .encode(&UploadedFile::from_path(file.path()), InputKind::Image)
            .await
            .expect("image");
        assert_eq!(part.mime_type, "image/png");
        assert_eq!(part.bytes, b"\x89PNG");
        assert_eq!(part.to_inline_data().data, "iVBORw==");
    }

    #[tokio::test]
    async fn unreadable_image_fails() {
        let encoder =
            MediaEncoder::new(FakeFrames::new(None, Stage::Stall), Duration::from_secs(1));
        let err = encoder
            .encode(
                &UploadedFile::new("/definitely/not/here.jpg", "image/jpeg"),
                InputKind::Image,
            )
            .await
            .expect_err("missing file");
        assert!(matches!(err, MediaError::Read { .. }));
    }

    #[tokio::test]
    async fn empty_image_fails() {
        let file = temp_file(b"", ".jpg");
        let encoder =
            MediaEncoder::new(FakeFrames::new(None, Stage::Stall), Duration::from_secs(1));
        let err = encoder
            .encode(&UploadedFile::from_path(file.path()), InputKind::Image)
            .await
            .expect_err("empty file");
        assert!(matches!(err, MediaError::EmptyFile(_)));
    }

    #[tokio::test]
    async fn video_frame_is_taken_at_half_duration() {
        let file = temp_file(b"video", ".mp4");
        let frames = FakeFrames::new(Some(12.0), Stage::Ready(vec![0xff, 0xd8]));
        let encoder = MediaEncoder::new(frames.clone(), Duration::from_secs(5));
        let part = encoder
            .encode(&UploadedFile::from_path(file.path()), InputKind::Video)
            .await
            .expect("frame");
        assert_eq!(part.mime_type, FRAME_MIME_TYPE);
        assert_eq!(part.bytes, vec![0xff, 0xd8]);
        assert_eq!(*frames.seeks.lock().expect("lock"), vec![6.0]);
    }

    #[tokio::test]
    async fn zero_or_missing_duration_fails_without_seeking() {
        let file = temp_file(b"video", ".mp4");
        for duration in [Some(0.0), None, Some(f64::NAN)] {
            let frames = FakeFrames::new(duration, Stage::Ready(vec![1]));
            let encoder = MediaEncoder::new(frames.clone(), Duration::from_secs(5));
            let err = encoder
                .encode(&UploadedFile::from_path(file.path()), InputKind::Video)
                .await
                .expect_err("no duration");
            assert!(matches!(err, MediaError::InvalidDuration(_)));
            assert!(frames.seeks.lock().expect("lock").is_empty());
        }
    }

    #[tokio::test]
    async fn empty_frame_fails() {
        let file = temp_file(b"video", ".mp4");
        let encoder = MediaEncoder::new(
            FakeFrames::new(Some(4.0), Stage::Ready(Vec::new())),
            Duration::from_secs(5),
        );
        let err = encoder
            .encode(&UploadedFile::from_path(file.path()), InputKind::Video)
            .await
            .expect_err("empty frame");
        assert_eq!(err, MediaError::EmptyFrame);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_seek_times_out_instead_of_hanging() {
        let file = temp_file(b"video", ".mp4");
        let encoder = MediaEncoder::new(
            FakeFrames::new(Some(10.0), Stage::Stall),
            Duration::from_millis(250),
        );
        let err = encoder
            .encode(&UploadedFile::from_path(file.path()), InputKind::Video)
            .await
            .expect_err("timeout");
        assert_eq!(err, MediaError::Timeout(Duration::from_millis(250)));
    }

    #[tokio::test]
    async fn text_kind_is_not_media() {
        let encoder =
            MediaEncoder::new(FakeFrames::new(None, Stage::Stall), Duration::from_secs(1));
        let err = encoder
            .encode(&UploadedFile::new("notes.txt", "text/plain"), InputKind::Text)
            .await
            .expect_err("text");
        assert_eq!(err, MediaError::UnsupportedKind(InputKind::Text));
    }

    #[test]
    fn mime_guess_covers_common_media() {
        assert_eq!(guess_mime_type(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(guess_mime_type(Path::new("clip.mov")), "video/quicktime");
        assert_eq!(guess_mime_type(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn ffmpeg_captures_midpoint_frame_when_installed() {
        let (Ok(ffmpeg), Ok(_)) = (which::which("ffmpeg"), which::which("ffprobe")) else {
            eprintln!("skipping ffmpeg frame test (ffmpeg/ffprobe missing)");
            return;
        };
        let dir = tempfile::tempdir().expect("tempdir");
        let clip = dir.path().join("clip.mp4");
        let status = tokio::process::Command::new(ffmpeg)
            .args(["-v", "error", "-f", "lavfi", "-i", "testsrc=duration=2:size=64x48:rate=10"])
            .arg(&clip)
            .status()
            .await
            .expect("run ffmpeg");
        if !status.success() {
            eprintln!("skipping ffmpeg frame test (could not synthesize clip)");
            return;
        }

        let part = MediaEncoder::with_ffmpeg(Duration::from_secs(30))
            .encode(&UploadedFile::from_path(&clip), InputKind::Video)
            .await
            .expect("frame");
        assert_eq!(part.mime_type, FRAME_MIME_TYPE);
        assert_eq!(&part.bytes[..2], &[0xff, 0xd8]);
    }
}

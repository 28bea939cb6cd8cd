use std::path::PathBuf;
use std::time::Instant;

/// Platform the URL is expected to come from. Informational only: shown in
/// the UI, never consulted when resolving download options (yt-dlp detects
/// the extractor itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformHint {
    #[default]
    AutoDetect,
    YouTube,
    Vimeo,
    Facebook,
    Instagram,
    TikTok,
    Other,
}

impl PlatformHint {
    pub const ALL: [PlatformHint; 7] = [
        PlatformHint::AutoDetect,
        PlatformHint::YouTube,
        PlatformHint::Vimeo,
        PlatformHint::Facebook,
        PlatformHint::Instagram,
        PlatformHint::TikTok,
        PlatformHint::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlatformHint::AutoDetect => "Auto Detect",
            PlatformHint::YouTube => "YouTube",
            PlatformHint::Vimeo => "Vimeo",
            PlatformHint::Facebook => "Facebook",
            PlatformHint::Instagram => "Instagram",
            PlatformHint::TikTok => "TikTok",
            PlatformHint::Other => "Other Video Sites",
        }
    }
}

/// How many items of a playlist/collection to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLimit {
    Single,
    FirstN(u32),
    All,
}

impl Default for ItemLimit {
    fn default() -> Self {
        Self::FirstN(5)
    }
}

impl ItemLimit {
    pub const CHOICES: [ItemLimit; 5] = [
        ItemLimit::FirstN(5),
        ItemLimit::FirstN(10),
        ItemLimit::FirstN(20),
        ItemLimit::All,
        ItemLimit::Single,
    ];

    pub fn label(&self) -> String {
        match self {
            ItemLimit::Single => "Single Item Only".to_string(),
            ItemLimit::FirstN(n) => format!("First {} Items", n),
            ItemLimit::All => "Entire Playlist/Collection".to_string(),
        }
    }
}

/// What to download from each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    #[default]
    VideoAndAudio,
    VideoOnly,
    AudioMp3,
    AudioWav,
    Thumbnail,
}

impl MediaType {
    pub const ALL: [MediaType; 5] = [
        MediaType::VideoAndAudio,
        MediaType::VideoOnly,
        MediaType::AudioMp3,
        MediaType::AudioWav,
        MediaType::Thumbnail,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MediaType::VideoAndAudio => "Video + Audio",
            MediaType::VideoOnly => "Video Only (Highest Quality)",
            MediaType::AudioMp3 => "Audio Only (MP3)",
            MediaType::AudioWav => "Audio Only (WAV)",
            MediaType::Thumbnail => "Thumbnail/Cover",
        }
    }
}

/// Upper bound on video resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityCeiling {
    #[default]
    Best,
    Uhd4k,
    P1080,
    P720,
    P480,
    P360,
}

impl QualityCeiling {
    pub const ALL: [QualityCeiling; 6] = [
        QualityCeiling::Best,
        QualityCeiling::Uhd4k,
        QualityCeiling::P1080,
        QualityCeiling::P720,
        QualityCeiling::P480,
        QualityCeiling::P360,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QualityCeiling::Best => "Best Available",
            QualityCeiling::Uhd4k => "4K",
            QualityCeiling::P1080 => "1080p",
            QualityCeiling::P720 => "720p",
            QualityCeiling::P480 => "480p",
            QualityCeiling::P360 => "360p",
        }
    }

    /// Maximum stream height in pixels, or `None` for no ceiling.
    pub fn max_height(&self) -> Option<u32> {
        match self {
            QualityCeiling::Best => None,
            QualityCeiling::Uhd4k => Some(2160),
            QualityCeiling::P1080 => Some(1080),
            QualityCeiling::P720 => Some(720),
            QualityCeiling::P480 => Some(480),
            QualityCeiling::P360 => Some(360),
        }
    }
}

/// Directory structure under the destination root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutPolicy {
    #[default]
    ByPlatform,
    ByDate,
    ByContentType,
    Flat,
}

impl LayoutPolicy {
    pub const ALL: [LayoutPolicy; 4] = [
        LayoutPolicy::ByPlatform,
        LayoutPolicy::ByDate,
        LayoutPolicy::ByContentType,
        LayoutPolicy::Flat,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LayoutPolicy::ByPlatform => "Platform",
            LayoutPolicy::ByDate => "Date",
            LayoutPolicy::ByContentType => "Content Type",
            LayoutPolicy::Flat => "No Subfolders",
        }
    }
}

/// Everything the user picked in the downloader form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selections {
    pub url: String,
    pub platform: PlatformHint,
    pub item_limit: ItemLimit,
    pub media_type: MediaType,
    pub quality: QualityCeiling,
    pub destination: PathBuf,
    pub layout: LayoutPolicy,
}

/// Which items of the result set to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSelection {
    Single,
    Range { first: u32, last: u32 },
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCodec {
    Mp3,
    Wav,
}

impl AudioCodec {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCodec::Mp3 => "mp3",
            AudioCodec::Wav => "wav",
        }
    }
}

/// Action applied after raw retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcessing {
    None,
    ExtractAudio {
        codec: AudioCodec,
        bitrate: Option<u32>,
    },
    /// Fetch only the thumbnail artifact; the media payload is skipped.
    ThumbnailOnly,
}

/// Resolved, immutable job configuration handed to the runner.
#[derive(Debug, Clone, PartialEq)]
pub struct JobConfig {
    pub url: String,
    /// yt-dlp format selector. Derived, never shown to the user.
    pub format: String,
    pub items: ItemSelection,
    pub output_template: String,
    pub post: PostProcessing,
}

/// Normalized event stream produced on the worker thread.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    Progress {
        /// 0.0 to 100.0.
        percent: f32,
        downloaded: String,
        speed: String,
        eta: String,
    },
    Completed {
        items: usize,
    },
    Failed {
        message: String,
    },
}

impl JobEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobEvent::Completed { .. } | JobEvent::Failed { .. })
    }
}

/// Lifecycle of the single in-flight job, owned by the supervisor and only
/// ever written on the interactive thread.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Running {
        started_at: Instant,
    },
    Succeeded {
        items: usize,
    },
    Failed {
        message: String,
    },
}

impl JobState {
    pub fn is_running(&self) -> bool {
        matches!(self, JobState::Running { .. })
    }
}

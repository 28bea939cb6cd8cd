//! Maps the user's selections to a [`JobConfig`].
//!
//! Pure and total: every field has a default and nothing here performs I/O
//! or fails. The mapping mirrors yt-dlp's format-selector and post-processor
//! semantics.

use crate::models::{
    AudioCodec, ItemLimit, ItemSelection, JobConfig, LayoutPolicy, MediaType, PostProcessing,
    QualityCeiling, Selections,
};

/// Final path segment of every output template.
const TITLE_SEGMENT: &str = "%(title)s.%(ext)s";

pub fn resolve(selections: &Selections) -> JobConfig {
    let mut format = match selections.media_type {
        MediaType::VideoOnly => "bestvideo".to_string(),
        MediaType::AudioMp3 | MediaType::AudioWav => "bestaudio/best".to_string(),
        MediaType::Thumbnail => "thumbnail".to_string(),
        MediaType::VideoAndAudio => "bestvideo+bestaudio/best".to_string(),
    };

    let post = match selections.media_type {
        MediaType::AudioMp3 => PostProcessing::ExtractAudio {
            codec: AudioCodec::Mp3,
            bitrate: Some(192),
        },
        MediaType::AudioWav => PostProcessing::ExtractAudio {
            codec: AudioCodec::Wav,
            bitrate: None,
        },
        MediaType::Thumbnail => PostProcessing::ThumbnailOnly,
        MediaType::VideoAndAudio | MediaType::VideoOnly => PostProcessing::None,
    };

    // A height ceiling constrains whatever selector the media type produced.
    // Thumbnails have no height to constrain.
    if selections.media_type != MediaType::Thumbnail {
        if let Some(height) = selections.quality.max_height() {
            format.push_str(&format!("[height<={}]", height));
        }
    }

    // Single-item mode wins over any range.
    let items = match selections.item_limit {
        ItemLimit::Single => ItemSelection::Single,
        ItemLimit::FirstN(n) => ItemSelection::Range { first: 1, last: n },
        ItemLimit::All => ItemSelection::All,
    };

    let subdir = match selections.layout {
        LayoutPolicy::ByPlatform => Some("%(extractor_key)s"),
        LayoutPolicy::ByDate => Some("%(upload_date>%Y-%m-%d)s"),
        LayoutPolicy::ByContentType => Some("%(content_type)s"),
        LayoutPolicy::Flat => None,
    };

    let mut template = selections.destination.clone();
    if let Some(segment) = subdir {
        template.push(segment);
    }
    template.push(TITLE_SEGMENT);

    JobConfig {
        url: selections.url.trim().to_string(),
        format,
        items,
        output_template: template.to_string_lossy().into_owned(),
        post,
    }
}

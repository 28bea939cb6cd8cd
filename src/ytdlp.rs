//! Production [`MediaFetcher`] that shells out to the yt-dlp binary.
//!
//! Progress is read line by line from stdout using `--progress-template`
//! with a recognizable prefix; stderr is collected for the failure message.

use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use anyhow::{anyhow, Context};

use crate::models::{ItemSelection, JobConfig, PostProcessing};
use crate::runner::{FetchOutcome, MediaFetcher, RawProgress, RawStatus};

const PROGRESS_PREFIX: &str = "PROGRESS:";
const PROGRESS_TEMPLATE: &str = "PROGRESS:%(progress.status)s|%(progress._percent_str)s|%(progress._downloaded_bytes_str)s|%(progress._speed_str)s|%(progress._eta_str)s|%(progress.info_dict.playlist_index)s";

pub struct YtDlpFetcher {
    binary: PathBuf,
}

impl YtDlpFetcher {
    /// Looks the binary up on PATH. Called before a job starts so a missing
    /// installation is reported in the UI instead of failing the job.
    pub fn locate() -> anyhow::Result<Self> {
        let binary = which::which("yt-dlp")
            .context("yt-dlp not found. Please install it and make sure it's in your PATH")?;
        Ok(Self { binary })
    }

    fn command(&self, config: &JobConfig) -> Command {
        let mut command = Command::new(&self.binary);
        command.args(build_args(config));
        command
    }
}

impl MediaFetcher for YtDlpFetcher {
    fn fetch(
        &self,
        config: &JobConfig,
        on_progress: &mut dyn FnMut(RawProgress),
    ) -> anyhow::Result<FetchOutcome> {
        let mut command = self.command(config);
        log::debug!("running {:?}", command);

        let mut child = command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("failed to launch yt-dlp")?;

        // Drain stderr on its own thread so neither pipe can fill up and
        // stall the child.
        let stderr = child.stderr.take().context("failed to capture stderr")?;
        let stderr_reader = thread::spawn(move || {
            let mut buf = String::new();
            let mut reader = BufReader::new(stderr);
            let _ = reader.read_to_string(&mut buf);
            buf
        });

        let stdout = child.stdout.take().context("failed to capture stdout")?;
        let mut items = ItemTally::default();
        for line in BufReader::new(stdout).lines() {
            let line = line.context("failed to read yt-dlp output")?;
            if let Some(parsed) = parse_progress_line(&line) {
                items.record(&parsed);
                on_progress(parsed.raw);
            }
        }

        let status = child.wait().context("failed to wait for yt-dlp")?;
        let stderr_text = stderr_reader.join().unwrap_or_default();

        if !status.success() {
            let message = stderr_text.trim();
            if message.is_empty() {
                return Err(anyhow!("yt-dlp exited with {}", status));
            }
            return Err(anyhow!("{}", message));
        }

        Ok(FetchOutcome {
            // Thumbnail-only jobs skip the payload and finish nothing.
            entry_count: items.entry_count(),
        })
    }
}

/// One parsed `--progress-template` line: the raw callback plus the playlist
/// index of the entry it belongs to (`NA` outside playlists).
struct ProgressLine {
    raw: RawProgress,
    item: Option<String>,
}

/// Counts distinct entries that finished downloading. Merged formats such as
/// `bestvideo+bestaudio` emit one `finished` status per stream, so statuses
/// sharing a playlist index must count as one item.
#[derive(Default)]
struct ItemTally {
    seen: HashSet<String>,
}

impl ItemTally {
    fn record(&mut self, line: &ProgressLine) {
        if line.raw.status == RawStatus::Finished {
            let item = line.item.clone().unwrap_or_else(|| "NA".to_string());
            self.seen.insert(item);
        }
    }

    fn entry_count(&self) -> Option<usize> {
        (!self.seen.is_empty()).then(|| self.seen.len())
    }
}

/// Translates a resolved configuration into the yt-dlp argument list.
/// The URL always comes last.
fn build_args(config: &JobConfig) -> Vec<String> {
    let mut args = vec![
        "--newline".to_string(),
        "--progress".to_string(),
        "--progress-template".to_string(),
        PROGRESS_TEMPLATE.to_string(),
        "-o".to_string(),
        config.output_template.clone(),
    ];

    match config.items {
        ItemSelection::Single => args.push("--no-playlist".to_string()),
        ItemSelection::Range { first, last } => {
            args.push("--playlist-items".to_string());
            args.push(format!("{}-{}", first, last));
        }
        ItemSelection::All => {}
    }

    match config.post {
        PostProcessing::ExtractAudio { codec, bitrate } => {
            args.push("-f".to_string());
            args.push(config.format.clone());
            args.push("-x".to_string());
            args.push("--audio-format".to_string());
            args.push(codec.as_str().to_string());
            if let Some(bitrate) = bitrate {
                args.push("--audio-quality".to_string());
                args.push(format!("{}K", bitrate));
            }
        }
        PostProcessing::ThumbnailOnly => {
            args.push("--skip-download".to_string());
            args.push("--write-thumbnail".to_string());
        }
        PostProcessing::None => {
            args.push("-f".to_string());
            args.push(config.format.clone());
        }
    }

    args.push(config.url.clone());
    args
}

/// Parses one `--progress-template` line. Anything without the prefix is
/// ordinary yt-dlp chatter and is ignored.
fn parse_progress_line(line: &str) -> Option<ProgressLine> {
    let rest = line.strip_prefix(PROGRESS_PREFIX)?;
    let mut fields = rest.splitn(6, '|');

    let status = match fields.next()?.trim() {
        "downloading" => RawStatus::Downloading,
        "finished" => RawStatus::Finished,
        _ => RawStatus::Other,
    };

    let mut field = || {
        fields
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let raw = RawProgress {
        status,
        percent: field(),
        downloaded: field(),
        speed: field(),
        eta: field(),
    };
    Some(ProgressLine { raw, item: field() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AudioCodec;

    fn config(items: ItemSelection, post: PostProcessing) -> JobConfig {
        JobConfig {
            url: "https://example.com/v".to_string(),
            format: "bestvideo+bestaudio/best".to_string(),
            items,
            output_template: "/tmp/%(title)s.%(ext)s".to_string(),
            post,
        }
    }

    #[test]
    fn default_job_passes_format_and_template() {
        let args = build_args(&config(ItemSelection::All, PostProcessing::None));
        assert!(args.windows(2).any(|w| w[0] == "-o" && w[1] == "/tmp/%(title)s.%(ext)s"));
        assert!(args
            .windows(2)
            .any(|w| w[0] == "-f" && w[1] == "bestvideo+bestaudio/best"));
        assert!(!args.contains(&"--no-playlist".to_string()));
        assert!(!args.contains(&"--playlist-items".to_string()));
        assert_eq!(args.last().unwrap(), "https://example.com/v");
    }

    #[test]
    fn single_item_disables_playlist_expansion() {
        let args = build_args(&config(ItemSelection::Single, PostProcessing::None));
        assert!(args.contains(&"--no-playlist".to_string()));
    }

    #[test]
    fn range_selects_playlist_items() {
        let args = build_args(&config(
            ItemSelection::Range { first: 1, last: 5 },
            PostProcessing::None,
        ));
        assert!(args
            .windows(2)
            .any(|w| w[0] == "--playlist-items" && w[1] == "1-5"));
    }

    #[test]
    fn mp3_extraction_carries_target_bitrate() {
        let args = build_args(&config(
            ItemSelection::All,
            PostProcessing::ExtractAudio {
                codec: AudioCodec::Mp3,
                bitrate: Some(192),
            },
        ));
        assert!(args.contains(&"-x".to_string()));
        assert!(args
            .windows(2)
            .any(|w| w[0] == "--audio-format" && w[1] == "mp3"));
        assert!(args
            .windows(2)
            .any(|w| w[0] == "--audio-quality" && w[1] == "192K"));
    }

    #[test]
    fn wav_extraction_omits_quality() {
        let args = build_args(&config(
            ItemSelection::All,
            PostProcessing::ExtractAudio {
                codec: AudioCodec::Wav,
                bitrate: None,
            },
        ));
        assert!(args
            .windows(2)
            .any(|w| w[0] == "--audio-format" && w[1] == "wav"));
        assert!(!args.contains(&"--audio-quality".to_string()));
    }

    #[test]
    fn thumbnail_skips_payload_and_format_selection() {
        let args = build_args(&config(ItemSelection::All, PostProcessing::ThumbnailOnly));
        assert!(args.contains(&"--skip-download".to_string()));
        assert!(args.contains(&"--write-thumbnail".to_string()));
        assert!(!args.contains(&"-f".to_string()));
    }

    #[test]
    fn parses_downloading_progress_line() {
        let line =
            parse_progress_line("PROGRESS:downloading|  42.3%|   1.21MiB|500.00KiB/s|00:12|NA")
                .unwrap();
        assert_eq!(line.raw.status, RawStatus::Downloading);
        assert_eq!(line.raw.percent.as_deref(), Some("42.3%"));
        assert_eq!(line.raw.downloaded.as_deref(), Some("1.21MiB"));
        assert_eq!(line.raw.speed.as_deref(), Some("500.00KiB/s"));
        assert_eq!(line.raw.eta.as_deref(), Some("00:12"));
        assert_eq!(line.item.as_deref(), Some("NA"));
    }

    #[test]
    fn parses_finished_status_with_playlist_index() {
        let line = parse_progress_line("PROGRESS:finished|100%|3.4MiB|||2").unwrap();
        assert_eq!(line.raw.status, RawStatus::Finished);
        assert_eq!(line.raw.speed, None);
        assert_eq!(line.raw.eta, None);
        assert_eq!(line.item.as_deref(), Some("2"));
    }

    #[test]
    fn unknown_status_maps_to_other() {
        let line = parse_progress_line("PROGRESS:error|||||").unwrap();
        assert_eq!(line.raw.status, RawStatus::Other);
    }

    #[test]
    fn ignores_ordinary_output_lines() {
        assert!(parse_progress_line("[download] Destination: /tmp/clip.mp4").is_none());
        assert!(parse_progress_line("").is_none());
    }

    fn finished_line(item: &str) -> ProgressLine {
        parse_progress_line(&format!("PROGRESS:finished|100%|3.4MiB|||{}", item)).unwrap()
    }

    #[test]
    fn merged_format_streams_of_one_video_count_once() {
        // bestvideo+bestaudio finishes two files for the same non-playlist
        // item; both carry playlist index NA.
        let mut tally = ItemTally::default();
        tally.record(&finished_line("NA"));
        tally.record(&finished_line("NA"));
        assert_eq!(tally.entry_count(), Some(1));
    }

    #[test]
    fn playlist_entries_count_distinct_indices() {
        let mut tally = ItemTally::default();
        for index in ["1", "1", "2", "2", "3"] {
            tally.record(&finished_line(index));
        }
        // In-flight updates never count, whatever entry they belong to.
        tally.record(
            &parse_progress_line("PROGRESS:downloading|10%|1MiB|1MiB/s|00:01|4").unwrap(),
        );
        assert_eq!(tally.entry_count(), Some(3));
    }

    #[test]
    fn missing_item_field_counts_as_single_entry() {
        let line = parse_progress_line("PROGRESS:finished|100%|3.4MiB||").unwrap();
        assert_eq!(line.item, None);
        let mut tally = ItemTally::default();
        tally.record(&line);
        tally.record(&line);
        assert_eq!(tally.entry_count(), Some(1));
    }

    #[test]
    fn nothing_finished_reports_no_entry_count() {
        assert_eq!(ItemTally::default().entry_count(), None);
    }
}

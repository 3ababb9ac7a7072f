//! Async tone playback service.
//!
//! [`SonificationService::start`] spawns a tokio task that receives
//! [`ToneRequest`]s, renders them on a blocking thread and hands the samples
//! to a [`ToneSink`]. Outcomes come back as [`PlaybackEvent`]s over an `mpsc`
//! channel so the TUI event loop never waits on audio.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::sonification::ToneSpec;
use hound::{SampleFormat, WavSpec, WavWriter};
use tokio::sync::mpsc;

use crate::voices::VoiceRegistry;

/// Pending requests buffered before `try_send` starts rejecting clicks.
const REQUEST_BUFFER: usize = 16;

// ── ToneSink ──────────────────────────────────────────────────────────────────

/// Destination for rendered tones.
pub trait ToneSink: Send + 'static {
    /// Accept one rendered tone. Returns where it ended up.
    fn write(
        &mut self,
        index: usize,
        tone: &ToneSpec,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<PathBuf>;
}

// ── WavToneSink ───────────────────────────────────────────────────────────────

/// Writes each tone as a 16-bit mono WAV file named
/// `<index>-<brand-slug>.wav` inside `dir`.
#[derive(Debug, Clone)]
pub struct WavToneSink {
    dir: PathBuf,
}

impl WavToneSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(index: usize, brand: &str) -> String {
        format!("{index}-{}.wav", slugify(brand))
    }
}

impl ToneSink for WavToneSink {
    fn write(
        &mut self,
        index: usize,
        tone: &ToneSpec,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::file_name(index, &tone.brand));

        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let audio_err = |e: hound::Error| DashboardError::AudioRender(e.to_string());

        let mut writer = WavWriter::create(&path, spec).map_err(audio_err)?;
        for sample in samples {
            let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(value).map_err(audio_err)?;
        }
        writer.finalize().map_err(audio_err)?;

        Ok(path)
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes.
fn slugify(brand: &str) -> String {
    let mut slug = String::with_capacity(brand.len());
    for ch in brand.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("brand");
    }
    slug
}

// ── Messages ──────────────────────────────────────────────────────────────────

/// Ask the service to voice one brand.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneRequest {
    /// Position of the brand in the sorted summary list.
    pub index: usize,
    pub tone: ToneSpec,
}

/// Outcome reported back to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// The audio context came up: before the first tone, and again after a
    /// render worker crashed.
    ContextStarted { sample_rate: u32 },
    /// A tone was rendered and written.
    Rendered {
        index: usize,
        brand: String,
        path: PathBuf,
        duration: Duration,
    },
    /// Rendering or writing failed.
    Failed {
        index: usize,
        brand: String,
        error: String,
    },
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render one request and hand it to the sink.
///
/// A poisoned sink lock is taken over as-is: the sink outlives a panicking
/// render and keeps serving later requests.
fn play<S: ToneSink>(
    voices: &mut VoiceRegistry,
    sink: &Mutex<S>,
    request: &ToneRequest,
) -> Result<PathBuf> {
    let samples = voices.render(&request.tone);
    let sample_rate = voices.sample_rate();
    let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
    sink.write(request.index, &request.tone, &samples, sample_rate)
}

// ── SonificationService ───────────────────────────────────────────────────────

/// Background tone renderer.
pub struct SonificationService<S> {
    sample_rate: u32,
    sink: S,
}

impl<S: ToneSink> SonificationService<S> {
    pub fn new(sample_rate: u32, sink: S) -> Self {
        Self { sample_rate, sink }
    }

    /// Spawn the playback loop.
    ///
    /// Returns the request sender, the event receiver and a handle that can
    /// abort the loop. The loop also ends once every sender is dropped.
    pub fn start(
        self,
    ) -> (
        mpsc::Sender<ToneRequest>,
        mpsc::Receiver<PlaybackEvent>,
        PlaybackHandle,
    ) {
        let (request_tx, request_rx) = mpsc::channel(REQUEST_BUFFER);
        let (event_tx, event_rx) = mpsc::channel(REQUEST_BUFFER);

        let handle = tokio::spawn(async move {
            self.playback_loop(request_rx, event_tx).await;
        });

        (request_tx, event_rx, PlaybackHandle { handle })
    }

    // ── Private implementation ────────────────────────────────────────────

    async fn playback_loop(
        self,
        mut requests: mpsc::Receiver<ToneRequest>,
        events: mpsc::Sender<PlaybackEvent>,
    ) {
        let sample_rate = self.sample_rate;
        let sink = Arc::new(Mutex::new(self.sink));
        // The audio context: built on the first request, rebuilt after a
        // render worker dies with it.
        let mut context: Option<VoiceRegistry> = None;

        while let Some(request) = requests.recv().await {
            let voices = match context.take() {
                Some(voices) => voices,
                None => {
                    tracing::info!(sample_rate, "starting audio context");
                    if events
                        .send(PlaybackEvent::ContextStarted { sample_rate })
                        .await
                        .is_err()
                    {
                        break;
                    }
                    VoiceRegistry::new(sample_rate)
                }
            };

            let job = request.clone();
            let shared = Arc::clone(&sink);
            let joined = tokio::task::spawn_blocking(move || {
                let mut voices = voices;
                let outcome = play(&mut voices, &shared, &job);
                (voices, outcome)
            })
            .await;

            let event = match joined {
                Ok((voices, Ok(path))) => {
                    context = Some(voices);
                    tracing::debug!(path = %path.display(), "tone rendered");
                    PlaybackEvent::Rendered {
                        index: request.index,
                        brand: request.tone.brand,
                        path,
                        duration: request.tone.duration,
                    }
                }
                Ok((voices, Err(e))) => {
                    context = Some(voices);
                    tracing::warn!(error = %e, "tone render failed");
                    PlaybackEvent::Failed {
                        index: request.index,
                        brand: request.tone.brand,
                        error: e.to_string(),
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "audio worker panicked; context restarts on next request");
                    PlaybackEvent::Failed {
                        index: request.index,
                        brand: request.tone.brand,
                        error: e.to_string(),
                    }
                }
            };

            if events.send(event).await.is_err() {
                tracing::debug!("playback event channel closed; exiting loop");
                break;
            }
        }
    }
}

// ── PlaybackHandle ────────────────────────────────────────────────────────────

/// A handle to the background playback task.
pub struct PlaybackHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl PlaybackHandle {
    /// Immediately abort the playback loop.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::sonification::{gain_db, Timbre};
    use tempfile::TempDir;

    fn tone(brand: &str) -> ToneSpec {
        ToneSpec {
            brand: brand.to_string(),
            frequency_hz: 440.0,
            gain_db: gain_db(0.5),
            timbre: Timbre::Triangle,
            duration: Duration::from_millis(100),
        }
    }

    /// Records what it was given instead of touching the filesystem.
    #[derive(Clone, Default)]
    struct RecordingSink {
        written: Arc<Mutex<Vec<(usize, usize)>>>,
        fail: bool,
    }

    impl ToneSink for RecordingSink {
        fn write(
            &mut self,
            index: usize,
            tone: &ToneSpec,
            samples: &[f32],
            _sample_rate: u32,
        ) -> Result<PathBuf> {
            if self.fail {
                return Err(DashboardError::AudioRender("sink offline".to_string()));
            }
            self.written.lock().unwrap().push((index, samples.len()));
            Ok(PathBuf::from(format!("{index}-{}", tone.brand)))
        }
    }

    /// Panics on its first write, then behaves.
    #[derive(Default)]
    struct FlakySink {
        calls: usize,
    }

    impl ToneSink for FlakySink {
        fn write(
            &mut self,
            index: usize,
            _tone: &ToneSpec,
            _samples: &[f32],
            _sample_rate: u32,
        ) -> Result<PathBuf> {
            self.calls += 1;
            if self.calls == 1 {
                panic!("device vanished mid-write");
            }
            Ok(PathBuf::from(format!("{index}.wav")))
        }
    }

    async fn next_event(rx: &mut mpsc::Receiver<PlaybackEvent>) -> PlaybackEvent {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for playback event")
            .expect("playback channel closed")
    }

    // ── slugify / file names ──────────────────────────────────────────────

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Acme Co."), "acme-co");
        assert_eq!(slugify("  Bolt & Sons "), "bolt-sons");
        assert_eq!(slugify("!!!"), "brand");
        assert_eq!(slugify("Zed42"), "zed42");
    }

    #[test]
    fn test_wav_file_name() {
        assert_eq!(WavToneSink::file_name(3, "Acme Co."), "3-acme-co.wav");
    }

    // ── WavToneSink ───────────────────────────────────────────────────────

    #[test]
    fn test_wav_sink_writes_mono_16_bit() {
        let dir = TempDir::new().unwrap();
        let mut sink = WavToneSink::new(dir.path().join("audio"));
        let samples = vec![0.0_f32, 0.5, -0.5, 1.5];

        let path = sink.write(0, &tone("Acme"), &samples, 8_000).unwrap();
        assert_eq!(path, dir.path().join("audio").join("0-acme.wav"));

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 8_000);
        assert_eq!(spec.bits_per_sample, 16);

        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read.len(), 4);
        assert_eq!(read[0], 0);
        assert_eq!(read[1], (0.5 * i16::MAX as f32) as i16);
        assert_eq!(read[3], i16::MAX);
    }

    // ── SonificationService ───────────────────────────────────────────────

    #[tokio::test]
    async fn test_context_starts_once() {
        let sink = RecordingSink::default();
        let written = sink.written.clone();
        let (tx, mut rx, handle) = SonificationService::new(8_000, sink).start();

        tx.send(ToneRequest { index: 0, tone: tone("A") }).await.unwrap();
        tx.send(ToneRequest { index: 1, tone: tone("B") }).await.unwrap();

        assert_eq!(
            next_event(&mut rx).await,
            PlaybackEvent::ContextStarted { sample_rate: 8_000 }
        );
        let first = next_event(&mut rx).await;
        assert!(matches!(first, PlaybackEvent::Rendered { index: 0, .. }));
        let second = next_event(&mut rx).await;
        assert!(matches!(second, PlaybackEvent::Rendered { index: 1, .. }));

        // 100 ms at 8 kHz.
        assert_eq!(*written.lock().unwrap(), vec![(0, 800), (1, 800)]);
        handle.abort();
    }

    #[tokio::test]
    async fn test_sink_failure_is_reported() {
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let (tx, mut rx, handle) = SonificationService::new(8_000, sink).start();
        tx.send(ToneRequest { index: 2, tone: tone("C") }).await.unwrap();

        next_event(&mut rx).await;
        match next_event(&mut rx).await {
            PlaybackEvent::Failed { index, brand, error } => {
                assert_eq!(index, 2);
                assert_eq!(brand, "C");
                assert!(error.contains("sink offline"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        handle.abort();
    }

    #[tokio::test]
    async fn test_context_restarts_after_worker_panic() {
        let (tx, mut rx, handle) = SonificationService::new(8_000, FlakySink::default()).start();
        tx.send(ToneRequest { index: 0, tone: tone("A") }).await.unwrap();
        tx.send(ToneRequest { index: 1, tone: tone("B") }).await.unwrap();

        assert_eq!(
            next_event(&mut rx).await,
            PlaybackEvent::ContextStarted { sample_rate: 8_000 }
        );
        assert!(matches!(
            next_event(&mut rx).await,
            PlaybackEvent::Failed { index: 0, .. }
        ));
        assert_eq!(
            next_event(&mut rx).await,
            PlaybackEvent::ContextStarted { sample_rate: 8_000 }
        );
        match next_event(&mut rx).await {
            PlaybackEvent::Rendered { index, path, .. } => {
                assert_eq!(index, 1);
                assert_eq!(path, PathBuf::from("1.wav"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        handle.abort();
    }

    #[tokio::test]
    async fn test_wav_service_end_to_end() {
        let dir = TempDir::new().unwrap();
        let (tx, mut rx, handle) =
            SonificationService::new(8_000, WavToneSink::new(dir.path())).start();
        tx.send(ToneRequest { index: 0, tone: tone("Acme") }).await.unwrap();

        next_event(&mut rx).await;
        match next_event(&mut rx).await {
            PlaybackEvent::Rendered { path, duration, .. } => {
                assert!(path.exists());
                assert_eq!(duration, Duration::from_millis(100));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        handle.abort();
    }

    #[tokio::test]
    async fn test_loop_ends_when_senders_dropped() {
        let (tx, _rx, handle) =
            SonificationService::new(8_000, RecordingSink::default()).start();
        drop(tx);
        tokio::time::timeout(Duration::from_secs(5), async {
            while !handle.is_finished() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("playback loop did not exit");
    }
}

//! Oscillator voices, one per timbre.
//!
//! A [`Voice`] turns a [`ToneSpec`] into mono `f32` samples in `[-1, 1]`.
//! The [`VoiceRegistry`] builds voices on first use and reuses them.

use std::collections::HashMap;
use std::f64::consts::TAU;

use dashboard_core::sonification::{Timbre, ToneSpec};

/// Fade-in length applied to every tone.
const ATTACK_SECS: f64 = 0.005;
/// Fade-out length applied to every tone.
const RELEASE_SECS: f64 = 0.02;

// ── Voice ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    timbre: Timbre,
    sample_rate: u32,
}

impl Voice {
    pub fn new(timbre: Timbre, sample_rate: u32) -> Self {
        Self { timbre, sample_rate }
    }

    pub fn timbre(&self) -> Timbre {
        self.timbre
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples a tone of this duration occupies.
    pub fn sample_count(&self, tone: &ToneSpec) -> usize {
        (tone.duration.as_secs_f64() * self.sample_rate as f64).round() as usize
    }

    /// Render `tone` with this voice's waveform. The tone's own timbre is
    /// ignored; pick the voice through the registry to honour it.
    pub fn render(&self, tone: &ToneSpec) -> Vec<f32> {
        let total = self.sample_count(tone);
        let rate = self.sample_rate as f64;
        let amplitude = tone.amplitude();

        let attack = ((ATTACK_SECS * rate) as usize).min(total / 2).max(1);
        let release = ((RELEASE_SECS * rate) as usize).min(total / 2).max(1);

        (0..total)
            .map(|i| {
                let phase = (tone.frequency_hz * i as f64 / rate).fract();
                let envelope = if i < attack {
                    i as f64 / attack as f64
                } else if i >= total - release {
                    (total - 1 - i) as f64 / release as f64
                } else {
                    1.0
                };
                (self.oscillate(phase) * amplitude * envelope) as f32
            })
            .collect()
    }

    /// One waveform sample for `phase` in `[0, 1)`.
    fn oscillate(&self, phase: f64) -> f64 {
        match self.timbre {
            Timbre::Sine => (TAU * phase).sin(),
            Timbre::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Timbre::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Timbre::Sawtooth => 2.0 * phase - 1.0,
        }
    }
}

// ── VoiceRegistry ─────────────────────────────────────────────────────────────

/// Lazily-built voices keyed by timbre.
#[derive(Debug, Clone)]
pub struct VoiceRegistry {
    sample_rate: u32,
    voices: HashMap<Timbre, Voice>,
}

impl VoiceRegistry {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            voices: HashMap::new(),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The voice for `timbre`, built on first request.
    pub fn voice(&mut self, timbre: Timbre) -> &Voice {
        let sample_rate = self.sample_rate;
        self.voices.entry(timbre).or_insert_with(|| {
            tracing::debug!(timbre = timbre.as_str(), sample_rate, "building voice");
            Voice::new(timbre, sample_rate)
        })
    }

    /// The voice for a free-form instrument identifier; unknown ones get the
    /// fallback timbre.
    pub fn voice_for(&mut self, instrument: &str) -> &Voice {
        self.voice(Timbre::resolve(instrument))
    }

    /// Render `tone` with the voice matching its timbre.
    pub fn render(&mut self, tone: &ToneSpec) -> Vec<f32> {
        self.voice(tone.timbre).render(tone)
    }

    /// Number of voices built so far.
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};

/// Pitch of the beep marking the extend ("up") half of a rep cycle.
pub const EXTEND_BEEP_HZ: f32 = 800.0;
/// Pitch of the contract ("down") count-in beeps.
pub const CONTRACT_BEEP_HZ: f32 = 400.0;
pub const BEEP_SECS: f32 = 0.08;
pub const EXTEND_BEEP_VOLUME: f32 = 0.12;

pub const CHIME_HZ: f32 = 880.0;
pub const CHIME_SECS: f32 = 0.15;
pub const CHIME_VOLUME: f32 = 0.15;

/// Ascending arpeggio played when the whole session completes.
pub const CHEER_NOTES_HZ: [f32; 4] = [523.0, 659.0, 784.0, 1047.0];
pub const CHEER_NOTE_SECS: f32 = 0.2;
pub const CHEER_VOLUME: f32 = 0.2;

/// Contract-phase beep volume for a given second into the phase: loud on
/// the first second, decaying to a floor from the third on.
pub fn contract_volume(secs_into_phase: u32) -> f32 {
    match secs_into_phase {
        1 => 0.15,
        2 => 0.09,
        _ => 0.08,
    }
}

/// A logical audio event emitted by the session engine. The engine never
/// waits on playback; sinks that fail simply drop cues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCue {
    Beep {
        pitch_hz: f32,
        secs: f32,
        volume: f32,
    },
    /// One exercise finished.
    Chime,
    /// The whole session finished.
    Cheer,
}

pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Sink for headless runs and environments without an audio device.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Speaker-backed sink synthesizing sine tones via rodio.
pub struct SpeakerAudio {
    // The stream must outlive the sink or playback stops.
    _stream: OutputStream,
    _handle: OutputStreamHandle,
    sink: Sink,
}

impl SpeakerAudio {
    pub fn new() -> Option<Self> {
        let (stream, handle) = OutputStream::try_default().ok()?;
        let sink = Sink::try_new(&handle).ok()?;
        Some(Self {
            _stream: stream,
            _handle: handle,
            sink,
        })
    }

    fn tone(&self, pitch_hz: f32, secs: f32, volume: f32) {
        let source = SineWave::new(pitch_hz)
            .take_duration(Duration::from_secs_f32(secs))
            .amplify(volume);
        self.sink.append(source);
    }
}

impl AudioSink for SpeakerAudio {
    fn play(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::Beep {
                pitch_hz,
                secs,
                volume,
            } => self.tone(pitch_hz, secs, volume),
            AudioCue::Chime => self.tone(CHIME_HZ, CHIME_SECS, CHIME_VOLUME),
            AudioCue::Cheer => {
                for note in CHEER_NOTES_HZ {
                    self.tone(note, CHEER_NOTE_SECS, CHEER_VOLUME);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_volume_decays_to_floor() {
        assert_eq!(contract_volume(1), 0.15);
        assert_eq!(contract_volume(2), 0.09);
        assert_eq!(contract_volume(3), 0.08);
        assert_eq!(contract_volume(30), 0.08);
    }

    #[test]
    fn cheer_is_ascending() {
        for pair in CHEER_NOTES_HZ.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn null_sink_accepts_all_cues() {
        let mut sink = NullAudio;
        sink.play(AudioCue::Chime);
        sink.play(AudioCue::Cheer);
        sink.play(AudioCue::Beep {
            pitch_hz: EXTEND_BEEP_HZ,
            secs: BEEP_SECS,
            volume: EXTEND_BEEP_VOLUME,
        });
    }
}

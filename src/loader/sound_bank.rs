use std::path::Path;

use crate::audio::{SampleBuffer, synth};
use crate::palette::SoundId;

// WAV files live next to the binary's working directory, one per sound.
const SOUND_DIR: &str = "audio";

fn wav_name(sound: SoundId) -> &'static str {
    match sound {
        SoundId::DownbeatClick => "db.wav",
        SoundId::UpbeatClick => "ub.wav",
        SoundId::DogBark => "dog.wav",
        SoundId::CatMeow => "upcat.wav",
    }
}

// Prepare all four palette sounds for registration with the engine. A
// missing or unreadable file gets a synthesized stand-in instead of failing
// the session; the metronome always has something to play.
pub fn load_palette_sounds(sample_rate: u32) -> Vec<(SoundId, SampleBuffer)> {
    SoundId::ALL
        .iter()
        .map(|&id| {
            let path = Path::new(SOUND_DIR).join(wav_name(id));
            let buffer = SampleBuffer::load_wav(&path, sample_rate)
                .unwrap_or_else(|_| synth::fallback_sound(id, sample_rate));
            (id, buffer)
        })
        .collect()
}

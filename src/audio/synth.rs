use crate::palette::SoundId;

use super::sample_buffer::{SampleBuffer, StereoFrame};

// Stand-ins used when the WAV files aren't on disk: short sine bursts with
// an exponential decay, gliding in pitch for the animal sounds.
pub fn fallback_sound(sound: SoundId, sample_rate: u32) -> SampleBuffer {
    match sound {
        SoundId::DownbeatClick => burst(sample_rate, 1000.0, 1000.0, 0.015, 0.8),
        SoundId::UpbeatClick => burst(sample_rate, 800.0, 800.0, 0.012, 0.5),
        SoundId::DogBark => burst(sample_rate, 220.0, 90.0, 0.12, 0.9),
        SoundId::CatMeow => burst(sample_rate, 420.0, 780.0, 0.25, 0.6),
    }
}

fn burst(sample_rate: u32, start_freq: f32, end_freq: f32, duration: f32, gain: f32) -> SampleBuffer {
    let len = (sample_rate as f32 * duration) as usize;
    let mut data = Vec::with_capacity(len);
    let mut phase = 0.0f32;
    for i in 0..len {
        let t = i as f32 / len as f32; // normalized 0..1 over the burst
        let freq = start_freq + (end_freq - start_freq) * t;
        phase += std::f32::consts::TAU * freq / sample_rate as f32;
        let envelope = (-t * 5.0).exp();
        let s = phase.sin() * envelope * gain;
        data.push(StereoFrame { left: s, right: s });
    }
    SampleBuffer { data }
}

use anyhow::Context;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};

use crate::audio_api::AudioCommand;
use crate::palette::SoundId;
use crate::scheduler::BeatSink;

mod engine;
mod sample_buffer;
pub mod synth;

pub use sample_buffer::{SampleBuffer, StereoFrame};

use engine::Engine;

// Owns the output stream and the command channel into the callback. Dropping
// the handle stops the stream, so holding it for the session scope is the
// whole open/close story.
pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    sample_rate: u32,
    _output_stream: cpal::Stream,
}

impl AudioHandle {
    pub fn send(&self, cmd: AudioCommand) {
        let _ = self.tx.try_send(cmd);
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl BeatSink for AudioHandle {
    fn trigger(&mut self, sound: SoundId) {
        self.send(AudioCommand::Trigger(sound));
    }
}

pub fn start_audio() -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(64);

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .context("no default output device")?;
    let config = device
        .default_output_config()
        .context("no default output config")?;

    let sample_rate = config.sample_rate();
    let channels = config.channels() as usize;

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            let output_stream = build_output_stream_f32(&device, &config.into(), rx, channels)?;
            output_stream.play().context("failed to play output stream")?;

            Ok(AudioHandle {
                tx,
                sample_rate,
                _output_stream: output_stream,
            })
        }
        other => anyhow::bail!("unsupported sample format {other} (only f32 supported)"),
    }
}

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    channels: usize,
) -> anyhow::Result<cpal::Stream> {
    let mut engine = Engine::new();

    let err_fn = |err| eprintln!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }

            for chunk in data.chunks_mut(channels) {
                let frame = engine.next_frame();
                chunk[0] = frame.left;
                if channels > 1 {
                    chunk[1] = frame.right;
                }
                for extra in chunk.iter_mut().skip(2) {
                    *extra = 0.0;
                }
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

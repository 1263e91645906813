use crate::audio_api::AudioCommand;
use crate::palette::NUM_SOUNDS;

use super::sample_buffer::{SampleBuffer, StereoFrame};

// At most one sound plays at a time: a metronome click is over before the
// next beat, and a retrigger is supposed to cut the old sound off, so a
// single voice is the whole mixing model.
#[derive(Clone, Copy, Debug)]
struct Voice {
    slot: usize,
    pos: usize,
}

pub struct Engine {
    sounds: [Option<SampleBuffer>; NUM_SOUNDS],
    voice: Option<Voice>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            sounds: std::array::from_fn(|_| None),
            voice: None,
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::RegisterSound { id, buffer } => {
                self.sounds[id.index()] = Some(buffer);
            }
            AudioCommand::Trigger(id) => {
                // restart from the top, truncating whatever is sounding
                if self.sounds[id.index()].is_some() {
                    self.voice = Some(Voice { slot: id.index(), pos: 0 });
                }
            }
        }
    }

    pub fn next_frame(&mut self) -> StereoFrame {
        let Some(voice) = &mut self.voice else {
            return StereoFrame::default();
        };
        let Some(buffer) = &self.sounds[voice.slot] else {
            self.voice = None;
            return StereoFrame::default();
        };
        match buffer.data.get(voice.pos) {
            Some(frame) => {
                voice.pos += 1;
                *frame
            }
            None => {
                self.voice = None;
                StereoFrame::default()
            }
        }
    }

}

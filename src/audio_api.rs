use crate::audio::SampleBuffer;
use crate::palette::SoundId;

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // The callback can't touch the filesystem, so every sound is decoded up
    // front and registered into its slot; triggers then go by id.
    RegisterSound { id: SoundId, buffer: SampleBuffer },

    // Start the sound from the top, truncating whatever is still playing.
    Trigger(SoundId),
}

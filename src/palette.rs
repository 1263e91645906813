// The four fixed sounds the metronome can trigger. The engine stores loaded
// buffers in a slot per id, so the index must stay dense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundId {
    DownbeatClick,
    UpbeatClick,
    DogBark,
    CatMeow,
}

pub const NUM_SOUNDS: usize = 4;

impl SoundId {
    pub const ALL: [SoundId; NUM_SOUNDS] = [
        SoundId::DownbeatClick,
        SoundId::UpbeatClick,
        SoundId::DogBark,
        SoundId::CatMeow,
    ];

    pub fn index(&self) -> usize {
        match self {
            SoundId::DownbeatClick => 0,
            SoundId::UpbeatClick => 1,
            SoundId::DogBark => 2,
            SoundId::CatMeow => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeatRole {
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Palette {
    Standard,
    Playful,
}

impl Palette {
    // Total mapping; the selection is already normalized by the validator.
    pub fn sound_for(&self, role: BeatRole) -> SoundId {
        match (self, role) {
            (Palette::Standard, BeatRole::Down) => SoundId::DownbeatClick,
            (Palette::Standard, BeatRole::Up) => SoundId::UpbeatClick,
            (Palette::Playful, BeatRole::Down) => SoundId::DogBark,
            (Palette::Playful, BeatRole::Up) => SoundId::CatMeow,
        }
    }
}

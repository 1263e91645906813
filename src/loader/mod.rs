pub mod sound_bank;

mod audio;
mod audio_api;
mod console;
mod input;
mod loader;
mod meter;
mod palette;
mod scheduler;

use audio_api::AudioCommand;
use console::{Console, StdConsole};
use meter::TempoModel;
use scheduler::{BeatScheduler, KeyPacer};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let mut console = StdConsole;

    input::show_time_signatures(&mut console);
    let signature = input::read_time_signature(&mut console)?;
    let tempo = input::read_tempo(&mut console, &signature)?;
    let palette = input::read_palette(&mut console);
    let model = TempoModel::new(signature, tempo);

    // the mixer opens only after validation succeeded; from here the handle
    // is released by drop on every exit path
    let mut sink = audio::start_audio()?;
    for (id, buffer) in loader::sound_bank::load_palette_sounds(sink.sample_rate()) {
        sink.send(AudioCommand::RegisterSound { id, buffer });
    }

    let mut scheduler = BeatScheduler::new(&model, palette);
    {
        let mut pacer = KeyPacer::default();
        scheduler.run(&mut console, &mut sink, &mut pacer)?;
    } // pacer drop leaves raw mode before the farewell prints

    console.print("Thanks for choosing the Meowtronome!");
    Ok(())
}

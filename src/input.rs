use crate::console::Console;
use crate::meter::{SUPPORTED_SIGNATURES, Tempo, TimeSignature};
use crate::palette::Palette;

// Every field gets the same retry budget, but only the signature and tempo
// are fatal on exhaustion; the palette quietly falls back to Standard.
pub const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("too many invalid inputs, the session is over")]
    ValidationExhausted,
}

pub fn show_time_signatures(console: &mut impl Console) {
    console.print(&format!(
        "Available time signatures: {}",
        SUPPORTED_SIGNATURES.join(", ")
    ));
}

pub fn read_time_signature(console: &mut impl Console) -> anyhow::Result<TimeSignature> {
    for _ in 0..MAX_ATTEMPTS {
        let raw = console.prompt("Please select a time signature: ")?;
        if let Some(signature) = TimeSignature::parse(&raw) {
            return Ok(signature);
        }
        console.print("Invalid input");
    }
    Err(SessionError::ValidationExhausted.into())
}

pub fn read_tempo(
    console: &mut impl Console,
    signature: &TimeSignature,
) -> anyhow::Result<Tempo> {
    let prompt = if signature.is_compound() {
        "Enter a dotted crotchet BPM (30-300): "
    } else {
        "Enter the BPM (30-300): "
    };
    for attempt in 0..MAX_ATTEMPTS {
        let raw = console.prompt(prompt)?;
        match raw.trim().parse::<i64>() {
            Ok(bpm) => {
                if let Some(tempo) = u32::try_from(bpm).ok().and_then(Tempo::new) {
                    return Ok(tempo);
                }
                if attempt < MAX_ATTEMPTS - 1 {
                    console.print("Please enter a value between 30 and 300.");
                }
            }
            Err(_) => {
                if attempt < MAX_ATTEMPTS - 1 {
                    console.print("Invalid input. Please enter an integer.");
                }
            }
        }
    }
    Err(SessionError::ValidationExhausted.into())
}

// Never fails: three bad answers activate the Standard default instead.
pub fn read_palette(console: &mut impl Console) -> Palette {
    for attempt in 0..MAX_ATTEMPTS {
        let raw = match console
            .prompt("For dogs and cats sounds configuration press 1, for normal press 2: ")
        {
            Ok(raw) => raw,
            Err(_) => break,
        };
        match raw.as_str() {
            "1" => return Palette::Playful,
            "2" => return Palette::Standard,
            _ => {
                if attempt < MAX_ATTEMPTS - 1 {
                    console.print("Enter 1 or 2");
                } else {
                    console.print("Default sound configuration is activated");
                }
            }
        }
    }
    Palette::Standard
}

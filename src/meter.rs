use std::time::Duration;

// The fixed menu of signatures we know how to count. Matching is exact;
// "4/4 " or "4\4" never validate.
pub const SUPPORTED_SIGNATURES: [&str; 10] = [
    "1/4", "2/4", "3/4", "4/4", "5/4", "6/4", "3/8", "5/8", "6/8", "9/8",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Denominator {
    Quarter,
    Eighth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSignature {
    numerator: u32,
    denominator: Denominator,
}

impl TimeSignature {
    // Exact match against the supported list, then split into parts.
    // Every listed entry is single-digit/single-digit so indexing is safe.
    pub fn parse(raw: &str) -> Option<Self> {
        if !SUPPORTED_SIGNATURES.contains(&raw) {
            return None;
        }
        let bytes = raw.as_bytes();
        let numerator = (bytes[0] - b'0') as u32;
        let denominator = match bytes[2] {
            b'4' => Denominator::Quarter,
            _ => Denominator::Eighth,
        };
        Some(Self { numerator, denominator })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    // /8 signatures are counted in dotted crotchets (compound time)
    pub fn is_compound(&self) -> bool {
        self.denominator == Denominator::Eighth
    }

    pub fn beat_unit_name(&self) -> &'static str {
        match self.denominator {
            Denominator::Quarter => "crotchet",
            Denominator::Eighth => "quaver",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tempo(u32);

impl Tempo {
    pub const MIN: u32 = 30;
    pub const MAX: u32 = 300;

    pub fn new(bpm: u32) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&bpm) {
            Some(Self(bpm))
        } else {
            None
        }
    }

    pub fn bpm(&self) -> u32 {
        self.0
    }
}

// Everything the scheduler needs to pace a session, derived once from the
// validated signature + tempo. The arithmetic is the same for both
// denominator families; for /8 the entered BPM already means dotted crotchets.
#[derive(Clone, Copy, Debug)]
pub struct TempoModel {
    beats_per_bar: u32,
    beat_unit: Duration,
    beat_unit_name: &'static str,
}

impl TempoModel {
    pub fn new(signature: TimeSignature, tempo: Tempo) -> Self {
        Self {
            beats_per_bar: signature.numerator(),
            beat_unit: Duration::from_secs_f64(60.0 / tempo.bpm() as f64),
            beat_unit_name: signature.beat_unit_name(),
        }
    }

    pub fn beats_per_bar(&self) -> u32 {
        self.beats_per_bar
    }

    pub fn beat_unit(&self) -> Duration {
        self.beat_unit
    }

    pub fn beat_unit_name(&self) -> &'static str {
        self.beat_unit_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_supported_signature() {
        for raw in SUPPORTED_SIGNATURES {
            let sig = TimeSignature::parse(raw).unwrap();
            let expected = raw.as_bytes()[0] - b'0';
            assert_eq!(sig.numerator(), expected as u32);
            assert!((1..=9).contains(&sig.numerator()));
        }
    }

    #[test]
    fn rejects_padded_or_unlisted_input() {
        for raw in [" 4/4", "4/4 ", "4/4\n", "7/4", "6/16", "4\\4", "", "four/four"] {
            assert!(TimeSignature::parse(raw).is_none(), "accepted {raw:?}");
        }
    }

    #[test]
    fn compound_detection_follows_denominator() {
        assert!(!TimeSignature::parse("4/4").unwrap().is_compound());
        assert!(TimeSignature::parse("6/8").unwrap().is_compound());
        assert_eq!(TimeSignature::parse("3/4").unwrap().beat_unit_name(), "crotchet");
        assert_eq!(TimeSignature::parse("9/8").unwrap().beat_unit_name(), "quaver");
    }

    #[test]
    fn tempo_bounds_are_inclusive() {
        assert!(Tempo::new(29).is_none());
        assert!(Tempo::new(30).is_some());
        assert!(Tempo::new(300).is_some());
        assert!(Tempo::new(301).is_none());
    }

    #[test]
    fn beat_unit_from_signature_and_tempo() {
        let model = TempoModel::new(
            TimeSignature::parse("4/4").unwrap(),
            Tempo::new(120).unwrap(),
        );
        assert_eq!(model.beats_per_bar(), 4);
        assert_eq!(model.beat_unit(), Duration::from_millis(500));

        // compound time uses the same formula, just a different unit meaning
        let model = TempoModel::new(
            TimeSignature::parse("6/8").unwrap(),
            Tempo::new(90).unwrap(),
        );
        assert_eq!(model.beats_per_bar(), 6);
        assert!((model.beat_unit().as_secs_f64() - 60.0 / 90.0).abs() < 1e-9);
        assert_eq!(model.beat_unit_name(), "quaver");
    }
}

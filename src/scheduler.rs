use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::console::Console;
use crate::meter::TempoModel;
use crate::palette::{BeatRole, Palette, SoundId};

// Fire-and-forget playback seam; the audio handle implements this, tests use
// a recorder.
pub trait BeatSink {
    fn trigger(&mut self, sound: SoundId);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wait {
    Elapsed,
    Cancelled,
}

// Owns the waiting between beats and the cancellation check. now() exists so
// the scheduler can anchor its deadline chain on the pacer's clock.
pub trait Pacer {
    fn now(&self) -> Instant;
    fn wait_until(&mut self, deadline: Instant) -> anyhow::Result<Wait>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Starting,
    Running,
    Terminated,
}

pub struct BeatScheduler {
    beats_per_bar: u32,
    beat_unit: Duration,
    beat_unit_name: &'static str,
    palette: Palette,
    position: u32,
    state: SchedulerState,
}

impl BeatScheduler {
    pub fn new(model: &TempoModel, palette: Palette) -> Self {
        Self {
            beats_per_bar: model.beats_per_bar(),
            beat_unit: model.beat_unit(),
            beat_unit_name: model.beat_unit_name(),
            palette,
            position: 0,
            state: SchedulerState::Starting,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    // Runs until the pacer reports cancellation; that is the only exit.
    // Deadlines are advanced absolutely (deadline += beat_unit) so trigger
    // dispatch overhead and late wakes never accumulate into tempo drift.
    pub fn run(
        &mut self,
        console: &mut impl Console,
        sink: &mut impl BeatSink,
        pacer: &mut impl Pacer,
    ) -> anyhow::Result<()> {
        console.print(&format!(
            "Here we go! Remember, one beat = one {}.",
            self.beat_unit_name
        ));

        // priming wait: the first beat lands one unit after startup
        let mut deadline = pacer.now() + self.beat_unit;
        self.state = SchedulerState::Running;

        loop {
            if pacer.wait_until(deadline)? == Wait::Cancelled {
                self.state = SchedulerState::Terminated;
                return Ok(());
            }
            let role = if self.position == 0 {
                BeatRole::Down
            } else {
                BeatRole::Up
            };
            sink.trigger(self.palette.sound_for(role));
            self.position += 1;
            if self.position == self.beats_per_bar {
                self.position = 0;
            }
            deadline += self.beat_unit;
        }
    }
}

const POLL_SLICE: Duration = Duration::from_millis(50);

// Real pacer: sleeps by polling the terminal for key events in short slices,
// so an operator interrupt (ctrl+c, esc, or q) is seen within one slice.
// Raw mode is entered lazily on the first wait and left on drop, after all
// line-oriented prompting is done.
#[derive(Default)]
pub struct KeyPacer {
    raw_mode: bool,
}

impl Pacer for KeyPacer {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wait_until(&mut self, deadline: Instant) -> anyhow::Result<Wait> {
        if !self.raw_mode {
            terminal::enable_raw_mode()?;
            self.raw_mode = true;
        }
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(Wait::Elapsed);
            }
            let slice = (deadline - now).min(POLL_SLICE);
            if event::poll(slice)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && is_interrupt(key.code, key.modifiers) {
                        return Ok(Wait::Cancelled);
                    }
                }
            }
        }
    }
}

impl Drop for KeyPacer {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}

fn is_interrupt(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::meter::{Tempo, TimeSignature};
    use std::cell::Cell;
    use std::rc::Rc;

    struct RecordingSink {
        triggered: Vec<SoundId>,
        closed: Rc<Cell<u32>>,
    }

    impl RecordingSink {
        fn new(closed: Rc<Cell<u32>>) -> Self {
            Self { triggered: Vec::new(), closed }
        }
    }

    impl BeatSink for RecordingSink {
        fn trigger(&mut self, sound: SoundId) {
            self.triggered.push(sound);
        }
    }

    impl Drop for RecordingSink {
        fn drop(&mut self) {
            self.closed.set(self.closed.get() + 1);
        }
    }

    // Simulated clock that wakes late by a fixed amount on every wait and
    // records each requested deadline relative to the start instant.
    struct FakePacer {
        base: Instant,
        offset: Duration,
        wake_late_by: Duration,
        deadlines: Vec<Duration>,
        cancel_after: usize,
    }

    impl FakePacer {
        fn new(wake_late_by: Duration, cancel_after: usize) -> Self {
            Self {
                base: Instant::now(),
                offset: Duration::ZERO,
                wake_late_by,
                deadlines: Vec::new(),
                cancel_after,
            }
        }
    }

    impl Pacer for FakePacer {
        fn now(&self) -> Instant {
            self.base + self.offset
        }

        fn wait_until(&mut self, deadline: Instant) -> anyhow::Result<Wait> {
            if self.deadlines.len() == self.cancel_after {
                return Ok(Wait::Cancelled);
            }
            let rel = deadline.duration_since(self.base);
            self.deadlines.push(rel);
            self.offset = rel + self.wake_late_by;
            Ok(Wait::Elapsed)
        }
    }

    fn scheduler(signature: &str, bpm: u32, palette: Palette) -> BeatScheduler {
        let model = TempoModel::new(
            TimeSignature::parse(signature).unwrap(),
            Tempo::new(bpm).unwrap(),
        );
        BeatScheduler::new(&model, palette)
    }

    #[test]
    fn beat_roles_cycle_across_bars() {
        let mut sched = scheduler("3/4", 120, Palette::Standard);
        let closed = Rc::new(Cell::new(0));
        let mut sink = RecordingSink::new(closed.clone());
        let mut pacer = FakePacer::new(Duration::ZERO, 6);
        let mut console = ScriptedConsole::with_answers(&[]);

        sched.run(&mut console, &mut sink, &mut pacer).unwrap();

        use SoundId::{DownbeatClick as D, UpbeatClick as U};
        assert_eq!(sink.triggered, vec![D, U, U, D, U, U]);
        assert_eq!(sched.state(), SchedulerState::Terminated);
    }

    #[test]
    fn playful_palette_selects_animal_sounds() {
        let mut sched = scheduler("2/4", 120, Palette::Playful);
        let closed = Rc::new(Cell::new(0));
        let mut sink = RecordingSink::new(closed.clone());
        let mut pacer = FakePacer::new(Duration::ZERO, 4);
        let mut console = ScriptedConsole::with_answers(&[]);

        sched.run(&mut console, &mut sink, &mut pacer).unwrap();

        use SoundId::{CatMeow as C, DogBark as B};
        assert_eq!(sink.triggered, vec![B, C, B, C]);
    }

    #[test]
    fn deadlines_follow_an_absolute_schedule_despite_late_wakes() {
        let mut sched = scheduler("4/4", 120, Palette::Standard);
        let closed = Rc::new(Cell::new(0));
        let mut sink = RecordingSink::new(closed.clone());
        // every wake is 30ms late; naive sleep-per-beat would drift 30ms/beat
        let mut pacer = FakePacer::new(Duration::from_millis(30), 20);
        let mut console = ScriptedConsole::with_answers(&[]);

        sched.run(&mut console, &mut sink, &mut pacer).unwrap();

        let unit = Duration::from_millis(500);
        for (k, deadline) in pacer.deadlines.iter().enumerate() {
            assert_eq!(*deadline, unit * (k as u32 + 1), "deadline {k} drifted");
        }
    }

    #[test]
    fn priming_wait_precedes_the_first_trigger() {
        let mut sched = scheduler("4/4", 60, Palette::Standard);
        let closed = Rc::new(Cell::new(0));
        let mut sink = RecordingSink::new(closed.clone());
        let mut pacer = FakePacer::new(Duration::ZERO, 1);
        let mut console = ScriptedConsole::with_answers(&[]);

        sched.run(&mut console, &mut sink, &mut pacer).unwrap();

        // one full beat unit elapses before the single trigger we allowed
        assert_eq!(pacer.deadlines, vec![Duration::from_secs(1)]);
        assert_eq!(sink.triggered.len(), 1);
        assert_eq!(
            console.printed,
            vec!["Here we go! Remember, one beat = one crotchet."]
        );
    }

    #[test]
    fn orientation_message_names_the_quaver_for_compound_time() {
        let mut sched = scheduler("6/8", 90, Palette::Standard);
        let closed = Rc::new(Cell::new(0));
        let mut sink = RecordingSink::new(closed.clone());
        let mut pacer = FakePacer::new(Duration::ZERO, 0);
        let mut console = ScriptedConsole::with_answers(&[]);

        sched.run(&mut console, &mut sink, &mut pacer).unwrap();

        assert_eq!(
            console.printed,
            vec!["Here we go! Remember, one beat = one quaver."]
        );
    }

    #[test]
    fn cancellation_terminates_and_releases_the_sink_once() {
        let closed = Rc::new(Cell::new(0));
        {
            let mut sched = scheduler("4/4", 120, Palette::Standard);
            let mut sink = RecordingSink::new(closed.clone());
            let mut pacer = FakePacer::new(Duration::ZERO, 5);
            let mut console = ScriptedConsole::with_answers(&[]);
            sched.run(&mut console, &mut sink, &mut pacer).unwrap();
            assert_eq!(sched.state(), SchedulerState::Terminated);
            assert_eq!(sink.triggered.len(), 5);
        }
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn cancellation_before_the_first_beat_triggers_nothing() {
        let closed = Rc::new(Cell::new(0));
        {
            let mut sched = scheduler("4/4", 120, Palette::Standard);
            let mut sink = RecordingSink::new(closed.clone());
            let mut pacer = FakePacer::new(Duration::ZERO, 0);
            let mut console = ScriptedConsole::with_answers(&[]);
            sched.run(&mut console, &mut sink, &mut pacer).unwrap();
            assert_eq!(sched.state(), SchedulerState::Terminated);
            assert!(sink.triggered.is_empty());
        }
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn interrupt_keys() {
        assert!(is_interrupt(KeyCode::Esc, KeyModifiers::NONE));
        assert!(is_interrupt(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(is_interrupt(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!is_interrupt(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(!is_interrupt(KeyCode::Enter, KeyModifiers::NONE));
    }
}

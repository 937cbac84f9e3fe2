use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Sound cues triggered by game events.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AudioCue {
    Eat,
    Appear,
    GameOver,
}

/// Fire-and-forget sound output. Nothing flows back into the game.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Rings the terminal bell for every cue.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: AudioCue) {
        let mut stdout = io::stdout();
        let result = stdout.write_all(b"\x07").and_then(|()| stdout.flush());

        if let Err(error) = result {
            log::debug!("bell for {cue:?} failed: {error}");
        }
    }
}

/// Discards every cue (`--mute`).
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Test sink: records cues in a shared list so tests can inspect them after
/// handing the sink to a controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    cues: Rc<RefCell<Vec<AudioCue>>>,
}

impl RecordingSink {
    /// Returns every cue played so far, oldest first.
    #[must_use]
    pub fn cues(&self) -> Vec<AudioCue> {
        self.cues.borrow().clone()
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self, cue: AudioCue) {
        self.cues.borrow_mut().push(cue);
    }
}

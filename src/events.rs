use crate::audio::AudioCue;
use crate::food::FoodKind;
use crate::game::DeathReason;

/// Discrete things that happened during one state transition.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    Ate(FoodKind),
    BonusAppeared,
    /// An uneaten bonus food reached the end of its lifetime.
    BonusExpired,
    GameOver(DeathReason),
    /// State changed and the frame should be redrawn.
    Render,
}

impl GameEvent {
    /// Returns the sound cue associated with this event, if any.
    #[must_use]
    pub fn audio_cue(self) -> Option<AudioCue> {
        match self {
            Self::Ate(_) => Some(AudioCue::Eat),
            Self::BonusAppeared => Some(AudioCue::Appear),
            Self::GameOver(_) => Some(AudioCue::GameOver),
            Self::BonusExpired | Self::Render => None,
        }
    }
}

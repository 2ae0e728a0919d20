//! Session message types.
//!
//! Three channels meet in the controller:
//!
//! * [`SessionCommand`] — inbound user commands from the presentation layer.
//! * [`SessionEvent`] — the controller's single inbox: commands, engine
//!   events, timer firings and resolved translations, all tagged so the
//!   state machine advances one event at a time.
//! * [`UiEvent`] — outbound transitions and results for any presentation
//!   layer to render.

use crate::recognition::EngineEvent;
use crate::translate::TranslateError;

// ---------------------------------------------------------------------------
// SessionCommand
// ---------------------------------------------------------------------------

/// Commands sent from the presentation layer to the session controller.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Express intent to run the session; opens recognition (with the
    /// cosmetic countdown) unless one is already open.
    Start,
    /// Express intent to stop; closes recognition and suppresses any pending
    /// restart.
    Stop,
    /// Reset the retry budget and start again, without the countdown.
    Retry,
    /// Speak the current translation through the synthesis capability.
    Speak,
    /// Select a new target language; re-translates the existing transcript
    /// if there is one.
    ChangeTargetLanguage(String),
}

// ---------------------------------------------------------------------------
// SessionEvent
// ---------------------------------------------------------------------------

/// Everything that can advance the session state machine.
///
/// Timer firings and resolved translations are posted back into the same
/// channel by the tasks the controller spawns, so the controller itself only
/// ever runs one event at a time.
#[derive(Debug)]
pub enum SessionEvent {
    /// A user command.
    Command(SessionCommand),

    /// A lifecycle / result event from the recognition engine.
    Engine(EngineEvent),

    /// A scheduled restart timer fired.  Whether anything happens is decided
    /// at fire time — stale timers are inert by state check, not by
    /// cancellation.
    RestartDue,

    /// One tick of the start countdown.  `generation` identifies which
    /// countdown the tick belongs to; ticks from a superseded countdown are
    /// dropped.
    CountdownTick { generation: u64, remaining: u32 },

    /// An in-flight translation resolved.  `seq` identifies the request;
    /// anything older than the latest issued sequence is discarded.
    TranslationResolved {
        seq: u64,
        source_text: String,
        target_lang: String,
        result: Result<String, TranslateError>,
    },
}

// ---------------------------------------------------------------------------
// UiEvent
// ---------------------------------------------------------------------------

/// Events surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The session status line changed.
    StatusChanged {
        /// Display text for the status line.
        text: String,
        /// Whether recognition is actively capturing (recording styling).
        is_recording: bool,
        /// Whether the status describes a failure (error styling).
        is_error: bool,
    },

    /// One tick of the start countdown; `0` means the countdown is done and
    /// the display should clear.
    CountdownTick { remaining: u32 },

    /// A final transcript was recognized.
    TranscriptReady(String),

    /// A translation resolved — either the translated text or a displayable
    /// error message.
    TranslationReady(Result<crate::translate::TranslationResult, String>),
}

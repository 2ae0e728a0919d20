//! Session controller — the recognition-lifecycle state machine.
//!
//! [`SessionController`] owns all session state and responds to
//! [`SessionEvent`]s received over a `tokio::sync::mpsc` channel.
//!
//! # Event flow
//!
//! ```text
//! Command::Start
//!   └─▶ intent = true, attempts = 0
//!         ├─ Idle / Errored ─▶ Starting: countdown + engine.open()
//!         └─ Starting / Listening ─▶ countdown restarts, engine untouched
//!
//! Engine::Opened      ─▶ Listening
//! Engine::FinalResult ─▶ record transcript, attempts = 0, translate
//! Engine::Error(network) / open() failure
//!                     ─▶ attempts += 1, backoff delay, restart scheduled
//!                        (Errored once the budget is gone)
//! Engine::Error(other) ─▶ fixed-delay restart while intent holds
//! Engine::Closed      ─▶ Idle; restart while intent holds and budget remains
//!
//! RestartDue          ─▶ reopen only if intent holds and no session is open
//! ```
//!
//! Timers are fire-once spawned tasks that post back into the event channel;
//! a stale timer is made inert by the state check at fire time rather than by
//! cancellation.  Translation responses carry a sequence number and anything
//! older than the latest issued request is discarded.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::backoff;
use crate::capability::Capability;
use crate::config::SessionConfig;
use crate::language;
use crate::recognition::{EngineErrorKind, EngineEvent, RecognitionEngine};
use crate::synth::Synthesizer;
use crate::translate::{TranslationResult, Translator};

use super::events::{SessionCommand, SessionEvent, UiEvent};
use super::state::{RetryState, SessionState};

// ---------------------------------------------------------------------------
// Status text
// ---------------------------------------------------------------------------

const STATUS_LISTENING: &str = "Listening...";
const STATUS_RECOGNITION_UNSUPPORTED: &str = "Speech recognition is not supported";
const STATUS_STOPPED: &str = "Recording stopped";
const STATUS_RETRY_EXHAUSTED: &str =
    "Recognition keeps failing. Press retry to try again.";
const STATUS_SYNTH_UNSUPPORTED: &str = "Speech synthesis is not supported";

// ---------------------------------------------------------------------------
// SessionController
// ---------------------------------------------------------------------------

/// Drives the speech-session lifecycle.
///
/// Create with [`SessionController::new`], then either call
/// [`run`](Self::run) inside a tokio task (production) or feed events one at
/// a time through [`handle`](Self::handle) (tests, embedding).
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use tokio::sync::mpsc;
/// use voice_translate::capability::Capability;
/// use voice_translate::config::AppConfig;
/// use voice_translate::session::{SessionController, SessionEvent, UiEvent};
/// use voice_translate::translate::GoogleTranslator;
///
/// # use voice_translate::recognition::RecognitionEngine;
/// # fn make_engine() -> Arc<dyn RecognitionEngine> { unimplemented!() }
/// # async fn example() {
/// let config = AppConfig::default();
/// let (events_tx, events_rx) = mpsc::channel::<SessionEvent>(64);
/// let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>(64);
///
/// let controller = SessionController::new(
///     config.session.clone(),
///     config.translate.target_lang.clone(),
///     Capability::Available(make_engine()),
///     Arc::new(GoogleTranslator::from_config(&config.translate)),
///     Capability::Unavailable,
///     events_tx.clone(),
///     ui_tx,
/// );
/// controller.run(events_rx).await;
/// # }
/// ```
pub struct SessionController {
    // ── State ────────────────────────────────────────────────────────────
    state: SessionState,
    /// Whether the user wants the session running.  Diverges from `state`
    /// during restarts and errors.
    intent: bool,
    retry: RetryState,
    /// Most recent finalized utterance.  Overwritten per result, never
    /// accumulated.
    transcript: Option<String>,
    target_lang: String,
    translation: Option<TranslationResult>,

    // ── Staleness counters ───────────────────────────────────────────────
    /// Latest issued translation request; older responses are discarded.
    translation_seq: u64,
    /// Current countdown; ticks from superseded countdowns are dropped.
    countdown_gen: u64,

    // ── Pending timers ───────────────────────────────────────────────────
    /// A restart timer is queued and has not fired yet.
    restart_pending: bool,
    /// The queued restart came from a user start and should run the
    /// countdown when it fires.
    restart_with_countdown: bool,

    // ── Collaborators ────────────────────────────────────────────────────
    config: SessionConfig,
    engine: Capability<Arc<dyn RecognitionEngine>>,
    translator: Arc<dyn Translator>,
    synth: Capability<Arc<dyn Synthesizer>>,

    // ── Channels ─────────────────────────────────────────────────────────
    /// Loopback sender used by spawned timer / translation tasks.
    events_tx: mpsc::Sender<SessionEvent>,
    ui_tx: mpsc::Sender<UiEvent>,
}

impl SessionController {
    /// Create a new controller in the Idle state with a fresh retry budget.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: SessionConfig,
        initial_target: String,
        engine: Capability<Arc<dyn RecognitionEngine>>,
        translator: Arc<dyn Translator>,
        synth: Capability<Arc<dyn Synthesizer>>,
        events_tx: mpsc::Sender<SessionEvent>,
        ui_tx: mpsc::Sender<UiEvent>,
    ) -> Self {
        Self {
            state: SessionState::Idle,
            intent: false,
            retry: RetryState::new(config.max_attempts),
            transcript: None,
            target_lang: initial_target,
            translation: None,
            translation_seq: 0,
            countdown_gen: 0,
            restart_pending: false,
            restart_with_countdown: false,
            config,
            engine,
            translator,
            synth,
            events_tx,
            ui_tx,
        }
    }

    // ── Read-only accessors ──────────────────────────────────────────────

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the user currently wants the session running.
    pub fn user_intent(&self) -> bool {
        self.intent
    }

    /// Network-error attempts consumed since the last reset.
    pub fn attempts(&self) -> u32 {
        self.retry.attempts()
    }

    /// Most recent finalized transcript, if any.
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    /// Currently selected target language code.
    pub fn target_language(&self) -> &str {
        &self.target_lang
    }

    /// Most recent successful translation, if any.
    pub fn translation(&self) -> Option<&TranslationResult> {
        self.translation.as_ref()
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the controller until `events_rx` is closed.
    ///
    /// This is an `async fn` and should be spawned as a tokio task from
    /// `main()`.  It never returns while the channel is open.
    pub async fn run(mut self, mut events_rx: mpsc::Receiver<SessionEvent>) {
        while let Some(event) = events_rx.recv().await {
            self.handle(event).await;
        }

        log::info!("session: event channel closed, controller shutting down");
    }

    /// Advance the state machine by exactly one event.
    ///
    /// Public so the machine can be driven with synthetic events, without a
    /// real engine or clock.
    pub async fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Command(cmd) => self.handle_command(cmd).await,
            SessionEvent::Engine(ev) => self.handle_engine_event(ev).await,
            SessionEvent::RestartDue => self.handle_restart_due().await,
            SessionEvent::CountdownTick {
                generation,
                remaining,
            } => self.handle_countdown_tick(generation, remaining).await,
            SessionEvent::TranslationResolved {
                seq,
                source_text,
                target_lang,
                result,
            } => {
                self.handle_translation_resolved(seq, source_text, target_lang, result)
                    .await
            }
        }
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    async fn handle_command(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::Start => self.handle_start().await,
            SessionCommand::Stop => self.handle_stop().await,
            SessionCommand::Retry => self.handle_retry().await,
            SessionCommand::Speak => self.handle_speak().await,
            SessionCommand::ChangeTargetLanguage(code) => self.handle_change_language(code).await,
        }
    }

    async fn handle_start(&mut self) {
        log::debug!("session: start command (state: {:?})", self.state);
        if !self.engine.is_available() {
            self.emit_status(STATUS_RECOGNITION_UNSUPPORTED, false, true).await;
            return;
        }
        self.intent = true;
        self.retry.reset();

        match self.state {
            SessionState::Idle | SessionState::Errored => {
                self.transition(SessionState::Starting);
                if self.config.countdown_secs > 0 {
                    self.begin_countdown().await;
                }
                // The countdown is cosmetic unless gating is configured;
                // recognition opens immediately alongside it.
                if !self.config.countdown_gates_start || self.config.countdown_secs == 0 {
                    self.open_engine().await;
                }
            }
            SessionState::Starting | SessionState::Listening => {
                // A session is already open or opening; only the countdown
                // restarts.
                if self.config.countdown_secs > 0 {
                    self.begin_countdown().await;
                }
            }
            SessionState::Stopping => {
                // The engine is mid-close.  Intent is now true again, so the
                // Closed confirmation will schedule the restart; a user start
                // gets its countdown back when that restart fires.
                self.restart_with_countdown = true;
            }
        }
    }

    async fn handle_stop(&mut self) {
        log::debug!("session: stop command (state: {:?})", self.state);
        self.intent = false;
        self.restart_with_countdown = false;

        match self.state {
            SessionState::Listening => {
                self.close_engine();
                self.transition(SessionState::Stopping);
            }
            SessionState::Starting => {
                // The open may not have been confirmed yet; ask for a close
                // and drop to Idle rather than wait on a confirmation a
                // never-opened session will not send.
                self.close_engine();
                self.transition(SessionState::Idle);
                self.emit_status(STATUS_STOPPED, false, false).await;
            }
            SessionState::Stopping => {}
            SessionState::Idle | SessionState::Errored => {
                self.transition(SessionState::Idle);
                self.emit_status(STATUS_STOPPED, false, false).await;
            }
        }
    }

    async fn handle_retry(&mut self) {
        log::debug!("session: retry command (state: {:?})", self.state);
        if !self.engine.is_available() {
            self.emit_status(STATUS_RECOGNITION_UNSUPPORTED, false, true).await;
            return;
        }
        self.intent = true;
        self.restart_with_countdown = false;
        self.retry.reset();

        // Same as start, minus the countdown.
        if matches!(self.state, SessionState::Idle | SessionState::Errored) {
            self.transition(SessionState::Starting);
            self.open_engine().await;
        }
    }

    async fn handle_speak(&mut self) {
        match &self.synth {
            Capability::Available(synth) => {
                if let Some(tr) = &self.translation {
                    log::debug!("session: speaking translation ({})", tr.target_lang);
                    if let Err(e) = synth.speak(&tr.translated_text, &tr.target_lang) {
                        self.emit_status(&e.to_string(), false, true).await;
                    }
                } else {
                    log::debug!("session: speak requested before any translation");
                }
            }
            Capability::Unavailable => {
                self.emit_status(STATUS_SYNTH_UNSUPPORTED, false, true).await;
            }
        }
    }

    async fn handle_change_language(&mut self, code: String) {
        log::info!(
            "session: target language set to {} ({code})",
            language::display_name(&code)
        );
        self.target_lang = code;

        // Re-translate the existing transcript; recognition is untouched.
        if self.transcript.as_deref().is_some_and(|t| !t.is_empty()) {
            self.request_translation();
        }
    }

    // -----------------------------------------------------------------------
    // Engine events
    // -----------------------------------------------------------------------

    async fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Opened => {
                if !self.intent {
                    // A stop raced the open confirmation; shut the session
                    // straight back down.
                    log::debug!("session: engine opened after stop, closing");
                    self.close_engine();
                    self.transition(SessionState::Stopping);
                    return;
                }
                self.transition(SessionState::Listening);
                self.emit_status(STATUS_LISTENING, true, false).await;
            }

            EngineEvent::FinalResult(text) => {
                log::info!("session: transcript: {text:?}");
                self.transcript = Some(text.clone());
                self.retry.reset();
                self.emit(UiEvent::TranscriptReady(text)).await;
                self.request_translation();
            }

            EngineEvent::Error(EngineErrorKind::Network) => {
                log::warn!("session: network recognition error");
                self.handle_network_error().await;
            }

            EngineEvent::Error(EngineErrorKind::Other(detail)) => {
                log::warn!("session: recognition error: {detail}");
                // Non-network errors consume no retry budget; just come back
                // after a fixed pause while the user still wants to listen.
                if self.intent {
                    self.schedule_restart(Duration::from_millis(self.config.restart_delay_ms));
                }
            }

            EngineEvent::Closed => {
                log::debug!("session: engine closed (state: {:?})", self.state);
                if self.state == SessionState::Errored {
                    // The close requested on exhaustion confirmed; the
                    // session stays parked until an explicit retry.
                    return;
                }
                self.transition(SessionState::Idle);

                if self.restart_pending {
                    // A backoff or fixed-delay restart is already queued; a
                    // second schedule here would undercut its delay.
                    return;
                }
                if self.intent && !self.retry.exhausted() {
                    self.schedule_restart(Duration::from_millis(self.config.restart_delay_ms));
                } else {
                    self.emit_status(STATUS_STOPPED, false, false).await;
                }
            }
        }
    }

    /// Network-class failure: consume one retry slot, back off, reopen.
    ///
    /// A failure to start the engine funnels in here too.
    async fn handle_network_error(&mut self) {
        let attempt = self.retry.record_failure();
        let delay = backoff::compute_delay(attempt);

        self.emit_status(
            &format!("Network error. Retrying in {} s...", delay.as_secs()),
            false,
            true,
        )
        .await;

        // The engine session may have survived the error; request a close so
        // the later open starts a fresh session.
        self.close_engine();

        if self.retry.exhausted() {
            log::error!("session: retry budget exhausted after {attempt} attempts");
            self.transition(SessionState::Errored);
            self.emit_status(STATUS_RETRY_EXHAUSTED, false, true).await;
        } else {
            log::info!("session: network error, attempt {attempt}, restart in {delay:?}");
            self.transition(SessionState::Idle);
            self.schedule_restart(delay);
        }
    }

    // -----------------------------------------------------------------------
    // Timers
    // -----------------------------------------------------------------------

    /// A scheduled restart fired.  Stale timers fail the state check and do
    /// nothing, so overlapping schedules can never open two sessions.
    async fn handle_restart_due(&mut self) {
        self.restart_pending = false;
        if self.intent && self.state == SessionState::Idle {
            log::debug!("session: restart timer fired, reopening");
            self.transition(SessionState::Starting);
            if self.restart_with_countdown {
                self.restart_with_countdown = false;
                if self.config.countdown_secs > 0 {
                    self.begin_countdown().await;
                }
                if !self.config.countdown_gates_start || self.config.countdown_secs == 0 {
                    self.open_engine().await;
                }
            } else {
                self.open_engine().await;
            }
        } else {
            log::debug!(
                "session: stale restart ignored (state: {:?}, intent: {})",
                self.state,
                self.intent
            );
        }
    }

    async fn handle_countdown_tick(&mut self, generation: u64, remaining: u32) {
        if generation != self.countdown_gen {
            log::debug!("session: tick from superseded countdown dropped");
            return;
        }

        self.emit(UiEvent::CountdownTick { remaining }).await;

        if remaining == 0
            && self.config.countdown_gates_start
            && self.state == SessionState::Starting
        {
            self.open_engine().await;
        }
    }

    /// Spawn a fire-once restart timer that posts back into the event
    /// channel.
    fn schedule_restart(&mut self, delay: Duration) {
        self.restart_pending = true;
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(SessionEvent::RestartDue).await;
        });
    }

    /// Start a fresh countdown, superseding any still-running one.
    ///
    /// The initial value is surfaced immediately; one tick per second follows
    /// until zero.
    async fn begin_countdown(&mut self) {
        self.countdown_gen += 1;
        let generation = self.countdown_gen;
        let secs = self.config.countdown_secs;

        self.emit(UiEvent::CountdownTick { remaining: secs }).await;

        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let mut remaining = secs;
            while remaining > 0 {
                tokio::time::sleep(Duration::from_secs(1)).await;
                remaining -= 1;
                if tx
                    .send(SessionEvent::CountdownTick {
                        generation,
                        remaining,
                    })
                    .await
                    .is_err()
                {
                    return;
                }
            }
        });
    }

    // -----------------------------------------------------------------------
    // Engine / translation plumbing
    // -----------------------------------------------------------------------

    /// Ask the engine to open.  A synchronous start failure is treated as a
    /// network-class error and enters the backoff path.
    async fn open_engine(&mut self) {
        let engine = match &self.engine {
            Capability::Available(engine) => Arc::clone(engine),
            Capability::Unavailable => return,
        };
        if let Err(e) = engine.open() {
            log::warn!("session: {e}");
            self.handle_network_error().await;
        }
    }

    fn close_engine(&self) {
        if let Capability::Available(engine) = &self.engine {
            engine.close();
        }
    }

    /// Issue a sequence-tagged translation request for the current
    /// transcript and target language.
    fn request_translation(&mut self) {
        let Some(text) = self.transcript.clone() else {
            return;
        };
        if text.is_empty() {
            return;
        }

        self.translation_seq += 1;
        let seq = self.translation_seq;
        let target_lang = self.target_lang.clone();
        let translator = Arc::clone(&self.translator);
        let tx = self.events_tx.clone();

        log::debug!("session: translation request #{seq} ({target_lang})");

        tokio::spawn(async move {
            let result = translator.translate(&text, &target_lang).await;
            let _ = tx
                .send(SessionEvent::TranslationResolved {
                    seq,
                    source_text: text,
                    target_lang,
                    result,
                })
                .await;
        });
    }

    async fn handle_translation_resolved(
        &mut self,
        seq: u64,
        source_text: String,
        target_lang: String,
        result: Result<String, crate::translate::TranslateError>,
    ) {
        // Last-issued wins; a slower earlier request must not overwrite a
        // newer result.
        if seq != self.translation_seq {
            log::debug!(
                "session: discarding stale translation #{seq} (latest is #{})",
                self.translation_seq
            );
            return;
        }

        match result {
            Ok(translated_text) => {
                let result = TranslationResult {
                    source_text,
                    target_lang,
                    translated_text,
                };
                self.translation = Some(result.clone());
                self.emit(UiEvent::TranslationReady(Ok(result))).await;
            }
            Err(e) => {
                // Per-call failure only; session state is untouched.
                log::warn!("session: translation failed: {e}");
                self.emit(UiEvent::TranslationReady(Err(e.to_string()))).await;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            log::debug!("session: {:?} -> {next:?}", self.state);
            self.state = next;
        }
    }

    async fn emit(&self, event: UiEvent) {
        if self.ui_tx.send(event).await.is_err() {
            log::debug!("session: UI channel closed, event dropped");
        }
    }

    async fn emit_status(&self, text: &str, is_recording: bool, is_error: bool) {
        self.emit(UiEvent::StatusChanged {
            text: text.into(),
            is_recording,
            is_error,
        })
        .await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Application entry point — interactive voice-translate console.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Build the translation client ([`GoogleTranslator`]) from config.
//! 4. Wire the recognition and synthesis capabilities.  This binary ships a
//!    typed-input recognition engine: utterances are entered as text lines,
//!    which stand in for a platform speech backend while exercising the full
//!    session lifecycle.
//! 5. Spawn the [`SessionController`] and a UI-event printer.
//! 6. Read commands from stdin until `quit` / EOF.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use voice_translate::{
    capability::Capability,
    config::AppConfig,
    language,
    recognition::{EngineError, EngineEvent, RecognitionEngine},
    session::{SessionCommand, SessionController, SessionEvent, UiEvent},
    synth::{SynthError, Synthesizer},
    translate::GoogleTranslator,
};

// ---------------------------------------------------------------------------
// TypedInputEngine — stand-in recognition backend for the console
// ---------------------------------------------------------------------------

/// Recognition engine backed by typed input instead of a microphone.
///
/// `open()` / `close()` confirm immediately over the session event channel;
/// utterances (and injected faults, for trying out the reconnection
/// behaviour) are fed in by the stdin loop via [`TypedInputEngine::emit`].
struct TypedInputEngine {
    events_tx: mpsc::Sender<SessionEvent>,
}

impl TypedInputEngine {
    fn new(events_tx: mpsc::Sender<SessionEvent>) -> Self {
        Self { events_tx }
    }

    fn emit(&self, event: EngineEvent) {
        if self.events_tx.try_send(SessionEvent::Engine(event)).is_err() {
            log::warn!("engine event dropped, session channel full or closed");
        }
    }
}

impl RecognitionEngine for TypedInputEngine {
    fn open(&self) -> Result<(), EngineError> {
        // Typed input has no device to acquire; confirm right away.
        self.emit(EngineEvent::Opened);
        Ok(())
    }

    fn close(&self) {
        self.emit(EngineEvent::Closed);
    }
}

// ---------------------------------------------------------------------------
// ConsoleSynthesizer
// ---------------------------------------------------------------------------

/// "Speaks" by printing to the console.
struct ConsoleSynthesizer;

impl Synthesizer for ConsoleSynthesizer {
    fn speak(&self, text: &str, lang: &str) -> Result<(), SynthError> {
        println!("(speaking, {}): {text}", language::display_name(lang));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// UI printer
// ---------------------------------------------------------------------------

/// Render controller events as console lines until the channel closes.
async fn print_ui_events(mut ui_rx: mpsc::Receiver<UiEvent>) {
    while let Some(event) = ui_rx.recv().await {
        match event {
            UiEvent::StatusChanged {
                text,
                is_recording,
                is_error,
            } => {
                let marker = if is_error {
                    "!"
                } else if is_recording {
                    "*"
                } else {
                    "-"
                };
                println!("[{marker}] {text}");
            }
            UiEvent::CountdownTick { remaining } if remaining > 0 => {
                println!("    {remaining}...");
            }
            UiEvent::CountdownTick { .. } => {}
            UiEvent::TranscriptReady(text) => {
                println!("heard: {text}");
            }
            UiEvent::TranslationReady(Ok(tr)) => {
                println!(
                    "{} ({}): {}",
                    language::display_name(&tr.target_lang),
                    tr.target_lang,
                    tr.translated_text
                );
            }
            UiEvent::TranslationReady(Err(message)) => {
                println!("[!] {message}");
            }
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  start            begin a listening session (3 s countdown)");
    println!("  stop             end the session");
    println!("  retry            reset the retry budget and start again");
    println!("  lang <code>      switch target language (en fr de it pt)");
    println!("  speak            speak the current translation");
    println!("  utter <text>     feed an utterance to the recognition engine");
    println!("  glitch [network] inject a recognition error");
    println!("  help             show this help");
    println!("  quit             exit");
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("voice-translate starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    log::info!(
        "recognition language {}, translating {} -> {}",
        config.recognition.language,
        config.translate.source_lang,
        config.translate.target_lang
    );

    // 3. Channels
    let (events_tx, events_rx) = mpsc::channel::<SessionEvent>(64);
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>(64);

    // 4. Capabilities
    let translator = Arc::new(GoogleTranslator::from_config(&config.translate));
    let engine = Arc::new(TypedInputEngine::new(events_tx.clone()));
    let recognition: Capability<Arc<dyn RecognitionEngine>> =
        Capability::Available(Arc::clone(&engine) as Arc<dyn RecognitionEngine>);
    let synth: Capability<Arc<dyn Synthesizer>> =
        Capability::Available(Arc::new(ConsoleSynthesizer));
    if !recognition.is_available() {
        println!("[!] Speech recognition is not supported; `start` will be rejected.");
    }

    // 5. Controller + UI printer
    let controller = SessionController::new(
        config.session.clone(),
        config.translate.target_lang.clone(),
        recognition,
        translator,
        synth,
        events_tx.clone(),
        ui_tx,
    );
    tokio::spawn(controller.run(events_rx));
    tokio::spawn(print_ui_events(ui_rx));

    // 6. Command loop
    println!("voice-translate console. type `help` for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        let command = match word {
            "" => continue,
            "start" => Some(SessionCommand::Start),
            "stop" => Some(SessionCommand::Stop),
            "retry" => Some(SessionCommand::Retry),
            "speak" => Some(SessionCommand::Speak),
            "lang" => {
                if rest.is_empty() {
                    println!("usage: lang <code>");
                    continue;
                }
                if !language::is_supported(rest) {
                    println!("note: `{rest}` is not in the built-in list; passing it through");
                }
                Some(SessionCommand::ChangeTargetLanguage(rest.to_string()))
            }
            "utter" => {
                if rest.is_empty() {
                    println!("usage: utter <text>");
                } else {
                    engine.emit(EngineEvent::FinalResult(rest.to_string()));
                }
                None
            }
            "glitch" => {
                let kind = if rest.is_empty() || rest == "network" {
                    voice_translate::recognition::EngineErrorKind::Network
                } else {
                    voice_translate::recognition::EngineErrorKind::Other(rest.to_string())
                };
                engine.emit(EngineEvent::Error(kind));
                None
            }
            "help" => {
                print_help();
                None
            }
            "quit" | "exit" => break,
            other => {
                println!("unknown command `{other}`; type `help`");
                None
            }
        };

        if let Some(cmd) = command {
            if events_tx.send(SessionEvent::Command(cmd)).await.is_err() {
                break;
            }
        }
    }

    log::info!("voice-translate shutting down");
    Ok(())
}

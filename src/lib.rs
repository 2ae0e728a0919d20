//! Voice-driven translation front-end.
//!
//! Captures spoken input through a pluggable recognition engine, translates
//! finalized transcripts through a remote translation service, and can speak
//! the translation back through a pluggable synthesis backend.  The heart of
//! the crate is [`session::SessionController`]: a tagged-event-driven state
//! machine that keeps a continuous recognition session alive across
//! transient failures, with exponential backoff on network errors and a
//! bounded retry budget.
//!
//! # Module map
//!
//! * [`backoff`] — pure retry-delay policy.
//! * [`language`] — supported target-language codes and display names.
//! * [`capability`] — Available/Unavailable wrapper for optional backends.
//! * [`recognition`] — recognition-engine seam (commands out, events in).
//! * [`translate`] — translation client and result types.
//! * [`synth`] — speech-synthesis seam.
//! * [`session`] — the controller, its states, and its message types.
//! * [`config`] — TOML-persisted settings.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use voice_translate::capability::Capability;
//! use voice_translate::config::AppConfig;
//! use voice_translate::session::{SessionCommand, SessionController, SessionEvent, UiEvent};
//! use voice_translate::translate::GoogleTranslator;
//!
//! # use voice_translate::recognition::RecognitionEngine;
//! # fn make_engine() -> Arc<dyn RecognitionEngine> { unimplemented!() }
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let (events_tx, events_rx) = mpsc::channel::<SessionEvent>(64);
//!     let (ui_tx, mut ui_rx) = mpsc::channel::<UiEvent>(64);
//!
//!     let controller = SessionController::new(
//!         config.session.clone(),
//!         config.translate.target_lang.clone(),
//!         Capability::Available(make_engine()),
//!         Arc::new(GoogleTranslator::from_config(&config.translate)),
//!         Capability::Unavailable,
//!         events_tx.clone(),
//!         ui_tx,
//!     );
//!     tokio::spawn(controller.run(events_rx));
//!
//!     events_tx
//!         .send(SessionEvent::Command(SessionCommand::Start))
//!         .await
//!         .unwrap();
//!     while let Some(event) = ui_rx.recv().await {
//!         println!("{event:?}");
//!     }
//! }
//! ```

pub mod backoff;
pub mod capability;
pub mod config;
pub mod language;
pub mod recognition;
pub mod session;
pub mod synth;
pub mod translate;

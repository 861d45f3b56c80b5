//! Lifecycle of a solve attempt.
//!
//! [`SolveController::start`] publishes the `Solving` state, then runs the
//! adapter calls on a worker thread. The worker reports back only through the
//! [`UiBridge`], so every visible change happens on the interactive thread in
//! the order the worker produced it.

use crate::bridge::{Poster, UiBridge};
use crate::error::SolveError;
use crate::format::format_assignment;
use crate::state::{Notification, UiState};
use crossword_core::{Assignment, Crossword, ExportError, SolverAdapter};
use log::{debug, error, info, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// Phase of a solve attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Solving,
    Solved,
    NoSolution,
    Error,
}

impl SessionState {
    /// Short status line for this state
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Solving => "Solving...",
            SessionState::Solved => "Solved",
            SessionState::NoSolution => "No solution found",
            SessionState::Error => "Error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Solved | SessionState::NoSolution | SessionState::Error
        )
    }
}

/// Inputs of one solve attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveRequest {
    pub structure_path: PathBuf,
    pub words_path: PathBuf,
    /// Image to write after a successful solve
    pub output_path: Option<PathBuf>,
}

impl SolveRequest {
    /// Build from raw form text; a blank output path means no export
    pub fn from_form(structure: &str, words: &str, output: &str) -> Self {
        let output = output.trim();
        Self {
            structure_path: PathBuf::from(structure.trim()),
            words_path: PathBuf::from(words.trim()),
            output_path: (!output.is_empty()).then(|| PathBuf::from(output)),
        }
    }
}

/// Record of the current solve attempt as seen by the interface
#[derive(Debug, Clone)]
pub struct SolveSession {
    generation: u64,
    request: Option<SolveRequest>,
    state: SessionState,
    assignment: Option<Assignment>,
    error_message: Option<String>,
}

impl SolveSession {
    pub fn idle() -> Self {
        Self {
            generation: 0,
            request: None,
            state: SessionState::Idle,
            assignment: None,
            error_message: None,
        }
    }

    fn solving(generation: u64, request: SolveRequest) -> Self {
        Self {
            generation,
            request: Some(request),
            state: SessionState::Solving,
            assignment: None,
            error_message: None,
        }
    }

    /// Identifies the attempt; bumps on every start
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn request(&self) -> Option<&SolveRequest> {
        self.request.as_ref()
    }

    /// Present only in [`SessionState::Solved`]
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// Present only in [`SessionState::Error`]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn status_text(&self) -> &'static str {
        self.state.label()
    }

    pub fn is_solving(&self) -> bool {
        self.state == SessionState::Solving
    }

    /// Move from `Solving` into a terminal state. Any other transition is
    /// refused and reported as `false`.
    fn finish(&mut self, outcome: Result<Assignment, &SolveError>) -> bool {
        if !self.is_solving() {
            warn!(
                "solve #{} ignoring terminal transition from {:?}",
                self.generation, self.state
            );
            return false;
        }

        match outcome {
            Ok(assignment) => {
                self.state = SessionState::Solved;
                self.assignment = Some(assignment);
            }
            Err(SolveError::NoSolutionFound) => {
                self.state = SessionState::NoSolution;
            }
            Err(err) => {
                self.state = SessionState::Error;
                self.error_message = Some(err.user_message());
            }
        }
        true
    }
}

/// Reasons a session command was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a solve is already in progress")]
    Busy,
}

/// Starts solve attempts and owns the bridge that carries their results
pub struct SolveController {
    adapter: Arc<dyn SolverAdapter>,
    bridge: UiBridge<UiState>,
    last_generation: u64,
    worker: Option<JoinHandle<()>>,
}

impl SolveController {
    pub fn new(adapter: Arc<dyn SolverAdapter>) -> Self {
        Self {
            adapter,
            bridge: UiBridge::new(),
            last_generation: 0,
            worker: None,
        }
    }

    /// Apply pending worker updates; call once per event-loop turn
    pub fn pump(&self, ui: &mut UiState) -> usize {
        self.bridge.pump(ui)
    }

    /// Begin a fresh solve attempt without blocking.
    ///
    /// Refused while another attempt has not yet released the trigger.
    pub fn start(&mut self, ui: &mut UiState, request: SolveRequest) -> Result<u64, SessionError> {
        self.pump(ui);
        if ui.session.is_solving() || !ui.trigger_enabled {
            warn!("solve request rejected: #{} still running", ui.session.generation());
            return Err(SessionError::Busy);
        }

        self.last_generation += 1;
        let generation = self.last_generation;
        info!(
            "solve #{} started: structure={} words={} output={:?}",
            generation,
            request.structure_path.display(),
            request.words_path.display(),
            request.output_path
        );

        let poster = self.bridge.poster();
        let published = request.clone();
        poster.post(move |ui: &mut UiState| {
            ui.session = SolveSession::solving(generation, published);
            ui.output.clear();
            ui.trigger_enabled = false;
        });
        // Publish before the worker exists so a second start sees `Solving`
        self.pump(ui);

        if let Some(previous) = self.worker.take() {
            if !previous.is_finished() {
                debug!("previous worker still winding down");
            }
        }

        let adapter = Arc::clone(&self.adapter);
        let worker_poster = poster.clone();
        let spawned = thread::Builder::new()
            .name(format!("solve-{}", generation))
            .spawn(move || run_worker(adapter.as_ref(), worker_poster, generation, request));

        match spawned {
            Ok(handle) => self.worker = Some(handle),
            Err(err) => {
                error!("solve #{} could not spawn worker: {}", generation, err);
                let release = TriggerRelease::new(poster.clone(), generation);
                publish_terminal(
                    &poster,
                    generation,
                    Err(SolveError::Unexpected(format!(
                        "could not start solver thread: {}",
                        err
                    ))),
                );
                drop(release);
                self.pump(ui);
            }
        }

        Ok(generation)
    }

    /// Return to `Idle`, clearing any previous result
    pub fn reset(&mut self, ui: &mut UiState) -> Result<(), SessionError> {
        self.pump(ui);
        if ui.session.is_solving() || !ui.trigger_enabled {
            return Err(SessionError::Busy);
        }

        self.bridge.poster().post(|ui: &mut UiState| {
            ui.session = SolveSession::idle();
            ui.output.clear();
        });
        self.pump(ui);
        debug!("session reset to idle");
        Ok(())
    }
}

/// Result of the blocking part of an attempt
struct Solved {
    crossword: Crossword,
    assignment: Assignment,
    text: String,
}

/// Re-enables the trigger when dropped, so every exit path releases it
struct TriggerRelease {
    poster: Poster<UiState>,
    generation: u64,
}

impl TriggerRelease {
    fn new(poster: Poster<UiState>, generation: u64) -> Self {
        Self { poster, generation }
    }
}

impl Drop for TriggerRelease {
    fn drop(&mut self) {
        let generation = self.generation;
        self.poster.post(move |ui: &mut UiState| {
            if ui.session.generation() == generation {
                ui.trigger_enabled = true;
            }
        });
    }
}

fn run_worker(
    adapter: &dyn SolverAdapter,
    poster: Poster<UiState>,
    generation: u64,
    request: SolveRequest,
) {
    let _release = TriggerRelease::new(poster.clone(), generation);

    let result = panic::catch_unwind(AssertUnwindSafe(|| attempt(adapter, &request)))
        .unwrap_or_else(|payload| {
            Err(SolveError::Unexpected(format!(
                "solver panicked: {}",
                panic_message(&*payload)
            )))
        });

    match result {
        Ok(solved) => {
            info!("solve #{} solved ({} words)", generation, solved.assignment.len());
            publish_terminal(
                &poster,
                generation,
                Ok((solved.assignment.clone(), solved.text.clone())),
            );
            if let Some(path) = request.output_path {
                export(adapter, &poster, generation, &solved, path);
            }
        }
        Err(err) => {
            info!("solve #{} ended: {}", generation, err);
            publish_terminal(&poster, generation, Err(err));
        }
    }
}

fn attempt(adapter: &dyn SolverAdapter, request: &SolveRequest) -> Result<Solved, SolveError> {
    let crossword = adapter.construct(&request.structure_path, &request.words_path)?;
    debug!(
        "puzzle {}x{} with {} variables and {} words",
        crossword.height(),
        crossword.width(),
        crossword.variables().len(),
        crossword.words().len()
    );

    let assignment = adapter
        .solve(&crossword)
        .ok_or(SolveError::NoSolutionFound)?;
    let text = format_assignment(adapter, &crossword, &assignment);

    Ok(Solved {
        crossword,
        assignment,
        text,
    })
}

/// Post the single terminal transition of an attempt
fn publish_terminal(
    poster: &Poster<UiState>,
    generation: u64,
    outcome: Result<(Assignment, String), SolveError>,
) {
    poster.post(move |ui: &mut UiState| {
        if ui.session.generation() != generation {
            debug!("dropping stale result of solve #{}", generation);
            return;
        }

        match outcome {
            Ok((assignment, text)) => {
                if ui.session.finish(Ok(assignment)) {
                    ui.output = text;
                }
                debug_assert!(ui.session.state().is_terminal());
            }
            Err(err) => {
                if ui.session.finish(Err(&err)) {
                    if err == SolveError::NoSolutionFound {
                        ui.output.clear();
                    }
                    ui.notify(Notification {
                        severity: err.severity(),
                        message: err.user_message(),
                    });
                }
            }
        }
    });
}

fn export(
    adapter: &dyn SolverAdapter,
    poster: &Poster<UiState>,
    generation: u64,
    solved: &Solved,
    path: PathBuf,
) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        adapter.save(&solved.crossword, &solved.assignment, &path)
    }))
    .unwrap_or_else(|payload| {
        Err(ExportError::Write(format!(
            "image writer panicked: {}",
            panic_message(&*payload)
        )))
    });

    let notification = match result {
        Ok(()) => {
            info!("solve #{} exported to {}", generation, path.display());
            Notification::info(format!("Image saved to {}", path.display()))
        }
        Err(err) => {
            let err = SolveError::from(err);
            debug_assert!(err.is_export());
            warn!("solve #{} export failed: {}", generation, err);
            Notification::error(err.user_message())
        }
    };

    poster.post(move |ui: &mut UiState| {
        if ui.session.generation() == generation {
            ui.notify(notification);
        }
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

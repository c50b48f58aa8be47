// src/app/state.rs
//! Application state management.

use std::{
    path::{Path, PathBuf},
    sync::{
        mpsc::{Receiver, TryRecvError},
        Arc,
    },
    time::Instant,
};

use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use ratatui::{widgets::ListState, Frame};
use tracing::{info, warn};

use super::selection::Selection;
use super::snapshot::save_snapshot;
use crate::{
    audio::{AudioInput, CapturePipeline, CpalInput},
    compare::{
        require_both, AdviceService, AudioPayload, CommandAdvisor, ComparisonEngine,
        ComparisonState, ComparisonVerdict,
    },
    config::AppConfig,
    error::ComparisonError,
    fs::{load_entries, tail_path, BrowserEntry},
    render::{FrameScheduler, LoopState, RenderContext, RenderLoop, Scene},
    ui::{
        keybindings::{key_to_action, NavigationAction},
        layout::{compute_layout, Section, SectionVisibility},
        widgets::{
            render_analyzer, render_comparison_panel, render_file_list, render_profile_panel,
            ProfileView,
        },
    },
};

type ComparisonResult = Result<ComparisonVerdict, ComparisonError>;

/// Main application state.
pub struct App {
    config: AppConfig,

    /// Directory being browsed
    pub current_dir: PathBuf,
    pub entries: Vec<BrowserEntry>,
    pub state: ListState,
    pub selected: usize,

    scheduler: FrameScheduler,
    pipeline: CapturePipeline,
    render_loop: RenderLoop,
    selection: Selection,
    context: RenderContext,
    /// Most recent analyzer frame, kept for snapshots
    last_scene: Option<Scene>,

    reference: Option<AudioPayload>,
    candidate: Option<AudioPayload>,
    engine: ComparisonEngine,
    comparison: ComparisonState,
    comparison_rx: Option<Receiver<ComparisonResult>>,

    /// One-line human-readable status
    pub status: String,
    pub visibility: SectionVisibility,
}

impl App {
    /// Application wired to the default microphone and the configured advisor.
    pub fn new(config: AppConfig) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let advisor = Arc::new(CommandAdvisor::new(config.advisor.command.clone()));
        Self::with_services(config, Box::new(CpalInput::new()), advisor, cwd)
    }

    pub fn with_services(
        config: AppConfig,
        input: Box<dyn AudioInput>,
        advisor: Arc<dyn AdviceService>,
        dir: PathBuf,
    ) -> Result<Self> {
        let entries =
            load_entries(&dir).with_context(|| format!("failed to list {}", dir.display()))?;
        let mut state = ListState::default();
        state.select(Some(0));

        let scheduler = FrameScheduler::new(config.frame_interval());
        let pipeline = CapturePipeline::new(input, scheduler.clone());
        let render_loop = RenderLoop::new(
            f64::from(config.display.canvas_width),
            f64::from(config.display.canvas_height),
        );
        let selection = Selection::from_session(&config.session);
        let context = selection.render_context();
        let engine = match &config.advisor.instruction {
            Some(instruction) => ComparisonEngine::with_instruction(advisor, instruction.clone()),
            None => ComparisonEngine::new(advisor),
        };

        Ok(Self {
            config,
            current_dir: dir,
            entries,
            state,
            selected: 0,
            scheduler,
            pipeline,
            render_loop,
            selection,
            context,
            last_scene: None,
            reference: None,
            candidate: None,
            engine,
            comparison: ComparisonState::Idle,
            comparison_rx: None,
            status: "a: capture  g/G: genre  s: subgenre  i/I: instrument  p: snapshot  q: quit"
                .to_string(),
            visibility: SectionVisibility::default(),
        })
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        self.apply(key_to_action(&key))
    }

    /// Apply one action. Returns true when the app should quit.
    pub fn apply(&mut self, action: NavigationAction) -> bool {
        match action {
            NavigationAction::ToggleSection(d) => self.visibility.toggle(d),
            NavigationAction::Down => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
            }
            NavigationAction::Up => self.selected = self.selected.saturating_sub(1),
            NavigationAction::Enter => self.enter_selected(),
            NavigationAction::Back => {
                if self.current_dir.pop() {
                    self.reload_entries();
                }
            }
            NavigationAction::ToggleCapture => self.toggle_capture(),
            NavigationAction::NextGenre => self.change_selection(Selection::next_genre),
            NavigationAction::PreviousGenre => self.change_selection(Selection::previous_genre),
            NavigationAction::NextSubgenre => self.change_selection(Selection::next_subgenre),
            NavigationAction::NextInstrument => self.change_selection(Selection::next_instrument),
            NavigationAction::PreviousInstrument => {
                self.change_selection(Selection::previous_instrument)
            }
            NavigationAction::MarkReference => {
                if let Some(payload) = self.load_selected_payload() {
                    self.status = format!("reference: {}", payload.file_name());
                    self.reference = Some(payload);
                }
            }
            NavigationAction::MarkCandidate => {
                if let Some(payload) = self.load_selected_payload() {
                    self.status = format!("candidate: {}", payload.file_name());
                    self.candidate = Some(payload);
                }
            }
            NavigationAction::Compare => self.start_comparison(),
            NavigationAction::Snapshot => self.snapshot(),
            NavigationAction::Quit => {
                self.pipeline.stop();
                return true;
            }
            NavigationAction::None => {}
        }

        self.state.select(Some(self.selected));
        false
    }

    /// Drive the render loop and collect background results.
    pub fn tick(&mut self, now: Instant) {
        if let Some(scene) =
            self.render_loop
                .tick(now, &self.scheduler, &mut self.pipeline, &self.context)
        {
            self.last_scene = Some(scene);
        }

        if self.pipeline.is_active() && !self.pipeline.is_live() {
            warn!("audio input ended; stopping capture");
            self.pipeline.stop();
            self.status = "audio input lost; press a to restart".to_string();
        }

        self.poll_comparison();
    }

    /// When the next frame is due, if capture is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn loop_state(&self) -> LoopState {
        self.render_loop.state(&self.pipeline)
    }

    pub fn is_capturing(&self) -> bool {
        self.pipeline.is_active()
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn last_scene(&self) -> Option<&Scene> {
        self.last_scene.as_ref()
    }

    pub fn comparison(&self) -> &ComparisonState {
        &self.comparison
    }

    fn toggle_capture(&mut self) {
        if self.pipeline.is_active() {
            self.pipeline.stop();
            self.status = "capture stopped".to_string();
            return;
        }
        match self.pipeline.start(self.context.profile()) {
            Ok(()) => self.status = "capturing from default input".to_string(),
            Err(e) => {
                warn!(error = %e, "capture failed to start");
                self.status = e.to_string();
            }
        }
    }

    fn change_selection(&mut self, change: impl FnOnce(&mut Selection)) {
        change(&mut self.selection);
        self.context = self.selection.render_context();
        self.pipeline.reconfigure(self.context.profile());
        info!(
            genre = %self.selection.genre_status(),
            instrument = self.context.instrument().map_or("none", |i| i.name),
            "selection changed"
        );
    }

    fn enter_selected(&mut self) {
        let Some(entry) = self.entries.get(self.selected) else {
            return;
        };
        if entry.is_dir {
            self.current_dir.push(&entry.name);
            self.reload_entries();
        }
    }

    fn reload_entries(&mut self) {
        match load_entries(&self.current_dir) {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                self.status = format!("cannot list {}: {e}", self.current_dir.display());
                self.entries.clear();
            }
        }
        self.selected = 0;
    }

    fn selected_path(&self) -> Option<PathBuf> {
        let entry = self.entries.get(self.selected)?;
        (!entry.is_dir).then(|| self.current_dir.join(&entry.name))
    }

    fn load_selected_payload(&mut self) -> Option<AudioPayload> {
        let Some(path) = self.selected_path() else {
            self.status = "select an audio file first".to_string();
            return None;
        };
        match AudioPayload::load(&path) {
            Ok(payload) => Some(payload),
            Err(e) => {
                self.status = e.to_string();
                None
            }
        }
    }

    fn start_comparison(&mut self) {
        if self.comparison.is_pending() {
            return;
        }
        match require_both(self.reference.as_ref(), self.candidate.as_ref()) {
            Ok((reference, candidate)) => {
                self.comparison_rx = Some(self.engine.spawn(reference.clone(), candidate.clone()));
                self.comparison = ComparisonState::Pending;
                self.status = "comparison requested".to_string();
            }
            Err(e) => {
                self.status = e.to_string();
                self.comparison = ComparisonState::Failed(e.to_string());
            }
        }
    }

    fn poll_comparison(&mut self) {
        let Some(rx) = &self.comparison_rx else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(ComparisonError::DelegateFailure(
                "comparison worker exited without a result".to_string(),
            )),
        };
        self.comparison_rx = None;
        if let Err(e) = &result {
            warn!(error = %e, "comparison failed");
            self.status = e.to_string();
        } else {
            self.status = "comparison ready".to_string();
        }
        self.comparison = ComparisonState::from_result(result);
    }

    fn snapshot(&mut self) {
        let Some(scene) = &self.last_scene else {
            self.status = "nothing to snapshot yet".to_string();
            return;
        };
        let display = &self.config.display;
        self.status = match save_snapshot(scene, &display.snapshot_dir, &display.snapshot_extension)
        {
            Ok(path) => format!("snapshot saved to {}", path.display()),
            Err(e) => format!("snapshot failed: {e:#}"),
        };
    }

    fn picked_path(pick: Option<&AudioPayload>) -> Option<&Path> {
        pick.map(|p| p.path.as_path())
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area(), &self.visibility);

        for (section, area) in layout.columns {
            match section {
                Section::Browser => {
                    let title = format!("1: {}", tail_path(&self.current_dir, 3));
                    render_file_list(
                        f,
                        area,
                        &title,
                        &self.current_dir,
                        &self.entries,
                        (
                            Self::picked_path(self.reference.as_ref()),
                            Self::picked_path(self.candidate.as_ref()),
                        ),
                        &mut self.state,
                    );
                }
                Section::Profile => {
                    let genre_status = self.selection.genre_status();
                    let mode = self.selection.mode();
                    let view = ProfileView {
                        capturing: self.pipeline.is_active(),
                        genre_status: &genre_status,
                        mode: &mode,
                        profile: self.context.profile(),
                        instrument: self.context.instrument(),
                    };
                    render_profile_panel(f, area, &view);
                }
                Section::Comparison => render_comparison_panel(
                    f,
                    area,
                    self.reference.as_ref(),
                    self.candidate.as_ref(),
                    &self.comparison,
                ),
            }
        }

        if let Some(area) = layout.analyzer_area {
            render_analyzer(f, area, self.last_scene.as_ref(), self.loop_state());
        }

        f.render_widget(
            ratatui::widgets::Paragraph::new(self.status.as_str()),
            layout.status_area,
        );
    }
}

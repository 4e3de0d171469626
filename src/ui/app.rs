//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::ui::{input_poll, splash_duration};
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::ui::dashboard::{DashboardState, KeyAction, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::{CommandDispatcher, PollHandle, Poller};
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub poll_interval: Duration,
}

impl UIConfig {
    pub fn new(with_background_color: bool, poll_interval: Duration) -> Self {
        Self {
            with_background_color,
            poll_interval,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen displaying sensor nodes and connection status.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The backend the dashboard talks to.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from the poller and the command dispatcher.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    poller: Poller,

    dispatcher: CommandDispatcher,

    /// Running poll loop, present only while the dashboard is active.
    poll_handle: Option<PollHandle>,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        poller: Poller,
        dispatcher: CommandDispatcher,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            environment,
            current_screen: Screen::Splash,
            event_receiver,
            poller,
            dispatcher,
            poll_handle: None,
            ui_config,
        }
    }

    /// Switches to the dashboard and starts polling.
    ///
    /// Calling it again while the dashboard is active does not start a second
    /// timer.
    pub fn activate_dashboard(&mut self) {
        if !matches!(self.current_screen, Screen::Dashboard(_)) {
            self.current_screen = Screen::Dashboard(Box::new(DashboardState::new(
                self.environment.clone(),
                self.start_time,
                self.ui_config.clone(),
            )));
        }
        if self.poll_handle.is_none() {
            self.poll_handle = Some(self.poller.spawn(self.ui_config.poll_interval));
        }
    }

    /// Stops polling and drops the dashboard state.
    pub async fn teardown(&mut self) {
        if let Some(handle) = self.poll_handle.take() {
            handle.shutdown().await;
        }
        self.current_screen = Screen::Splash;
    }

    #[cfg(test)]
    pub fn is_polling(&self) -> bool {
        self.poll_handle.as_ref().is_some_and(PollHandle::is_active)
    }

    #[cfg(test)]
    pub fn current_screen(&self) -> &Screen {
        &self.current_screen
    }

    /// Moves worker events into the dashboard queue and applies them.
    ///
    /// Events arriving before the dashboard exists are dropped.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut self.current_screen {
                state.add_event(event);
            }
        }
        if let Screen::Dashboard(state) = &mut self.current_screen {
            state.update();
        }
    }

    /// Performs the side effect requested by a dashboard key press.
    /// Returns false when the app should exit.
    fn perform(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Quit => return false,
            KeyAction::Refresh => {
                let poller = self.poller.clone();
                tokio::spawn(async move {
                    poller.manual_refresh().await;
                });
            }
            KeyAction::Dispatch { device, action } => {
                self.dispatcher.dispatch(&device, &action);
            }
            KeyAction::None => {}
        }
        true
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();

    // UI event loop
    loop {
        app.drain_events();
        terminal.draw(|f| render(f, &app.current_screen))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration() {
                app.activate_dashboard();
                continue;
            }
        }

        // Poll for key events
        if event::poll(input_poll())? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                let keep_running = match &mut app.current_screen {
                    Screen::Splash => {
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            false
                        } else {
                            // Any other key skips the splash screen
                            app.activate_dashboard();
                            true
                        }
                    }
                    Screen::Dashboard(state) => {
                        let action = state.handle_key(key.code);
                        app.perform(action)
                    }
                };

                if !keep_running {
                    app.teardown().await;
                    return Ok(());
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::snapshot::SensorSnapshot;
    use crate::ui::dashboard::state::ConnectionStatus;
    use crate::workers::EventSender;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn app_with(backend: MockBackend) -> App {
        let (sender, receiver) = mpsc::channel(100);
        let backend = Arc::new(backend);
        let event_sender = EventSender::new(sender);
        App::new(
            Environment::Local,
            receiver,
            Poller::new(backend.clone(), event_sender.clone()),
            CommandDispatcher::new(backend, event_sender),
            UIConfig::new(false, Duration::from_secs(2)),
        )
    }

    fn counting_backend(calls: Arc<AtomicUsize>) -> MockBackend {
        let mut backend = MockBackend::new();
        backend.expect_environment().return_const(Environment::Local);
        backend.expect_get_realtime().returning(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            SensorSnapshot::from_json(json!({"kitchen": {"node": "kitchen", "temp": 22.5}}))
                .map_err(Into::into)
        });
        backend
    }

    #[tokio::test(start_paused = true)]
    async fn test_activation_polls_once_and_updates_dashboard() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut app = app_with(counting_backend(calls.clone()));

        app.activate_dashboard();
        tokio::time::sleep(Duration::from_millis(100)).await;
        app.drain_events();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        match app.current_screen() {
            Screen::Dashboard(state) => {
                assert_eq!(state.status(), ConnectionStatus::SystemOnline);
                assert_eq!(state.snapshot().nodes["kitchen"].format_temp(), "22.5°C");
            }
            Screen::Splash => panic!("dashboard not active"),
        }
        app.teardown().await;
    }

    #[tokio::test(start_paused = true)]
    // Activating twice keeps a single timer running.
    async fn test_double_activation_keeps_one_timer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut app = app_with(counting_backend(calls.clone()));

        app.activate_dashboard();
        app.activate_dashboard();
        tokio::time::sleep(Duration::from_millis(4_500)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        app.teardown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_stops_polling() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut app = app_with(counting_backend(calls.clone()));

        app.activate_dashboard();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(app.is_polling());

        app.teardown().await;
        assert!(!app.is_polling());
        assert!(matches!(app.current_screen(), Screen::Splash));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

use log::{error, info};

use crate::connections::errors::RasError;
use crate::core::dispatcher::CommandDispatcher;
use crate::core::presenter::{notification_text, TrayPresenter, WATCHER_FAILED_TEXT};
use crate::core::tray_state::{MenuAction, TrayState};
use crate::core::watcher::{ConnectionEvent, ConnectionWatcher, WatcherEvent};

/// A message for the thread that owns the tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Connection(ConnectionEvent),
    /// The watcher ended on an OS error; the tray no longer follows transitions.
    WatcherFailed(String),
    Menu(MenuAction),
}

impl From<WatcherEvent> for AppEvent {
    fn from(event: WatcherEvent) -> Self {
        match event {
            WatcherEvent::Transition(event) => AppEvent::Connection(event),
            WatcherEvent::Failed(reason) => AppEvent::WatcherFailed(reason),
        }
    }
}

/// What the tray owner must do after handling an [`AppEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Render(TrayState),
    Notify(String),
    Exit,
}

/// Single owner of tray state.
///
/// Lives on the UI thread. Watcher callbacks and menu clicks reach it only as
/// [`AppEvent`]s, and it answers with [`Effect`]s for the UI layer to apply.
pub struct TrayController {
    presenter: TrayPresenter,
    dispatcher: CommandDispatcher,
    watcher: ConnectionWatcher,
}

impl TrayController {
    pub fn new(
        presenter: TrayPresenter,
        dispatcher: CommandDispatcher,
        watcher: ConnectionWatcher,
    ) -> Self {
        Self {
            presenter,
            dispatcher,
            watcher,
        }
    }

    /// Starts the watcher, forwarding its events to `sink`, and returns the
    /// initial tray state.
    pub fn start(
        &mut self,
        mut sink: impl FnMut(AppEvent) + Send + 'static,
    ) -> Result<TrayState, RasError> {
        self.watcher.start(move |event| sink(event.into()))?;
        Ok(self.presenter.refresh())
    }

    pub fn handle(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::Connection(event) => {
                let state = self.presenter.refresh();
                vec![Effect::Render(state), Effect::Notify(notification_text(&event))]
            }
            AppEvent::WatcherFailed(reason) => {
                error!("Connection watcher died: {}", reason);
                // Reap the thread so `is_watching` is false from here on.
                self.watcher.stop();
                let state = self.presenter.refresh();
                vec![Effect::Render(state), Effect::Notify(WATCHER_FAILED_TEXT.to_string())]
            }
            AppEvent::Menu(MenuAction::Connect(profile)) => {
                drop(self.dispatcher.connect(&profile));
                Vec::new()
            }
            AppEvent::Menu(MenuAction::Disconnect(profile)) => {
                drop(self.dispatcher.disconnect(&profile));
                Vec::new()
            }
            AppEvent::Menu(MenuAction::Exit) => {
                info!("Exit requested.");
                // The watcher must be gone before the tray icon is released.
                self.shutdown();
                vec![Effect::Exit]
            }
        }
    }

    /// Stops the watcher; no watcher event is produced once this returns.
    pub fn shutdown(&mut self) {
        self.watcher.stop();
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_running()
    }
}

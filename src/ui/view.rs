use anyhow::Result;
use log::{debug, error, info};

use crate::core::{Effect, TrayState};

/// The native tray as seen by the effect loop.
pub trait TrayBackend {
    /// Puts the icon in the notification area for the first time.
    fn create(&mut self, state: &TrayState) -> Result<()>;

    /// Replaces icon, tooltip and menu of a tray that is already shown.
    fn update(&mut self, state: &TrayState) -> Result<()>;

    fn notify(&self, message: &str);

    /// Removes the icon from the notification area.
    fn release(&mut self);
}

/// What the event loop should do after a batch of effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopFlow {
    Continue,
    /// The user picked "Exit" and the tray is gone.
    Exit,
    /// The tray could not be shown, so the user has no way to exit it.
    Fail,
}

/// Applies controller [`Effect`]s to a [`TrayBackend`].
///
/// The first render creates the tray and a failure there is fatal. Later
/// renders only update it; their failures are logged and the old tray stays.
/// Once the loop has exited or failed every further effect is dropped.
pub struct TrayView<B> {
    backend: B,
    shown: bool,
    finished: Option<LoopFlow>,
}

impl<B: TrayBackend> TrayView<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            shown: false,
            finished: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn apply(&mut self, effects: Vec<Effect>) -> LoopFlow {
        for effect in effects {
            if let Some(flow) = self.finished {
                debug!("Tray already finished ({:?}), dropping {:?}", flow, effect);
                return flow;
            }
            match effect {
                Effect::Render(state) if self.shown => {
                    if let Err(e) = self.backend.update(&state) {
                        error!("Tray update failed: {:#}", e);
                    }
                }
                Effect::Render(state) => match self.backend.create(&state) {
                    Ok(()) => self.shown = true,
                    Err(e) => {
                        error!("Could not create the tray icon: {:#}", e);
                        self.finished = Some(LoopFlow::Fail);
                    }
                },
                Effect::Notify(message) => self.backend.notify(&message),
                Effect::Exit => {
                    self.backend.release();
                    self.shown = false;
                    info!("Tray released.");
                    self.finished = Some(LoopFlow::Exit);
                }
            }
        }
        self.finished.unwrap_or(LoopFlow::Continue)
    }
}

mod menu;
mod toast;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::{error, info, warn};
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tokio::runtime::Handle;
use tray_icon::menu::{Icon as MenuIcon, MenuEvent, MenuId};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

use crate::assets::{IconImage, TrayAssets};
use crate::connections::ras::RasApi;
use crate::core::settings::Settings;
use crate::core::{
    AppEvent, CommandDispatcher, ConnectionWatcher, Effect, IconVariant, MenuAction,
    TrayController, TrayPresenter, TrayState,
};
use crate::ui::view::{LoopFlow, TrayBackend, TrayView};

/// Everything that reaches the event loop from other threads.
enum UserEvent {
    App(AppEvent),
    Menu(MenuEvent),
}

/// The native side of the tray. Only touched from the event-loop thread.
struct NativeTray {
    tray: Option<TrayIcon>,
    actions: HashMap<MenuId, MenuAction>,
    connected: Icon,
    disconnected: Icon,
    check: MenuIcon,
    notifications: bool,
    notification_timeout_ms: u32,
}

impl NativeTray {
    fn new(assets: &TrayAssets, settings: &Settings) -> Result<Self> {
        Ok(Self {
            tray: None,
            actions: HashMap::new(),
            connected: tray_image(&assets.connected).context("bad connected icon")?,
            disconnected: tray_image(&assets.disconnected).context("bad disconnected icon")?,
            check: MenuIcon::from_rgba(
                assets.check.rgba.clone(),
                assets.check.width,
                assets.check.height,
            )
            .context("bad check-mark glyph")?,
            notifications: settings.notifications,
            notification_timeout_ms: settings.notification_timeout_ms,
        })
    }

    fn action(&self, id: &MenuId) -> Option<MenuAction> {
        self.actions.get(id).cloned()
    }

    fn icon_for(&self, state: &TrayState) -> Icon {
        match state.icon {
            IconVariant::Connected => self.connected.clone(),
            IconVariant::Disconnected => self.disconnected.clone(),
        }
    }
}

impl TrayBackend for NativeTray {
    fn create(&mut self, state: &TrayState) -> Result<()> {
        let rendered = menu::build_menu(state, &self.check).context("failed to build menu")?;
        let tray = TrayIconBuilder::new()
            .with_icon(self.icon_for(state))
            .with_tooltip(&state.tooltip)
            .with_menu(Box::new(rendered.menu))
            .build()
            .context("failed to create tray icon")?;
        self.tray = Some(tray);
        self.actions = rendered.actions;
        Ok(())
    }

    fn update(&mut self, state: &TrayState) -> Result<()> {
        let Some(tray) = &self.tray else {
            bail!("no tray icon to update");
        };
        let rendered = menu::build_menu(state, &self.check).context("failed to build menu")?;
        tray.set_icon(Some(self.icon_for(state)))
            .context("failed to set tray icon")?;
        tray.set_tooltip(Some(&state.tooltip))
            .context("failed to set tooltip")?;
        tray.set_menu(Some(Box::new(rendered.menu)));
        self.actions = rendered.actions;
        Ok(())
    }

    fn notify(&self, message: &str) {
        if self.notifications {
            toast::show_toast(message, self.notification_timeout_ms);
        }
    }

    fn release(&mut self) {
        if let Some(tray) = self.tray.take() {
            if let Err(e) = tray.set_visible(false) {
                warn!("Could not hide tray icon: {}", e);
            }
        }
        self.actions.clear();
    }
}

fn tray_image(image: &IconImage) -> Result<Icon> {
    Ok(Icon::from_rgba(
        image.rgba.clone(),
        image.width,
        image.height,
    )?)
}

/// Runs the tray until the user picks "Exit". Never returns on success.
pub fn run(settings: Settings, api: Arc<dyn RasApi>, runtime: Handle) -> Result<()> {
    let assets = TrayAssets::load(&settings.assets_dir()).context("failed to load tray images")?;
    let mut view = TrayView::new(NativeTray::new(&assets, &settings)?);

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();

    let menu_proxy = event_loop.create_proxy();
    MenuEvent::set_event_handler(Some(move |event| {
        let _ = menu_proxy.send_event(UserEvent::Menu(event));
    }));

    let mut controller = TrayController::new(
        TrayPresenter::new(api.clone()),
        CommandDispatcher::new(api.clone(), runtime),
        ConnectionWatcher::new(api),
    );
    // Watcher callbacks run on the watcher thread; they only post to the loop.
    let watcher_proxy = event_loop.create_proxy();
    let initial = controller
        .start(move |event| {
            let _ = watcher_proxy.send_event(UserEvent::App(event));
        })
        .context("failed to subscribe to RAS notifications")?;
    let mut initial = Some(initial);

    info!("Entering tray event loop.");
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        let effects = match event {
            Event::NewEvents(StartCause::Init) => match initial.take() {
                Some(state) => vec![Effect::Render(state)],
                None => Vec::new(),
            },
            Event::UserEvent(UserEvent::Menu(event)) => match view.backend().action(&event.id) {
                Some(action) => controller.handle(AppEvent::Menu(action)),
                None => Vec::new(),
            },
            Event::UserEvent(UserEvent::App(event)) => controller.handle(event),
            _ => Vec::new(),
        };

        match view.apply(effects) {
            LoopFlow::Continue => {}
            LoopFlow::Exit => {
                info!("Exiting.");
                *control_flow = ControlFlow::Exit;
            }
            LoopFlow::Fail => {
                error!("No tray icon could be shown, exiting.");
                controller.shutdown();
                *control_flow = ControlFlow::ExitWithCode(1);
            }
        }
    })
}

use anyhow::{anyhow, Result};
use log::LevelFilter;
use vpn_tray::core::{Effect, TrayState};
use vpn_tray::ui::view::{LoopFlow, TrayBackend, TrayView};

fn init_test_logging() {
    //   Logs will appear only when you run with `-- --nocapture`
    //   or when the test fails.
    let _ = env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Records every call; creation and updates can be told to fail.
#[derive(Default)]
struct RecordingBackend {
    fail_create: bool,
    fail_update: bool,
    calls: Vec<String>,
}

impl TrayBackend for RecordingBackend {
    fn create(&mut self, state: &TrayState) -> Result<()> {
        self.calls.push(format!("create {}", state.tooltip));
        if self.fail_create {
            return Err(anyhow!("shell refused the icon"));
        }
        Ok(())
    }

    fn update(&mut self, state: &TrayState) -> Result<()> {
        self.calls.push(format!("update {}", state.tooltip));
        if self.fail_update {
            return Err(anyhow!("tooltip rejected"));
        }
        Ok(())
    }

    fn notify(&self, _message: &str) {}

    fn release(&mut self) {
        self.calls.push("release".into());
    }
}

fn render(tooltip_of: &[&str]) -> Effect {
    let profiles: Vec<String> = tooltip_of.iter().map(|s| s.to_string()).collect();
    let active: Vec<vpn_tray::ActiveConnection> = tooltip_of
        .iter()
        .map(|s| vpn_tray::ActiveConnection::new(*s))
        .collect();
    Effect::Render(TrayState::build(&profiles, &active))
}

#[test]
fn first_render_creates_and_later_renders_update() {
    init_test_logging();

    let mut view = TrayView::new(RecordingBackend::default());

    assert_eq!(view.apply(vec![render(&[])]), LoopFlow::Continue);
    assert!(view.is_shown());
    assert_eq!(view.apply(vec![render(&["Office"])]), LoopFlow::Continue);

    assert_eq!(
        view.backend().calls,
        vec!["create Not connected", "update Connected to: Office"]
    );
}

#[test]
fn failing_to_create_the_tray_ends_the_loop() {
    init_test_logging();

    let mut view = TrayView::new(RecordingBackend {
        fail_create: true,
        ..Default::default()
    });

    assert_eq!(view.apply(vec![render(&[])]), LoopFlow::Fail);
    assert!(!view.is_shown());

    // Nothing is retried once the loop is told to stop.
    assert_eq!(view.apply(vec![render(&["Office"])]), LoopFlow::Fail);
    assert_eq!(view.backend().calls, vec!["create Not connected"]);
}

#[test]
fn a_failed_update_keeps_the_existing_tray() {
    init_test_logging();

    let mut view = TrayView::new(RecordingBackend {
        fail_update: true,
        ..Default::default()
    });
    view.apply(vec![render(&[])]);

    assert_eq!(view.apply(vec![render(&["Office"])]), LoopFlow::Continue);
    assert!(view.is_shown());
}

#[test]
fn renders_queued_behind_exit_do_not_bring_the_tray_back() {
    init_test_logging();

    let mut view = TrayView::new(RecordingBackend::default());
    view.apply(vec![render(&[])]);

    assert_eq!(
        view.apply(vec![Effect::Exit, render(&["Office"])]),
        LoopFlow::Exit
    );
    assert_eq!(view.apply(vec![render(&["Home"])]), LoopFlow::Exit);

    assert!(!view.is_shown());
    assert_eq!(view.backend().calls, vec!["create Not connected", "release"]);
}

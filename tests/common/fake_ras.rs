//! A deterministic **in‑process stand‑in** for the OS remote-access subsystem.
//!
//! *  **From the test’s perspective**
//!    * Configure the phonebook with `FakeRas::with_profiles`.
//!    * Flip connections with `bring_up` / `take_down`; both fire the change
//!      signal exactly like the OS notification would.
//!    * Inspect `dialed()` / `hung_up()` and the enumeration call counters.
//!    * Break the change signal once with `fail_next_wait`.
//!
//! *  **Why this exists**: it lets tests drive the real watcher thread,
//!    presenter and dispatcher without a Windows phonebook.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use vpn_tray::connections::{ActiveConnection, ChangeSignal, RasApi, RasError};

#[derive(Default)]
struct FakeState {
    profiles: Vec<String>,
    active: Vec<String>,
    fail_enumeration: Option<u32>,
    dial_connects: bool,
    count_calls: usize,
    read_calls: usize,
    dialed: Vec<String>,
    hung_up: Vec<String>,
}

#[derive(Default)]
pub struct FakeRas {
    state: Mutex<FakeState>,
    watchers: Mutex<Vec<mpsc::Sender<()>>>,
    fail_next_wait: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl FakeRas {
    pub fn with_profiles(profiles: &[&str]) -> Self {
        let fake = Self::default();
        fake.state.lock().unwrap().profiles = profiles.iter().map(|p| p.to_string()).collect();
        fake
    }

    /// Marks `names` connected without firing a notification.
    pub fn set_active(&self, names: &[&str]) {
        self.state.lock().unwrap().active = names.iter().map(|n| n.to_string()).collect();
    }

    /// Every enumeration call fails with `code` from now on.
    pub fn fail_enumeration(&self, code: u32) {
        self.state.lock().unwrap().fail_enumeration = Some(code);
    }

    /// Make `dial` behave like a successful OS dial: connect and notify.
    pub fn dial_connects(&self) {
        self.state.lock().unwrap().dial_connects = true;
    }

    /// Simulate the OS establishing a connection.
    pub fn bring_up(&self, name: &str) {
        self.state.lock().unwrap().active.push(name.to_string());
        self.notify();
    }

    /// Simulate the OS tearing a connection down.
    pub fn take_down(&self, name: &str) {
        self.state.lock().unwrap().active.retain(|n| n != name);
        self.notify();
    }

    /// The next wait on any change signal fails, as a broken OS event would.
    pub fn fail_next_wait(&self) {
        self.fail_next_wait.store(true, Ordering::SeqCst);
    }

    pub fn notify(&self) {
        self.watchers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(()).is_ok());
    }

    pub fn count_calls(&self) -> usize {
        self.state.lock().unwrap().count_calls
    }

    pub fn read_calls(&self) -> usize {
        self.state.lock().unwrap().read_calls
    }

    pub fn dialed(&self) -> Vec<String> {
        self.state.lock().unwrap().dialed.clone()
    }

    pub fn hung_up(&self) -> Vec<String> {
        self.state.lock().unwrap().hung_up.clone()
    }
}

impl RasApi for FakeRas {
    fn count_entries(&self) -> Result<usize, RasError> {
        let mut state = self.state.lock().unwrap();
        state.count_calls += 1;
        match state.fail_enumeration {
            Some(code) => Err(RasError::Api {
                call: "RasEnumEntriesW",
                code,
            }),
            None => Ok(state.profiles.len()),
        }
    }

    fn read_entries(&self, count: usize) -> Result<Vec<String>, RasError> {
        let mut state = self.state.lock().unwrap();
        state.read_calls += 1;
        Ok(state.profiles.iter().take(count).cloned().collect())
    }

    fn active_connections(&self) -> Result<Vec<ActiveConnection>, RasError> {
        let state = self.state.lock().unwrap();
        if let Some(code) = state.fail_enumeration {
            return Err(RasError::Api {
                call: "RasEnumConnectionsW",
                code,
            });
        }
        Ok(state.active.iter().map(ActiveConnection::new).collect())
    }

    fn dial(&self, entry: &str) -> Result<(), RasError> {
        let connects = {
            let mut state = self.state.lock().unwrap();
            state.dialed.push(entry.to_string());
            state.dial_connects
        };
        if connects {
            self.bring_up(entry);
        }
        Ok(())
    }

    fn hang_up(&self, entry: &str) -> Result<(), RasError> {
        {
            let mut state = self.state.lock().unwrap();
            state.hung_up.push(entry.to_string());
            if !state.active.iter().any(|n| n == entry) {
                return Err(RasError::NotConnected(entry.to_string()));
            }
        }
        self.take_down(entry);
        Ok(())
    }

    fn watch(&self) -> Result<Box<dyn ChangeSignal>, RasError> {
        let (tx, rx) = mpsc::channel();
        self.watchers.lock().unwrap().push(tx);
        Ok(Box::new(FakeSignal {
            rx,
            fail_next: self.fail_next_wait.clone(),
        }))
    }
}

struct FakeSignal {
    rx: mpsc::Receiver<()>,
    fail_next: Arc<AtomicBool>,
}

impl ChangeSignal for FakeSignal {
    fn wait(&mut self, timeout: Duration) -> Result<bool, RasError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(RasError::Io(io::Error::other("event handle closed")));
        }
        match self.rx.recv_timeout(timeout) {
            Ok(()) => Ok(true),
            Err(RecvTimeoutError::Timeout) => Ok(false),
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(timeout);
                Ok(false)
            }
        }
    }
}

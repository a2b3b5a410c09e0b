use crate::connections::{
    errors::RasError,
    ras::{copy_wide, from_wide, validate_entry_name, ActiveConnection, ChangeSignal, RasApi},
};
use log::{debug, info, warn};
use std::{io, mem, ptr, time::Duration};
use windows_sys::Win32::Foundation::{CloseHandle, HANDLE, INVALID_HANDLE_VALUE};
use windows_sys::Win32::NetworkManagement::Rras::{
    RasConnectionNotificationW, RasDialW, RasEnumConnectionsW, RasEnumEntriesW,
    RasGetEntryDialParamsW, RasHangUpW, HRASCONN, RASCONNW, RASDIALPARAMSW, RASENTRYNAMEW,
};
use windows_sys::Win32::System::Threading::{CreateEventW, WaitForSingleObject};

const ERROR_SUCCESS: u32 = 0;
const ERROR_BUFFER_TOO_SMALL: u32 = 603;

const RASCN_CONNECTION: u32 = 0x0000_0001;
const RASCN_DISCONNECTION: u32 = 0x0000_0002;

const WAIT_OBJECT_0: u32 = 0x0000_0000;
const WAIT_TIMEOUT: u32 = 0x0000_0102;

/// `RasApi` backed by rasapi32 and the default phonebook.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsRas;

impl WindowsRas {
    pub fn new() -> Self {
        Self
    }

    /// Raw `RASCONNW` records, sized with a probing call first.
    fn enum_connections(&self) -> Result<Vec<RASCONNW>, RasError> {
        let mut cb: u32 = 0;
        let mut count: u32 = 0;
        let code = unsafe { RasEnumConnectionsW(ptr::null_mut(), &mut cb, &mut count) };
        match code {
            ERROR_SUCCESS | ERROR_BUFFER_TOO_SMALL => {}
            code => return Err(RasError::api("RasEnumConnectionsW", code)),
        }
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut conns: Vec<RASCONNW> = (0..count)
            .map(|_| {
                // SAFETY: RASCONNW is plain old data; all-zero is a valid value.
                let mut conn: RASCONNW = unsafe { mem::zeroed() };
                conn.dwSize = mem::size_of::<RASCONNW>() as u32;
                conn
            })
            .collect();
        let mut cb = (mem::size_of::<RASCONNW>() * conns.len()) as u32;
        let code = unsafe { RasEnumConnectionsW(conns.as_mut_ptr(), &mut cb, &mut count) };
        if code != ERROR_SUCCESS {
            return Err(RasError::api("RasEnumConnectionsW", code));
        }
        conns.truncate(count as usize);
        Ok(conns)
    }
}

impl RasApi for WindowsRas {
    fn count_entries(&self) -> Result<usize, RasError> {
        let mut cb: u32 = 0;
        let mut entries: u32 = 0;
        let code = unsafe {
            RasEnumEntriesW(
                ptr::null(),
                ptr::null(),
                ptr::null_mut(),
                &mut cb,
                &mut entries,
            )
        };
        match code {
            ERROR_SUCCESS | ERROR_BUFFER_TOO_SMALL => Ok(entries as usize),
            code => Err(RasError::api("RasEnumEntriesW", code)),
        }
    }

    fn read_entries(&self, count: usize) -> Result<Vec<String>, RasError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut names: Vec<RASENTRYNAMEW> = (0..count)
            .map(|_| {
                // SAFETY: RASENTRYNAMEW is plain old data.
                let mut entry: RASENTRYNAMEW = unsafe { mem::zeroed() };
                entry.dwSize = mem::size_of::<RASENTRYNAMEW>() as u32;
                entry
            })
            .collect();
        let mut cb = (mem::size_of::<RASENTRYNAMEW>() * count) as u32;
        let mut entries: u32 = 0;
        let code = unsafe {
            RasEnumEntriesW(
                ptr::null(),
                ptr::null(),
                names.as_mut_ptr(),
                &mut cb,
                &mut entries,
            )
        };
        if code != ERROR_SUCCESS {
            return Err(RasError::api("RasEnumEntriesW", code));
        }
        Ok(names
            .iter()
            .take(entries as usize)
            .map(|entry| from_wide(&entry.szEntryName))
            .collect())
    }

    fn active_connections(&self) -> Result<Vec<ActiveConnection>, RasError> {
        Ok(self
            .enum_connections()?
            .iter()
            .map(|conn| ActiveConnection::new(from_wide(&conn.szEntryName)))
            .collect())
    }

    fn dial(&self, entry: &str) -> Result<(), RasError> {
        validate_entry_name(entry)?;
        let mut params = dial_params(entry)?;
        let mut has_password: i32 = 0;
        let code = unsafe { RasGetEntryDialParamsW(ptr::null(), &mut params, &mut has_password) };
        if code != ERROR_SUCCESS {
            warn!(
                "No stored dial parameters for '{}' (RAS error {}), dialing with defaults",
                entry, code
            );
            params = dial_params(entry)?;
        }

        info!("Dialing '{}'", entry);
        let mut handle = 0 as HRASCONN;
        let code = unsafe {
            RasDialW(
                ptr::null(),
                ptr::null(),
                &params,
                0,
                ptr::null(),
                &mut handle,
            )
        };
        if code != ERROR_SUCCESS {
            // RasDial may hand back a handle even on failure; it must still be released.
            if handle as usize != 0 {
                unsafe { RasHangUpW(handle) };
            }
            return Err(RasError::api("RasDialW", code));
        }
        debug!("RasDialW returned for '{}'", entry);
        Ok(())
    }

    fn hang_up(&self, entry: &str) -> Result<(), RasError> {
        let conn = self
            .enum_connections()?
            .into_iter()
            .find(|conn| from_wide(&conn.szEntryName) == entry)
            .ok_or_else(|| RasError::NotConnected(entry.to_string()))?;

        info!("Hanging up '{}'", entry);
        let code = unsafe { RasHangUpW(conn.hrasconn) };
        if code != ERROR_SUCCESS {
            return Err(RasError::api("RasHangUpW", code));
        }
        Ok(())
    }

    fn watch(&self) -> Result<Box<dyn ChangeSignal>, RasError> {
        // Auto-reset, initially unsignalled.
        let event = unsafe { CreateEventW(ptr::null(), 0, 0, ptr::null()) };
        if event.is_null() {
            return Err(RasError::Io(io::Error::last_os_error()));
        }

        let code = unsafe {
            RasConnectionNotificationW(
                INVALID_HANDLE_VALUE as HRASCONN,
                event,
                RASCN_CONNECTION | RASCN_DISCONNECTION,
            )
        };
        if code != ERROR_SUCCESS {
            unsafe { CloseHandle(event) };
            return Err(RasError::api("RasConnectionNotificationW", code));
        }
        debug!("Registered for RAS connection notifications");
        Ok(Box::new(EventSignal { event }))
    }
}

/// Win32 event signalled by RAS on every connect/disconnect.
struct EventSignal {
    event: HANDLE,
}

// SAFETY: the event handle is only waited on and closed; both are thread-safe.
unsafe impl Send for EventSignal {}

impl ChangeSignal for EventSignal {
    fn wait(&mut self, timeout: Duration) -> Result<bool, RasError> {
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        match unsafe { WaitForSingleObject(self.event, millis) } {
            WAIT_OBJECT_0 => Ok(true),
            WAIT_TIMEOUT => Ok(false),
            _ => Err(RasError::Io(io::Error::last_os_error())),
        }
    }
}

impl Drop for EventSignal {
    fn drop(&mut self) {
        unsafe { CloseHandle(self.event) };
        debug!("Closed RAS notification event");
    }
}

fn dial_params(entry: &str) -> Result<RASDIALPARAMSW, RasError> {
    // SAFETY: RASDIALPARAMSW is plain old data.
    let mut params: RASDIALPARAMSW = unsafe { mem::zeroed() };
    params.dwSize = mem::size_of::<RASDIALPARAMSW>() as u32;
    copy_wide(&mut params.szEntryName, entry)?;
    Ok(params)
}

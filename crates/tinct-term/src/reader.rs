// SPDX-License-Identifier: MIT
//
// Background stdin reader.
//
// Raw mode is configured with VMIN=1, so a blocking read would pin the
// event loop whenever the user stops typing. Instead, a dedicated thread
// polls stdin with a short timeout and forwards raw byte chunks over a
// channel. The poll timeout is what lets the thread notice the stop flag
// and exit cleanly.
#![allow(unsafe_code)]

use std::io::{self, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

/// Bytes read per syscall. One keystroke is tiny, but a paste or a burst
/// of mouse reports can arrive as one large chunk.
const READ_BUF_SIZE: usize = 4096;

/// How long each `poll` waits before rechecking the stop flag.
const POLL_TIMEOUT_MS: i32 = 50;

/// Handle to the reader thread.
pub struct InputReader {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputReader {
    /// Spawn the reader thread. Returns the handle and the receiving end
    /// of the byte channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS cannot spawn the thread.
    pub fn spawn() -> io::Result<(Self, Receiver<Vec<u8>>)> {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = std::thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || read_loop(&tx, &thread_stop))?;

        Ok((
            Self {
                stop,
                handle: Some(handle),
            },
            rx,
        ))
    }

    /// Signal the thread to stop and wait for it to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop();
    }
}

// ─── Read Loop ──────────────────────────────────────────────────────────────

/// Poll stdin until data is ready or the stop flag is set.
#[cfg(unix)]
fn read_loop(tx: &Sender<Vec<u8>>, stop: &AtomicBool) {
    let mut buf = [0u8; READ_BUF_SIZE];

    while !stop.load(Ordering::SeqCst) {
        let mut pollfd = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };

        let ready = unsafe { libc::poll(&raw mut pollfd, 1, POLL_TIMEOUT_MS) };

        if ready < 0 {
            // EINTR is routine (SIGWINCH lands here); anything else means
            // stdin is gone.
            if io::Error::last_os_error().kind() == io::ErrorKind::Interrupted {
                continue;
            }
            break;
        }
        if ready == 0 || pollfd.revents & libc::POLLIN == 0 {
            continue;
        }

        match io::stdin().read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(_) => break,
        }
    }
}

/// Fallback for platforms without `poll`: blocking reads. The stop flag
/// is only observed between reads.
#[cfg(not(unix))]
fn read_loop(tx: &Sender<Vec<u8>>, stop: &AtomicBool) {
    let mut buf = [0u8; READ_BUF_SIZE];

    while !stop.load(Ordering::SeqCst) {
        match io::stdin().read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

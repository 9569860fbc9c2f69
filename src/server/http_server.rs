use may::coroutine::JoinHandle;
use may_minihttp::HttpService;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::{Duration, Instant};

/// How long [`ServerHandle::wait_ready`] keeps probing before giving up.
const READY_TIMEOUT: Duration = Duration::from_millis(500);
const READY_PROBE_INTERVAL: Duration = Duration::from_millis(10);

/// Wrapper around may_minihttp's HTTP server.
pub struct HttpServer<T>(pub T);

impl<T: HttpService + Clone + Send + Sync + 'static> HttpServer<T> {
    /// Start the server on the given address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or the port cannot be
    /// bound.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
        let handle = may_minihttp::HttpServer(self.0).start(addr)?;
        Ok(ServerHandle { addr, handle })
    }
}

/// Handle to a running HTTP server.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    /// Block until the bound address accepts TCP connections.
    ///
    /// Callers (tests mostly) use this to avoid sending requests into the
    /// window between `start` returning and the listener being up.
    ///
    /// # Errors
    ///
    /// `TimedOut` if no connection succeeds within [`READY_TIMEOUT`].
    pub fn wait_ready(&self) -> io::Result<()> {
        let deadline = Instant::now() + READY_TIMEOUT;
        loop {
            if TcpStream::connect_timeout(&self.addr, READY_PROBE_INTERVAL).is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("server on {} not ready within {READY_TIMEOUT:?}", self.addr),
                ));
            }
            thread::sleep(READY_PROBE_INTERVAL);
        }
    }

    /// Stop the server and wait for its coroutine to finish.
    pub fn stop(self) {
        // SAFETY: cancel() is marked unsafe by the may runtime. We own the
        // handle and join immediately after, observing the coroutine's exit.
        #[allow(unsafe_code)]
        unsafe {
            self.handle.coroutine().cancel();
        }
        drop(self.handle.join());
    }

    /// Block until the server coroutine finishes.
    ///
    /// # Errors
    ///
    /// Returns an error if the server coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}

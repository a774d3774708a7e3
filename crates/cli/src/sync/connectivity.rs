// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitoring.
//!
//! The [`ConnectivityMonitor`] keeps the last known reachability and fans out
//! transitions to subscribers. Raw readings come from a platform
//! [`ConnectivitySignal`]; repeated readings of the same state are absorbed
//! so subscribers see each transition at most once.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Reachability snapshot. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectivityState {
    pub connected: bool,
}

/// A change in reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// offline → online
    Online,
    /// online → offline
    Offline,
}

impl Transition {
    fn to(connected: bool) -> Self {
        if connected {
            Transition::Online
        } else {
            Transition::Offline
        }
    }
}

/// Platform source of reachability readings.
pub trait ConnectivitySignal: Send + Sync {
    /// Take one reading. `true` means the remote is reachable.
    fn probe(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;
}

/// Reachability by opening a TCP connection to the remote's address.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        TcpProbe {
            addr: addr.into(),
            timeout,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl ConnectivitySignal for TcpProbe {
    fn probe(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(async move {
            match tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await {
                Ok(Ok(_)) => true,
                Ok(Err(e)) => {
                    debug!(addr = %self.addr, error = %e, "probe failed");
                    false
                }
                Err(_) => {
                    debug!(addr = %self.addr, "probe timed out");
                    false
                }
            }
        })
    }
}

struct Registry {
    state: ConnectivityState,
    next_id: u64,
    observers: HashMap<u64, mpsc::UnboundedSender<Transition>>,
}

struct MonitorInner {
    registry: Mutex<Registry>,
}

impl MonitorInner {
    fn registry(&self) -> MutexGuard<'_, Registry> {
        // A panicking observer send cannot leave the registry half-updated
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Tracks reachability and notifies subscribers of transitions.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    inner: Arc<MonitorInner>,
}

impl ConnectivityMonitor {
    /// Create a monitor starting in `initial` state.
    pub fn new(initial: ConnectivityState) -> Self {
        ConnectivityMonitor {
            inner: Arc::new(MonitorInner {
                registry: Mutex::new(Registry {
                    state: initial,
                    next_id: 0,
                    observers: HashMap::new(),
                }),
            }),
        }
    }

    /// Create a monitor that assumes it is offline until told otherwise.
    pub fn offline() -> Self {
        Self::new(ConnectivityState { connected: false })
    }

    /// Current snapshot.
    pub fn current(&self) -> ConnectivityState {
        self.inner.registry().state
    }

    /// Check if currently connected.
    pub fn is_connected(&self) -> bool {
        self.current().connected
    }

    /// Feed a raw reading.
    ///
    /// Returns the transition when the reading changed the state, after
    /// delivering it to every live subscriber. Repeated readings return `None`
    /// and notify nobody.
    pub fn report(&self, connected: bool) -> Option<Transition> {
        let mut registry = self.inner.registry();
        if registry.state.connected == connected {
            return None;
        }
        registry.state = ConnectivityState { connected };

        let transition = Transition::to(connected);
        registry
            .observers
            .retain(|_, tx| tx.send(transition).is_ok());
        info!(?transition, observers = registry.observers.len(), "connectivity changed");
        Some(transition)
    }

    /// Take a reading from `signal` and return the resulting state.
    pub async fn refresh(&self, signal: &dyn ConnectivitySignal) -> ConnectivityState {
        let connected = signal.probe().await;
        self.report(connected);
        self.current()
    }

    /// Register a new subscriber. It receives transitions that happen after
    /// this call.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut registry = self.inner.registry();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.observers.insert(id, tx);

        Subscription {
            id,
            monitor: Arc::downgrade(&self.inner),
            rx,
            active: true,
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.registry().observers.len()
    }

    /// Probe `signal` every `interval` until `cancel` fires.
    pub fn spawn_poller(
        &self,
        signal: Arc<dyn ConnectivitySignal>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let monitor = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    connected = signal.probe() => {
                        monitor.report(connected);
                    }
                }
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
            debug!("connectivity poller stopped");
        })
    }
}

/// A registered observer of connectivity transitions.
///
/// Dropping the subscription unsubscribes it.
pub struct Subscription {
    id: u64,
    monitor: Weak<MonitorInner>,
    rx: mpsc::UnboundedReceiver<Transition>,
    active: bool,
}

impl Subscription {
    /// Wait for the next transition. Returns `None` once unsubscribed or when
    /// the monitor is gone.
    pub async fn next(&mut self) -> Option<Transition> {
        if !self.active {
            return None;
        }
        self.rx.recv().await
    }

    /// Return an already delivered transition without waiting.
    pub fn try_next(&mut self) -> Option<Transition> {
        if !self.active {
            return None;
        }
        self.rx.try_recv().ok()
    }

    /// Stop receiving transitions. Safe to call more than once.
    pub fn unsubscribe(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(inner) = self.monitor.upgrade() {
            inner.registry().observers.remove(&self.id);
        }
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

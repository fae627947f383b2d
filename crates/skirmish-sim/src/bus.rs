//! Combat event bus: typed publish/subscribe for `CombatEvent`s.
//!
//! Listeners are called synchronously in registration order. A listener that
//! returns `Err` or panics is logged and skipped; the remaining listeners
//! still see the event and the emitter never observes the failure.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use skirmish_core::error::CombatError;
use skirmish_core::events::{CombatEvent, CombatEventKind};

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Which events a listener receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindFilter {
    All,
    Only(HashSet<CombatEventKind>),
}

impl KindFilter {
    pub fn only(kinds: impl IntoIterator<Item = CombatEventKind>) -> Self {
        Self::Only(kinds.into_iter().collect())
    }

    pub fn matches(&self, kind: CombatEventKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(kinds) => kinds.contains(&kind),
        }
    }
}

/// Result type listeners return. The message is logged on failure.
pub type ListenerResult = Result<(), String>;

/// Something that wants to hear about combat events.
pub trait CombatListener {
    fn on_event(&mut self, event: &CombatEvent) -> ListenerResult;
}

impl<F> CombatListener for F
where
    F: FnMut(&CombatEvent) -> ListenerResult,
{
    fn on_event(&mut self, event: &CombatEvent) -> ListenerResult {
        self(event)
    }
}

/// Outcome of one `emit`.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    /// Listeners that handled the event successfully.
    pub delivered: usize,
    /// One `ListenerFailure` per listener that failed.
    pub failures: Vec<CombatError>,
}

impl DeliveryReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

struct Registration {
    id: ListenerId,
    name: String,
    filter: KindFilter,
    listener: Box<dyn CombatListener>,
}

/// Ordered listener registry.
#[derive(Default)]
pub struct CombatEventBus {
    registrations: Vec<Registration>,
    next_id: u64,
}

impl CombatEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. `name` identifies it in failure logs.
    pub fn subscribe(
        &mut self,
        name: impl Into<String>,
        filter: KindFilter,
        listener: impl CombatListener + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            id,
            name: name.into(),
            filter,
            listener: Box::new(listener),
        });
        id
    }

    /// Remove a listener. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.registrations.len()
    }

    /// Deliver one event to every matching listener.
    pub fn emit(&mut self, event: &CombatEvent) -> DeliveryReport {
        let kind = event.kind();
        let mut report = DeliveryReport::default();

        for registration in &mut self.registrations {
            if !registration.filter.matches(kind) {
                continue;
            }
            let listener = &mut registration.listener;
            let result = panic::catch_unwind(AssertUnwindSafe(|| listener.on_event(event)));
            let reason = match result {
                Ok(Ok(())) => {
                    report.delivered += 1;
                    continue;
                }
                Ok(Err(reason)) => reason,
                Err(payload) => panic_message(payload.as_ref()),
            };
            log::warn!(
                "listener '{}' failed on {:?}: {}",
                registration.name,
                kind,
                reason
            );
            report.failures.push(CombatError::ListenerFailure {
                listener: registration.name.clone(),
                reason,
            });
        }
        report
    }

    /// Deliver events in order, merging the reports.
    pub fn emit_all<'a>(&mut self, events: impl IntoIterator<Item = &'a CombatEvent>) -> DeliveryReport {
        let mut total = DeliveryReport::default();
        for event in events {
            let report = self.emit(event);
            total.delivered += report.delivered;
            total.failures.extend(report.failures);
        }
        total
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

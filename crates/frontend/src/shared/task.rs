//! Cancellable background work on the single UI thread.
//!
//! Each [`TaskSlot`] runs at most one live task: starting a new one bumps a
//! generation counter and aborts the previous request, so results of
//! superseded work are dropped instead of overwriting newer state.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{AbortController, AbortSignal};

#[derive(Clone, Copy)]
pub struct TaskSlot {
    name: &'static str,
    generation: StoredValue<u64>,
    abort: StoredValue<Option<AbortController>, LocalStorage>,
}

/// Handle of one started task
#[derive(Clone, Debug)]
pub struct TaskTicket {
    generation: u64,
    signal: Option<AbortSignal>,
}

impl TaskTicket {
    /// Pass to `gloo_net` requests so superseding the task aborts them.
    pub fn signal(&self) -> Option<&AbortSignal> {
        self.signal.as_ref()
    }
}

impl TaskSlot {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            generation: StoredValue::new(0),
            abort: StoredValue::new_local(None),
        }
    }

    /// Cancels whatever is running and hands out a ticket for new work.
    pub fn start(&self) -> TaskTicket {
        self.cancel();
        let generation = self.generation.try_get_value().unwrap_or(0);
        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());
        self.abort.try_set_value(controller);
        TaskTicket { generation, signal }
    }

    /// Invalidates the running task, if any.
    pub fn cancel(&self) {
        self.abort.try_update_value(|controller| {
            if let Some(controller) = controller.take() {
                log::debug!("{}: aborting previous request", self.name);
                controller.abort();
            }
        });
        self.generation.try_update_value(|g| *g += 1);
    }

    /// Still the latest task of this slot (and the owner is alive)
    pub fn is_current(&self, ticket: &TaskTicket) -> bool {
        self.generation.try_get_value() == Some(ticket.generation)
    }

    /// Runs `task` after `delay_ms` unless another call supersedes it first.
    pub fn debounce<F>(&self, delay_ms: u32, task: F)
    where
        F: FnOnce() + 'static,
    {
        let slot = *self;
        let ticket = self.start();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            if slot.is_current(&ticket) {
                task();
            } else {
                log::debug!("{}: debounced run superseded", slot.name);
            }
        });
    }
}

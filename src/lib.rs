//! Repository-hook forwarder: turns accepted pushes into JSON events and
//! delivers them to a configured HTTP endpoint.
//!
//! The host embeds a [`Forwarder`] and calls [`Forwarder::on_push`] from
//! its post-receive hook dispatch. The forwarder is responsible for:
//!   * gating all work on the persisted `active` flag
//!   * collecting and normalizing per-commit file changes
//!   * assembling the push payload in host changeset order
//!   * delivering the event with bearer authentication, best effort.
//!
//! Failures never propagate back into the host's hook dispatch; they are
//! logged here and swallowed so a flaky endpoint cannot break a push.

pub mod assembler;
pub mod collector;
pub mod config;
pub mod delivery;
pub mod dto;
pub mod errors;
pub mod hook;

use tracing::{error, info, warn};

use crate::assembler::assemble;
use crate::config::ConfigurationStore;
use crate::delivery::EventDeliveryClient;
use crate::errors::ForwardResult;
use crate::hook::{ChangeProvider, PushHookEvent, Subject};

/// Top-level hook handler wiring the configuration gate, the event
/// assembler and the delivery client together.
///
/// Holds no per-invocation state, so one instance may serve concurrent
/// hook invocations for different pushes.
pub struct Forwarder<C> {
    store: C,
    delivery: EventDeliveryClient<C>,
}

impl<C: ConfigurationStore + Clone> Forwarder<C> {
    /// Builds a forwarder from the injected configuration accessor and a
    /// shared HTTP client.
    pub fn new(store: C, http: reqwest::Client) -> Self {
        let delivery = EventDeliveryClient::new(http, store.clone());
        Self { store, delivery }
    }

    /// Handles one accepted push.
    ///
    /// All outcomes are terminal to this invocation: failures are logged
    /// once and swallowed, so the host's push operation always succeeds
    /// regardless of forwarder outcome.
    pub async fn on_push<P: ChangeProvider>(&self, hook: PushHookEvent<'_, P>, subject: &Subject) {
        if let Err(err) = self.process(hook, subject).await {
            error!(%err, "push event processing failed, the endpoint may be unreachable, check the forwarder configuration");
        }
    }

    async fn process<P: ChangeProvider>(
        &self,
        hook: PushHookEvent<'_, P>,
        subject: &Subject,
    ) -> ForwardResult<()> {
        // Active flag re-read per invocation; inactive means nothing is
        // built at all, not just a suppressed send.
        if !self.store.get().active {
            warn!("push event not propagated, forwarding is turned off in the configuration");
            return Ok(());
        }

        let Some(repository) = hook.repository else {
            warn!("received hook without repository");
            return Ok(());
        };

        if hook.changesets.is_empty() {
            warn!("received hook without changesets");
            return Ok(());
        }

        let event = assemble(repository, hook.changesets, hook.change_provider, subject)?;
        self.delivery.send(&event).await?;

        info!(
            repository = %repository.name,
            commits = event.data.commits.len(),
            event = %event.id,
            "push event delivered"
        );
        Ok(())
    }
}

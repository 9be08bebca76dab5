//! Flow runtime - drives the controller on a single task.
//!
//! Every input (user action, identity event, fired timer) is queued and
//! applied one at a time, so the controller never sees two inputs
//! interleaved. Screen timers are spawned tasks; the one belonging to the
//! previous screen entry is aborted on every transition, and the controller
//! still rejects any ticket that slips through.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::domain::flow::events::ResultsSaved;
use crate::domain::flow::{
    Action, FlowController, FlowSnapshot, IdentityEvent, Outcome, SavedResults, Screen, TimerKind,
    TimerSettings, TimerTicket,
};
use crate::domain::foundation::{
    DomainError, ErrorCode, EventEnvelope, EventId, SerializableDomainEvent, Timestamp,
};
use crate::domain::triage::Classification;
use crate::domain::vitals::VitalsReading;
use crate::ports::{EventPublisher, ResultsStore, VitalsSource};

const COMMAND_BUFFER: usize = 64;

enum Command {
    Act {
        action: Action,
        reply: oneshot::Sender<Outcome>,
    },
    Confirm {
        expected: Screen,
        action: Action,
        reply: oneshot::Sender<Outcome>,
    },
    Identity {
        event: IdentityEvent,
        reply: oneshot::Sender<Outcome>,
    },
    Snapshot {
        reply: oneshot::Sender<FlowSnapshot>,
    },
    Classify {
        reply: oneshot::Sender<Result<Classification, DomainError>>,
    },
}

enum Fired {
    Elapsed(TimerTicket),
    Measured {
        ticket: TimerTicket,
        result: Result<VitalsReading, DomainError>,
    },
}

/// Ports the runtime talks to.
#[derive(Clone)]
pub struct RuntimePorts {
    pub events: Arc<dyn EventPublisher>,
    pub results: Arc<dyn ResultsStore>,
    pub vitals: Arc<dyn VitalsSource>,
}

/// Cloneable handle for submitting inputs to a running flow.
#[derive(Clone)]
pub struct FlowHandle {
    commands: mpsc::Sender<Command>,
}

impl FlowHandle {
    /// Applies a user action and returns what happened.
    ///
    /// Form edges such as `continue` on the sign-up screen are refused here;
    /// they are only reachable through `dispatch_from`.
    pub async fn dispatch(&self, action: Action) -> Result<Outcome, DomainError> {
        self.request(|reply| Command::Act { action, reply }).await
    }

    /// Applies `action` in one step, provided `expected` is still the
    /// current screen when the runtime gets to it.
    ///
    /// Handlers call this after a confirmed submission, so a user who
    /// navigated away during the provider round-trip is left where they are.
    pub async fn dispatch_from(
        &self,
        expected: Screen,
        action: Action,
    ) -> Result<Outcome, DomainError> {
        self.request(|reply| Command::Confirm {
            expected,
            action,
            reply,
        })
        .await
    }

    /// Delivers an identity provider notification.
    pub async fn identity(&self, event: IdentityEvent) -> Result<Outcome, DomainError> {
        self.request(|reply| Command::Identity { event, reply }).await
    }

    pub async fn snapshot(&self) -> Result<FlowSnapshot, DomainError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Classifies the current session.
    ///
    /// # Errors
    ///
    /// - `ReadingMissing` if no reading has been recorded
    /// - `RuntimeStopped` if the runtime has shut down
    pub async fn classify(&self) -> Result<Classification, DomainError> {
        self.request(|reply| Command::Classify { reply }).await?
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, DomainError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| stopped())?;
        response.await.map_err(|_| stopped())
    }
}

fn stopped() -> DomainError {
    DomainError::new(ErrorCode::RuntimeStopped, "Flow runtime is not running")
}

/// Owns the controller and its timers.
pub struct FlowRuntime {
    controller: FlowController,
    settings: TimerSettings,
    ports: RuntimePorts,
    commands: mpsc::Receiver<Command>,
    fired_tx: mpsc::UnboundedSender<Fired>,
    fired_rx: mpsc::UnboundedReceiver<Fired>,
    timer: Option<AbortHandle>,
}

impl FlowRuntime {
    /// Starts a fresh journey on its own task.
    ///
    /// The task runs until every `FlowHandle` has been dropped.
    pub fn spawn(settings: TimerSettings, ports: RuntimePorts) -> (FlowHandle, JoinHandle<()>) {
        Self::spawn_with(FlowController::new(), settings, ports)
    }

    /// Starts the runtime around an existing controller.
    pub fn spawn_with(
        controller: FlowController,
        settings: TimerSettings,
        ports: RuntimePorts,
    ) -> (FlowHandle, JoinHandle<()>) {
        let (commands_tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();

        let runtime = Self {
            controller,
            settings,
            ports,
            commands,
            fired_tx,
            fired_rx,
            timer: None,
        };
        let task = tokio::spawn(runtime.run());

        (
            FlowHandle {
                commands: commands_tx,
            },
            task,
        )
    }

    async fn run(mut self) {
        info!(
            session_id = %self.controller.session_id(),
            screen = %self.controller.screen(),
            "Flow runtime started"
        );
        self.arm_timer();

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
                Some(fired) = self.fired_rx.recv() => self.on_timer(fired).await,
            }
        }

        self.cancel_timer();
        info!(screen = %self.controller.screen(), "Flow runtime stopped");
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Act { action, reply } => {
                let outcome = self.controller.act(action);
                self.apply(&outcome).await;
                let _ = reply.send(outcome);
            }
            Command::Confirm {
                expected,
                action,
                reply,
            } => {
                let outcome = self.controller.advance_from(expected, action);
                self.apply(&outcome).await;
                let _ = reply.send(outcome);
            }
            Command::Identity { event, reply } => {
                debug!(event = event.name(), screen = %self.controller.screen(), "Identity event received");
                let outcome = self.controller.receive_identity_event(event);
                self.apply(&outcome).await;
                let _ = reply.send(outcome);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.controller.snapshot());
            }
            Command::Classify { reply } => {
                let _ = reply.send(self.controller.classify());
            }
        }
    }

    async fn on_timer(&mut self, fired: Fired) {
        let outcome = match fired {
            Fired::Elapsed(ticket) => {
                let Some(action) = ticket.kind.action() else {
                    return;
                };
                debug!(timer = ticket.kind.name(), entry = %ticket.entry, "Timer fired");
                self.controller.fire_timer(&ticket, action)
            }
            Fired::Measured {
                ticket,
                result: Ok(reading),
            } => {
                debug!(entry = %ticket.entry, reading = %reading, "Measurement taken");
                self.controller
                    .fire_timer(&ticket, Action::MeasurementComplete(reading))
            }
            Fired::Measured {
                ticket,
                result: Err(e),
            } => {
                if self.controller.is_current(&ticket) {
                    warn!(error = %e, "Measurement failed, retrying");
                    self.arm_timer();
                }
                return;
            }
        };
        self.apply(&outcome).await;
    }

    async fn apply(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Ignored => {}
            Outcome::Moved(transition) => {
                self.arm_timer();
                self.publish(transition.events()).await;
            }
            Outcome::SaveRequested(results) => self.save_detached(results.clone()),
        }
    }

    async fn publish(&self, events: Vec<EventEnvelope>) {
        if let Err(e) = self.ports.events.publish_all(events).await {
            warn!(error = %e, "Failed to publish flow events");
        }
    }

    fn save_detached(&self, results: SavedResults) {
        let store = Arc::clone(&self.ports.results);
        let events = Arc::clone(&self.ports.events);

        tokio::spawn(async move {
            match store.save(&results).await {
                Ok(()) => {
                    info!(session_id = %results.session_id, "Results saved");
                    let event = ResultsSaved {
                        event_id: EventId::new(),
                        session_id: results.session_id,
                        tier: results.classification.tier(),
                        saved_at: Timestamp::now(),
                    };
                    if let Err(e) = events.publish(event.to_envelope()).await {
                        warn!(error = %e, "Failed to publish results saved event");
                    }
                }
                Err(e) => {
                    warn!(session_id = %results.session_id, error = %e, "Failed to save results");
                }
            }
        });
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Replaces any running timer with the one for the current entry.
    fn arm_timer(&mut self) {
        self.cancel_timer();

        let Some(ticket) = self.controller.armed_timer(&self.settings) else {
            return;
        };
        debug!(
            timer = ticket.kind.name(),
            screen = %ticket.screen,
            entry = %ticket.entry,
            delay_ms = ticket.delay.as_millis() as u64,
            "Timer armed"
        );

        let fired_tx = self.fired_tx.clone();
        let vitals = Arc::clone(&self.ports.vitals);
        let device = self.controller.session().device().map(|d| d.id.clone());

        let task = tokio::spawn(async move {
            tokio::time::sleep(ticket.delay).await;
            let fired = match ticket.kind {
                TimerKind::Measurement => Fired::Measured {
                    ticket,
                    result: vitals.read(device.as_ref()).await,
                },
                _ => Fired::Elapsed(ticket),
            };
            let _ = fired_tx.send(fired);
        });
        self.timer = Some(task.abort_handle());
    }
}

use log::{debug, info};
use uuid::Uuid;

use crate::alert::Alert;
use crate::biomonitor::{self, PersonStatus};
use crate::error::{Error, Result};
use crate::event::CameraEvent;
use crate::generator::{GeneratorContext, TurnGenerator, TurnReport};
use crate::history::{TurnHistory, TurnSnapshot};
use crate::message::Inbox;

/// One supervisor session: the event log, the inbox, pending alerts, the
/// generator's conversational context, and the undo stack over all of it.
///
/// Single-writer: only [`advance`](Self::advance) and
/// [`undo`](Self::undo) mutate the logs; everything else reads. The model
/// is cooperative single-threaded, so reads between writes need no
/// locking.
pub struct Session {
    events: Vec<CameraEvent>,
    inbox: Inbox,
    alerts: Vec<Alert>,
    context: GeneratorContext,
    history: TurnHistory,
    advancing: bool,
}

impl Session {
    pub fn new(context: GeneratorContext) -> Self {
        Self {
            events: Vec::new(),
            inbox: Inbox::new(),
            alerts: Vec::new(),
            context,
            history: TurnHistory::new(),
            advancing: false,
        }
    }

    /// Runs one simulation turn: snapshot first, then generate and merge.
    ///
    /// The snapshot is pushed BEFORE the generation call. If the call
    /// fails the snapshot stays on the stack (undoing it restores an
    /// identical state, which is harmless) and the busy flag is cleared
    /// so the operator can try again. Only one advance may be in flight;
    /// a second call while busy is rejected, never queued.
    ///
    /// Returns the slice of events added by this turn.
    pub async fn advance<G: TurnGenerator>(
        &mut self,
        generator: &G,
        operator_command: Option<&str>,
    ) -> Result<&[CameraEvent]> {
        if self.advancing {
            return Err(Error::AdvanceInFlight);
        }
        self.advancing = true;
        self.history.push(self.snapshot());

        let outcome = generator.next_turn(&self.context, operator_command).await;
        self.advancing = false;
        let (report, context) = outcome?;

        let first_new = self.events.len();
        self.apply_report(report, context);
        Ok(&self.events[first_new..])
    }

    fn snapshot(&self) -> TurnSnapshot {
        TurnSnapshot {
            events: self.events.clone(),
            messages: self.inbox.messages().to_vec(),
            unread: self.inbox.unread(),
            context: self.context.clone(),
        }
    }

    fn apply_report(&mut self, report: TurnReport, context: GeneratorContext) {
        info!(
            "Turn applied: {} events, {} messages",
            report.events.len(),
            report.messages.len()
        );
        self.alerts.extend(Alert::from_events(&report.events));
        self.events.extend(report.events);
        self.inbox.push_batch(report.messages);
        self.context = context;
    }

    /// Reverts the most recent turn. All four snapshot slices are
    /// restored in one step; pending alerts (derived view state, not part
    /// of the snapshot) are cleared. Returns false when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                debug!("Reverting to snapshot of {} events", snapshot.events.len());
                self.events = snapshot.events;
                self.inbox = Inbox::restore(snapshot.messages, snapshot.unread);
                self.context = snapshot.context;
                self.alerts.clear();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn is_advancing(&self) -> bool {
        self.advancing
    }

    pub fn events(&self) -> &[CameraEvent] {
        &self.events
    }

    pub fn inbox(&self) -> &Inbox {
        &self.inbox
    }

    pub fn inbox_mut(&mut self) -> &mut Inbox {
        &mut self.inbox
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Drops one pending alert (the expiry/dismiss callback).
    pub fn dismiss_alert(&mut self, id: Uuid) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        self.alerts.len() != before
    }

    pub fn context(&self) -> &GeneratorContext {
        &self.context
    }

    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// Re-derives the biomonitor roster from the current event log. Cheap
    /// enough (linear scan) that it is recomputed on demand instead of
    /// maintained incrementally.
    pub fn biomonitor(&self) -> Vec<PersonStatus> {
        biomonitor::roster_report(&self.events)
    }
}

use uuid::Uuid;

use crate::event::{CameraEvent, Priority};

/// A pop-up alert raised for a MEDIUM or HIGH priority observation.
/// LOW priority events only land in the log.
#[derive(Debug, Clone)]
pub struct Alert {
    pub id: Uuid,
    pub event: CameraEvent,
}

impl Alert {
    pub fn from_events(events: &[CameraEvent]) -> Vec<Alert> {
        events
            .iter()
            .filter(|event| matches!(event.priority, Priority::Medium | Priority::High))
            .map(|event| Alert {
                id: Uuid::new_v4(),
                event: event.clone(),
            })
            .collect()
    }
}

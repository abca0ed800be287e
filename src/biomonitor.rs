use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::event::{CameraEvent, Priority};
use crate::roster::{self, PersonnelKind};

/// Transient conditions only look this far back; a stale crisis must not
/// mask newer information forever. Death is exempt (scanned over the
/// whole history).
pub const RECENT_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Condition {
    #[strum(serialize = "FALLECIDO")]
    Fallecido,
    #[strum(serialize = "EN PELIGRO")]
    EnPeligro,
    #[strum(serialize = "DESAPARECIDO")]
    Desaparecido,
    #[strum(serialize = "HERIDO")]
    Herido,
    #[strum(serialize = "CONDICIÓN ANÓMALA")]
    CondicionAnomala,
    #[strum(serialize = "NOMINAL")]
    Nominal,
    #[strum(serialize = "SIN REPORTES")]
    SinReportes,
}

impl Condition {
    pub fn severity(self) -> u8 {
        match self {
            Condition::Fallecido => 6,
            Condition::EnPeligro => 5,
            Condition::Desaparecido => 4,
            Condition::Herido => 3,
            Condition::CondicionAnomala => 2,
            Condition::Nominal => 1,
            Condition::SinReportes => 0,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Condition::Fallecido
    }
}

const DEATH_KEYWORDS: &[&str] = &["fallecido", "cese de signos vitales", "k.i.a"];
const INJURY_KEYWORDS: &[&str] = &["herido", "incapacitado", "no responde"];
const DANGER_KEYWORDS: &[&str] = &["gritos", "disparos", "ataque", "hostil", "brecha"];
const MISSING_KEYWORDS: &[&str] = &["desaparecido", "sin señal", "no localizado"];
const ANOMALOUS_KEYWORDS: &[&str] = &[
    "estrés elevado",
    "signos vitales erráticos",
    "comportamiento anómalo",
];

fn matches_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| message.contains(keyword))
}

/// Classifies one event in isolation. Fixed decision list, first match
/// wins; note the check order is not the severity order (injury keywords
/// outrank the HIGH-priority rule so "herido" reports read as HERIDO even
/// when escalated).
pub fn classify(event: &CameraEvent) -> Condition {
    let message = event.message.to_lowercase();

    if matches_any(&message, DEATH_KEYWORDS) {
        return Condition::Fallecido;
    }
    if matches_any(&message, INJURY_KEYWORDS) {
        return Condition::Herido;
    }
    if event.priority == Priority::High || matches_any(&message, DANGER_KEYWORDS) {
        return Condition::EnPeligro;
    }
    if matches_any(&message, MISSING_KEYWORDS) {
        return Condition::Desaparecido;
    }
    if event.priority == Priority::Medium || matches_any(&message, ANOMALOUS_KEYWORDS) {
        return Condition::CondicionAnomala;
    }
    Condition::Nominal
}

/// One roster row of the biomonitor: the derived current condition plus
/// the "last known" fields of the event that determined it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonStatus {
    pub name: String,
    pub condition: Condition,
    pub last_location: String,
    pub last_timestamp: String,
    pub last_message: String,
    pub is_notable: bool,
    pub kind: PersonnelKind,
}

fn status_from_event(name: &str, condition: Condition, event: &CameraEvent) -> PersonStatus {
    PersonStatus {
        name: name.to_string(),
        condition,
        last_location: event.camera.clone(),
        last_timestamp: event.timestamp.clone(),
        last_message: event.message.clone(),
        is_notable: roster::is_notable(name),
        kind: PersonnelKind::of(name),
    }
}

/// Derives a person's current condition from their full event history.
///
/// `history` must be every event tagging this person, in arrival order.
/// Total and pure: every input produces a definite status, an empty
/// history yields the SIN REPORTES sentinel.
///
/// Death is sticky: the first FALLECIDO event anywhere in the history
/// pins the status permanently, whatever the generator reports later.
/// Otherwise the highest severity within the last [`RECENT_WINDOW`]
/// events wins, ties broken toward the more recent event.
pub fn infer_status(name: &str, history: &[CameraEvent]) -> PersonStatus {
    if history.is_empty() {
        return PersonStatus {
            name: name.to_string(),
            condition: Condition::SinReportes,
            last_location: "Desconocida".to_string(),
            last_timestamp: "N/A".to_string(),
            last_message: "Sin actividad registrada.".to_string(),
            is_notable: roster::is_notable(name),
            kind: PersonnelKind::of(name),
        };
    }

    if let Some(death) = history
        .iter()
        .find(|event| classify(event).is_terminal())
    {
        return status_from_event(name, Condition::Fallecido, death);
    }

    let window_start = history.len().saturating_sub(RECENT_WINDOW);
    let recent = &history[window_start..];

    // Oldest-to-newest with `>=` so equal severities resolve to the most
    // recent report. A window of all-NOMINAL events therefore lands on
    // the latest one.
    let mut chosen = &recent[0];
    let mut chosen_condition = classify(chosen);
    for event in &recent[1..] {
        let condition = classify(event);
        if condition.severity() >= chosen_condition.severity() {
            chosen = event;
            chosen_condition = condition;
        }
    }

    status_from_event(name, chosen_condition, chosen)
}

/// Full biomonitor report: the whole roster (plus any name the generator
/// introduced on the fly), each inferred from the events tagging it,
/// sorted the way the tracker displays them: dossier holders first, staff
/// before D-class, then alphabetical.
pub fn roster_report(events: &[CameraEvent]) -> Vec<PersonStatus> {
    let mut histories: HashMap<&str, Vec<CameraEvent>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for name in roster::ALL_PERSONNEL.iter() {
        histories.entry(name.as_str()).or_default();
        order.push(name.as_str());
    }
    for event in events {
        for name in &event.personnel {
            let history = histories.entry(name.as_str()).or_insert_with(|| {
                order.push(name.as_str());
                Vec::new()
            });
            history.push(event.clone());
        }
    }

    let mut report: Vec<PersonStatus> = order
        .into_iter()
        .map(|name| infer_status(name, &histories[name]))
        .collect();

    report.sort_by(|a, b| {
        b.is_notable
            .cmp(&a.is_notable)
            .then_with(|| match (a.kind, b.kind) {
                (PersonnelKind::Staff, PersonnelKind::DClass) => Ordering::Less,
                (PersonnelKind::DClass, PersonnelKind::Staff) => Ordering::Greater,
                _ => Ordering::Equal,
            })
            .then_with(|| a.name.cmp(&b.name))
    });
    report
}

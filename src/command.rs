use thiserror::Error;

use crate::biomonitor;
use crate::event::{CameraEvent, Priority};
use crate::roster;

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Comando desconocido: '{0}'. Escriba 'help' para obtener ayuda.")]
    Unknown(String),
    #[error("ERROR: {0}")]
    Usage(&'static str),
    #[error("ERROR: comando vacío.")]
    Empty,
}

/// One parsed operator command. Read-only queries run locally against the
/// event log; directives are simulation orders the caller forwards
/// verbatim to the generator with the next turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SiteStatus,
    PersonnelList,
    PersonnelQuery { name: String },
    PersonnelLocate { name: String },
    LogSearch { keyword: String },
    CctvFeed { camera: String },
    ContainmentStatus { camera: String },
    Directive { verb: String, raw: String },
}

const DIRECTIVE_VERBS: &[&str] = &[
    "personnel.dispatch",
    "personnel.psych_eval",
    "personnel.terminate",
    "personnel.relocate",
    "experiment.approve",
    "experiment.deny",
    "experiment.begin",
    "resource.send",
    "containment.lockdown",
];

/// Splits a command line into tokens, keeping double-quoted spans whole
/// and stripping the quotes.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.trim().chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

impl Command {
    pub fn parse(input: &str) -> Result<Command, CommandError> {
        let mut tokens = tokenize(input);
        if tokens.is_empty() {
            return Err(CommandError::Empty);
        }
        let verb = tokens.remove(0).to_lowercase();
        let rest = || tokens.join(" ");

        match verb.as_str() {
            "site.status" => Ok(Command::SiteStatus),
            "personnel.list" => Ok(Command::PersonnelList),
            "personnel.query" => {
                if tokens.is_empty() {
                    return Err(CommandError::Usage(
                        "Se requiere un nombre. Uso: personnel.query \"nombre completo\"",
                    ));
                }
                Ok(Command::PersonnelQuery { name: rest() })
            }
            "personnel.locate" => {
                if tokens.is_empty() {
                    return Err(CommandError::Usage(
                        "Se requiere un nombre. Uso: personnel.locate \"nombre completo\"",
                    ));
                }
                Ok(Command::PersonnelLocate { name: rest() })
            }
            "log.search" => {
                if tokens.is_empty() {
                    return Err(CommandError::Usage("Se requiere una palabra clave."));
                }
                Ok(Command::LogSearch { keyword: rest() })
            }
            "cctv.feed" => {
                if tokens.is_empty() {
                    return Err(CommandError::Usage("Se requiere un nombre de cámara."));
                }
                Ok(Command::CctvFeed { camera: rest() })
            }
            "containment.status" => {
                if tokens.is_empty() {
                    return Err(CommandError::Usage("Se requiere un nombre de cámara."));
                }
                Ok(Command::ContainmentStatus { camera: rest() })
            }
            _ if DIRECTIVE_VERBS.contains(&verb.as_str()) => {
                if tokens.is_empty() {
                    return Err(CommandError::Usage(
                        "La orden requiere argumentos. Escriba 'help' para ver la sintaxis.",
                    ));
                }
                let lowered = input.to_lowercase();
                if verb == "personnel.terminate" && !lowered.contains(" pd. ") {
                    return Err(CommandError::Usage(
                        "Uso incorrecto. Uso: personnel.terminate \"nombre\" pd. \"razón\"",
                    ));
                }
                if verb == "personnel.relocate" && !lowered.contains(" to ") {
                    return Err(CommandError::Usage(
                        "Uso incorrecto. Uso: personnel.relocate \"nombre\" to \"ubicación\"",
                    ));
                }
                Ok(Command::Directive {
                    verb,
                    raw: input.trim().to_string(),
                })
            }
            _ => Err(CommandError::Unknown(verb)),
        }
    }

    /// Whether the generator should see this command on the next turn.
    /// Queries about specific people or records are consequential too:
    /// the watcher reacts to being watched.
    pub fn is_consequential(&self) -> bool {
        matches!(
            self,
            Command::PersonnelQuery { .. }
                | Command::PersonnelLocate { .. }
                | Command::LogSearch { .. }
                | Command::CctvFeed { .. }
                | Command::Directive { .. }
        )
    }

    /// Executes the command against the current event log, producing
    /// plain output lines.
    pub fn execute(&self, events: &[CameraEvent]) -> Vec<String> {
        let mut out = match self {
            Command::SiteStatus => site_status(events),
            Command::PersonnelList => {
                let mut lines = vec!["Listando todo el personal conocido:".to_string()];
                let mut names = roster::ALL_PERSONNEL.clone();
                names.sort();
                lines.extend(names);
                lines
            }
            Command::PersonnelQuery { name } => match roster::dossier(name) {
                Some(dossier) => vec![format!("// DOSSIER: {name}"), dossier],
                None => vec![format!(
                    "Sin dossier detallado para '{name}'. El personal no es notable o la designación es incorrecta."
                )],
            },
            Command::PersonnelLocate { name } => {
                match events.iter().rev().find(|event| event.mentions(name)) {
                    Some(event) => vec![
                        format!(
                            "Última ubicación conocida de {name}: {} a las {}.",
                            event.camera, event.timestamp
                        ),
                        format!("  > Log asociado: \"{}\"", event.message),
                    ],
                    None => vec![format!(
                        "No hay registros de localización recientes para '{name}'."
                    )],
                }
            }
            Command::LogSearch { keyword } => log_search(events, keyword),
            Command::CctvFeed { camera } => cctv_feed(events, camera),
            Command::ContainmentStatus { camera } => containment_status(events, camera),
            Command::Directive { verb, .. } => vec![
                format!("[SIMULACIÓN] Orden '{verb}' registrada."),
                "Se están transmitiendo las órdenes a las partes pertinentes...".to_string(),
            ],
        };
        if self.is_consequential() {
            out.push(
                "COMANDO REGISTRADO. LAS CONSECUENCIAS SE REFLEJARÁN EN EL PRÓXIMO CICLO DE EVENTOS."
                    .to_string(),
            );
        }
        out
    }
}

fn site_status(events: &[CameraEvent]) -> Vec<String> {
    let high = events
        .iter()
        .filter(|e| e.priority == Priority::High)
        .count();
    let medium = events
        .iter()
        .filter(|e| e.priority == Priority::Medium)
        .count();
    vec![
        "Estado del Sitio-19:".to_string(),
        if high > 0 {
            format!("- Integridad de la Contención: FALLO DETECTADO ({high} alertas altas)")
        } else {
            "- Integridad de la Contención: ESTABLE".to_string()
        },
        if medium > 5 {
            "- Estabilidad Operacional: TENSIÓN DETECTADA".to_string()
        } else {
            "- Estabilidad Operacional: NOMINAL".to_string()
        },
        "- Red de Energía: ESTABLE (99.8% de eficiencia)".to_string(),
        "- Estado de I.R.I.S.: ONLINE".to_string(),
    ]
}

fn log_search(events: &[CameraEvent], keyword: &str) -> Vec<String> {
    let needle = keyword.to_lowercase();
    let matches: Vec<&CameraEvent> = events
        .iter()
        .filter(|event| event.message.to_lowercase().contains(&needle))
        .collect();
    if matches.is_empty() {
        return vec![format!("No se encontraron coincidencias para \"{keyword}\".")];
    }
    let mut lines = vec![format!(
        "{} coincidencias encontradas para \"{keyword}\":",
        matches.len()
    )];
    let shown = matches.len().saturating_sub(10);
    for event in &matches[shown..] {
        lines.push(format!(
            "[{}] ({}): {}",
            event.timestamp, event.camera, event.message
        ));
    }
    if matches.len() > 10 {
        lines.push(format!("...y {} más.", matches.len() - 10));
    }
    lines
}

fn cctv_feed(events: &[CameraEvent], camera: &str) -> Vec<String> {
    let needle = camera.to_lowercase();
    let matches: Vec<&CameraEvent> = events
        .iter()
        .filter(|event| event.camera.to_lowercase().contains(&needle))
        .collect();
    if matches.is_empty() {
        return vec![format!(
            "No hay eventos registrados para cámaras que coincidan con \"{camera}\"."
        )];
    }
    let mut lines = vec![format!(
        "Mostrando los últimos 5 eventos de cámaras que coinciden con \"{camera}\":"
    )];
    let shown = matches.len().saturating_sub(5);
    for event in &matches[shown..] {
        lines.push(format!(
            "[{}] ({}): {}",
            event.timestamp, event.camera, event.message
        ));
    }
    lines
}

fn containment_status(events: &[CameraEvent], camera: &str) -> Vec<String> {
    let last = events
        .iter()
        .rev()
        .find(|event| event.camera.eq_ignore_ascii_case(camera));
    match last {
        Some(event) => {
            let status = match event.priority {
                Priority::High => "ALERTA - BRECHA POTENCIAL",
                Priority::Medium => "PRECAUCIÓN - ACTIVIDAD ANÓMALA",
                Priority::Low => "NOMINAL",
            };
            vec![
                format!("Estado de {camera}: {status}"),
                format!("  > Último evento: [{}] {}", event.timestamp, event.message),
            ]
        }
        None => vec![format!("Estado de {camera}: NOMINAL (Sin eventos recientes)")],
    }
}

/// Severity-aware one-line summary for a person, for `personnel.locate`
/// style overlays. Thin wrapper over the biomonitor.
pub fn person_summary(name: &str, events: &[CameraEvent]) -> String {
    let history: Vec<CameraEvent> = events
        .iter()
        .filter(|event| event.mentions(name))
        .cloned()
        .collect();
    let status = biomonitor::infer_status(name, &history);
    format!(
        "{}: {} / {} [{}]",
        status.name, status.condition, status.last_location, status.last_timestamp
    )
}

// ../tests/tests.rs
use iris_net::*;
use std::fs;
use std::sync::Mutex;

fn event(
    camera: &str,
    timestamp: &str,
    message: &str,
    priority: Priority,
    personnel: &[&str],
) -> CameraEvent {
    CameraEvent {
        camera: camera.to_string(),
        timestamp: timestamp.to_string(),
        message: message.to_string(),
        priority,
        personnel: personnel.iter().map(|p| p.to_string()).collect(),
        anomalies: Vec::new(),
        image_id: None,
    }
}

fn message(sender: &str, body: &str) -> Message {
    Message {
        sender: sender.to_string(),
        recipient: "Supervisor".to_string(),
        timestamp: "00:00:00".to_string(),
        body: body.to_string(),
        is_read: false,
    }
}

// --- Status inference ---

#[test]
fn test_routine_patrol_is_nominal() {
    let history = vec![event(
        "Bloque-D",
        "08:00:00",
        "Patrulla rutinaria completada.",
        Priority::Low,
        &["Guardia Chenkov"],
    )];
    let status = infer_status("Guardia Chenkov", &history);
    assert_eq!(status.condition, Condition::Nominal);
    assert_eq!(status.last_location, "Bloque-D");
    assert_eq!(status.condition.to_string(), "NOMINAL");
}

#[test]
fn test_empty_history_yields_sentinel() {
    let status = infer_status("Dr. Aris Thorne", &[]);
    assert_eq!(status.condition, Condition::SinReportes);
    assert_eq!(status.last_location, "Desconocida");
    assert_eq!(status.last_timestamp, "N/A");
    assert_eq!(status.last_message, "Sin actividad registrada.");
    assert!(status.is_notable);
    assert_eq!(status.kind, PersonnelKind::Staff);
}

#[test]
fn test_death_is_sticky_and_uses_first_death_event() {
    // The death report is earlier and lower priority than the breach that
    // follows; it must still pin the status permanently.
    let history = vec![
        event(
            "Enfermería",
            "02:10:00",
            "Cese de signos vitales confirmado en el sujeto.",
            Priority::Low,
            &["D-11205"],
        ),
        event(
            "Containment Area (SCP-106)",
            "02:15:00",
            "Brecha detectada en la celda adyacente.",
            Priority::High,
            &["D-11205"],
        ),
    ];
    let status = infer_status("D-11205", &history);
    assert_eq!(status.condition, Condition::Fallecido);
    assert_eq!(status.last_location, "Enfermería");
    assert_eq!(status.last_timestamp, "02:10:00");
}

#[test]
fn test_death_outside_recent_window_still_wins() {
    let mut history = vec![event(
        "Laboratorio Gamma-5",
        "01:00:00",
        "Sujeto fallecido durante la prueba.",
        Priority::High,
        &["D-11207"],
    )];
    for i in 0..15 {
        history.push(event(
            "Bloque-D",
            &format!("03:{i:02}:00"),
            "Recuento nominal en barracones.",
            Priority::Low,
            &["D-11207"],
        ));
    }
    let status = infer_status("D-11207", &history);
    assert_eq!(status.condition, Condition::Fallecido);
    assert_eq!(status.last_timestamp, "01:00:00");
}

#[test]
fn test_old_crisis_falls_out_of_the_window() {
    // 11 events: the HIGH one is first, pushed out of the last-10 window
    // by ten quiet reports. The displayed status must only reflect the
    // windowed events.
    let mut history = vec![event(
        "Perímetro Norte",
        "04:00:00",
        "Disparos detectados en el sector.",
        Priority::High,
        &["Guardia Rodriguez"],
    )];
    for i in 0..10 {
        history.push(event(
            "Perímetro Norte",
            &format!("05:{i:02}:00"),
            "Todo despejado.",
            Priority::Low,
            &["Guardia Rodriguez"],
        ));
    }
    assert_eq!(history.len(), 11);
    let status = infer_status("Guardia Rodriguez", &history);
    assert_eq!(status.condition, Condition::Nominal);
    // The tie rule lands on the latest of the windowed NOMINAL reports.
    assert_eq!(status.last_timestamp, "05:09:00");
}

#[test]
fn test_severity_tie_prefers_the_later_event() {
    let history = vec![
        event(
            "Laboratorio Gamma-5",
            "06:00:00",
            "Estrés elevado detectado en el sujeto.",
            Priority::Low,
            &["Marco Reyes"],
        ),
        event(
            "Cafetería del Personal",
            "06:30:00",
            "Comportamiento anómalo durante el cambio de turno.",
            Priority::Low,
            &["Marco Reyes"],
        ),
    ];
    let status = infer_status("Marco Reyes", &history);
    assert_eq!(status.condition, Condition::CondicionAnomala);
    assert_eq!(status.last_location, "Cafetería del Personal");
}

#[test]
fn test_injury_keywords_outrank_priority_escalation() {
    // "herido" reports read as HERIDO even when the event is escalated.
    let history = vec![event(
        "Pasillo de Contención Este",
        "07:00:00",
        "Personal herido tras el incidente. Solicitando equipo médico.",
        Priority::Medium,
        &["Guardia Jian Li"],
    )];
    assert_eq!(
        infer_status("Guardia Jian Li", &history).condition,
        Condition::Herido
    );
}

#[test]
fn test_high_priority_alone_means_danger() {
    let history = vec![event(
        "Núcleo del Mainframe",
        "07:30:00",
        "Transmisión saliente no autorizada interceptada.",
        Priority::High,
        &["Agente Kaelen Carter"],
    )];
    assert_eq!(
        infer_status("Agente Kaelen Carter", &history).condition,
        Condition::EnPeligro
    );
}

#[test]
fn test_inference_is_idempotent() {
    let history = vec![
        event("Bloque-D", "08:00:00", "Sin señal del sujeto.", Priority::Low, &["D-11210"]),
        event("Bloque-D", "08:05:00", "Recuento nominal.", Priority::Low, &["D-11210"]),
    ];
    let first = infer_status("D-11210", &history);
    let second = infer_status("D-11210", &history);
    assert_eq!(first, second);
    assert_eq!(first.condition, Condition::Desaparecido);
}

#[test]
fn test_roster_report_seeds_silent_personnel_and_sorts() {
    let events = vec![event(
        "Laboratorio Gamma-5",
        "09:00:00",
        "Calibración de sensores en curso.",
        Priority::Low,
        &["Visitante Externo Vance"],
    )];
    let report = roster_report(&events);

    // Every roster member appears even with no reports, plus the name the
    // generator introduced on the fly.
    assert!(report.len() > iris_net::roster::ALL_PERSONNEL.len());
    let vance = report
        .iter()
        .find(|p| p.name == "Visitante Externo Vance")
        .expect("dynamically introduced personnel missing from report");
    assert_eq!(vance.condition, Condition::Nominal);

    let thorne = report.iter().find(|p| p.name == "Dr. Aris Thorne").unwrap();
    assert_eq!(thorne.condition, Condition::SinReportes);

    // Dossier holders come first, and within the rest staff precede
    // D-class.
    let first_plain = report.iter().position(|p| !p.is_notable).unwrap();
    assert!(report[..first_plain].iter().all(|p| p.is_notable));
    let first_d = report
        .iter()
        .skip(first_plain)
        .position(|p| p.kind == PersonnelKind::DClass)
        .map(|i| i + first_plain)
        .unwrap();
    assert!(
        report[first_d..]
            .iter()
            .all(|p| p.kind == PersonnelKind::DClass)
    );
}

// --- Inbox ---

#[test]
fn test_inbox_unread_counter_tracks_flags() {
    let mut inbox = Inbox::new();
    inbox.push_batch(vec![
        message("Valerius", "Informe de seguridad pendiente."),
        message("Dra. Anya Sharma", "Revisión ética programada."),
        message("Intendente Declan O'Malley", "Inventario actualizado."),
    ]);
    assert_eq!(inbox.unread(), 3);

    inbox.mark_read(1);
    assert_eq!(inbox.unread(), 2);
    // Re-reading the same message must not double-decrement.
    inbox.mark_read(1);
    assert_eq!(inbox.unread(), 2);

    inbox.mark_all_read();
    assert_eq!(inbox.unread(), 0);
    assert!(inbox.messages().iter().all(|m| m.is_read));
}

// --- Alerts ---

#[test]
fn test_low_priority_never_alerts() {
    let events = vec![
        event("Bloque-D", "10:00:00", "Patrulla rutinaria.", Priority::Low, &[]),
        event(
            "Invernadero del Área-12",
            "10:05:00",
            "Crecimiento acelerado detectado en el espécimen.",
            Priority::Medium,
            &[],
        ),
        event(
            "Containment Area (SCP-106)",
            "10:10:00",
            "Brecha de contención confirmada.",
            Priority::High,
            &[],
        ),
    ];
    let alerts = Alert::from_events(&events);
    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|a| a.event.priority != Priority::Low));
    // Each alert carries its own identity.
    assert_ne!(alerts[0].id, alerts[1].id);
}

// --- Turn history ---

#[test]
fn test_history_depth_is_pushes_minus_pops() {
    let mut history = TurnHistory::new();
    assert!(!history.can_undo());

    let snapshot = TurnSnapshot {
        events: Vec::new(),
        messages: Vec::new(),
        unread: 0,
        context: GeneratorContext::default(),
    };
    for _ in 0..5 {
        history.push(snapshot.clone());
    }
    assert_eq!(history.depth(), 5);
    assert!(history.can_undo());

    for _ in 0..3 {
        assert!(history.pop().is_some());
    }
    assert_eq!(history.depth(), 2);

    assert!(history.pop().is_some());
    assert!(history.pop().is_some());
    assert!(!history.can_undo());
    // Popping an empty stack is a visible no-op, not an error.
    assert!(history.pop().is_none());
    assert_eq!(history.depth(), 0);
}

// --- Session turn cycle ---

enum ScriptStep {
    Report(TurnReport),
    Fail,
}

struct ScriptedGenerator {
    script: Mutex<Vec<ScriptStep>>,
}

impl ScriptedGenerator {
    fn new(script: Vec<ScriptStep>) -> Self {
        Self {
            script: Mutex::new(script),
        }
    }
}

impl TurnGenerator for ScriptedGenerator {
    async fn next_turn(
        &self,
        context: &GeneratorContext,
        operator_command: Option<&str>,
    ) -> std::result::Result<(TurnReport, GeneratorContext), GenerationError> {
        let step = self.script.lock().unwrap().remove(0);
        match step {
            ScriptStep::Report(report) => {
                let reply = serde_json::to_string(&report).unwrap();
                let prompt = iris_net::generator::advance_prompt(operator_command);
                Ok((report, context.extended(prompt, reply)))
            }
            ScriptStep::Fail => Err(GenerationError::EmptyResponse),
        }
    }
}

fn report_with(events: Vec<CameraEvent>, messages: Vec<Message>) -> TurnReport {
    TurnReport { events, messages }
}

#[tokio::test]
async fn test_undo_restores_all_four_slices_atomically() {
    let e1 = event("Bloque-D", "11:00:00", "Recuento nominal.", Priority::Low, &["D-11201"]);
    let e2 = event(
        "Bloque-D",
        "11:30:00",
        "Gritos registrados en los barracones.",
        Priority::High,
        &["D-11201"],
    );
    let generator = ScriptedGenerator::new(vec![
        ScriptStep::Report(report_with(
            vec![e1.clone()],
            vec![message("Valerius", "Turno iniciado.")],
        )),
        ScriptStep::Report(report_with(
            vec![e2.clone()],
            vec![message("Valerius", "Solicito bloqueo del sector.")],
        )),
    ]);

    let mut session = Session::new(GeneratorContext::with_instruction("instrucciones"));
    session.advance(&generator, None).await.unwrap();
    assert_eq!(session.events(), &[e1.clone()]);

    let context_after_first = session.context().clone();
    let unread_after_first = session.inbox().unread();

    let added = session.advance(&generator, None).await.unwrap().to_vec();
    assert_eq!(added, vec![e2.clone()]);
    assert_eq!(session.events().len(), 2);
    assert_eq!(session.inbox().unread(), 2);
    assert_eq!(session.history_depth(), 2);

    assert!(session.undo());
    // All four slices revert together to the pre-turn capture.
    assert_eq!(session.events(), &[e1]);
    assert_eq!(session.inbox().messages().len(), 1);
    assert_eq!(session.inbox().unread(), unread_after_first);
    assert_eq!(session.context(), &context_after_first);
    assert!(session.can_undo());

    assert!(session.undo());
    assert!(session.events().is_empty());
    assert_eq!(session.inbox().unread(), 0);
    assert!(!session.can_undo());
    // Undo on an empty stack reports "nothing to undo".
    assert!(!session.undo());
}

#[tokio::test]
async fn test_failed_turn_keeps_snapshot_and_clears_busy_flag() {
    let e1 = event("Enfermería", "12:00:00", "Triaje completado.", Priority::Low, &[]);
    let generator = ScriptedGenerator::new(vec![
        ScriptStep::Fail,
        ScriptStep::Report(report_with(vec![e1.clone()], Vec::new())),
    ]);

    let mut session = Session::new(GeneratorContext::default());
    let err = session.advance(&generator, None).await.unwrap_err();
    assert!(matches!(err, Error::Generation(_)));

    // Nothing merged, but the pre-pushed snapshot stays undoable and the
    // busy flag is clear for the retry.
    assert!(session.events().is_empty());
    assert!(session.can_undo());
    assert!(!session.is_advancing());

    session.advance(&generator, None).await.unwrap();
    assert_eq!(session.events(), &[e1]);
}

#[tokio::test]
async fn test_undo_after_failed_turn_restores_identical_state() {
    let generator = ScriptedGenerator::new(vec![ScriptStep::Fail]);
    let mut session = Session::new(GeneratorContext::with_instruction("instrucciones"));
    let before = session.context().clone();

    assert!(session.advance(&generator, None).await.is_err());
    assert!(session.undo());
    assert_eq!(session.context(), &before);
    assert!(session.events().is_empty());
    assert!(!session.can_undo());
}

#[tokio::test]
async fn test_alerts_derive_from_turn_and_clear_on_undo() {
    let generator = ScriptedGenerator::new(vec![ScriptStep::Report(report_with(
        vec![
            event("Bloque-D", "13:00:00", "Patrulla rutinaria.", Priority::Low, &[]),
            event(
                "Containment Area (SCP-173)",
                "13:05:00",
                "Parpadeo no coordinado detectado.",
                Priority::Medium,
                &[],
            ),
        ],
        Vec::new(),
    ))]);

    let mut session = Session::new(GeneratorContext::default());
    session.advance(&generator, None).await.unwrap();
    assert_eq!(session.alerts().len(), 1);

    let id = session.alerts()[0].id;
    assert!(session.dismiss_alert(id));
    assert!(!session.dismiss_alert(id));

    session.undo();
    assert!(session.alerts().is_empty());
}

// --- Generator parsing ---

#[test]
fn test_turn_report_parses_fenced_fixture() {
    // Step 1: Read the dummy generator reply, markdown fences included.
    let raw = fs::read_to_string("tests/dummy_turn_report.json")
        .expect("Failed to read dummy turn report file");

    // Step 2: Parse it the way the generator boundary does.
    let report =
        iris_net::generator::parse_turn_report(&raw).expect("Failed to parse turn report");

    // Step 3: Verify the parsed shape.
    assert_eq!(report.events.len(), 3);
    assert_eq!(report.messages.len(), 1);

    let breach = &report.events[1];
    assert_eq!(breach.priority, Priority::High);
    assert_eq!(breach.camera, "Containment Area (SCP-106)");
    assert_eq!(breach.image_id, Some(3));
    assert!(breach.mentions("Guardia Eva Evans"));
    assert_eq!(breach.anomalies, vec!["SCP-106".to_string()]);

    assert_eq!(report.messages[0].sender, "Jefe de Seguridad Valerius");
    assert!(!report.messages[0].is_read);
}

#[test]
fn test_malformed_and_empty_replies_are_rejected() {
    assert!(matches!(
        iris_net::generator::parse_turn_report("no es json"),
        Err(GenerationError::Parse(_))
    ));
    assert!(matches!(
        iris_net::generator::parse_turn_report("```json\n```"),
        Err(GenerationError::EmptyResponse)
    ));
}

#[test]
fn test_advance_prompt_carries_the_operator_command() {
    let prompt = iris_net::generator::advance_prompt(Some("containment.lockdown \"Bloque-D\""));
    assert!(prompt.starts_with("USER ACTION: containment.lockdown"));
    assert!(prompt.ends_with(iris_net::generator::ADVANCE_PROMPT));
    assert_eq!(
        iris_net::generator::advance_prompt(None),
        iris_net::generator::ADVANCE_PROMPT
    );
}

// --- Operator commands ---

#[test]
fn test_tokenizer_keeps_quoted_spans_whole() {
    let tokens = iris_net::command::tokenize("personnel.locate \"Dr. Aris Thorne\"");
    assert_eq!(tokens, vec!["personnel.locate", "Dr. Aris Thorne"]);

    let tokens = iris_net::command::tokenize("experiment.begin \"SCP-173\" \"Dra. Petrova\" D-11205");
    assert_eq!(
        tokens,
        vec!["experiment.begin", "SCP-173", "Dra. Petrova", "D-11205"]
    );
}

#[test]
fn test_command_parse_and_consequences() {
    let locate = Command::parse("personnel.locate \"Guardia Eva Evans\"").unwrap();
    assert_eq!(
        locate,
        Command::PersonnelLocate {
            name: "Guardia Eva Evans".to_string()
        }
    );
    assert!(locate.is_consequential());

    let status = Command::parse("site.status").unwrap();
    assert_eq!(status, Command::SiteStatus);
    assert!(!status.is_consequential());

    let lockdown = Command::parse("containment.lockdown \"Bloque-D\"").unwrap();
    assert!(matches!(&lockdown, Command::Directive { verb, .. } if verb == "containment.lockdown"));
    assert!(lockdown.is_consequential());

    assert!(matches!(
        Command::parse("personnel.query"),
        Err(CommandError::Usage(_))
    ));
    assert!(matches!(
        Command::parse("personnel.terminate \"D-11205\""),
        Err(CommandError::Usage(_))
    ));
    assert!(Command::parse("personnel.terminate \"D-11205\" pd. \"Insubordinación\"").is_ok());
    assert!(matches!(
        Command::parse("self.destruct"),
        Err(CommandError::Unknown(_))
    ));
}

#[test]
fn test_command_queries_read_the_event_log() {
    let events = vec![
        event(
            "Laboratorio Gamma-5",
            "14:00:00",
            "Lectura de calibración registrada.",
            Priority::Low,
            &["Investigadora Lena Petrova"],
        ),
        event(
            "Laboratorio Gamma-5",
            "14:20:00",
            "Emisión de energía coherente detectada.",
            Priority::Medium,
            &["Investigadora Lena Petrova"],
        ),
        event(
            "Perímetro Norte",
            "14:25:00",
            "Brecha en la valla exterior.",
            Priority::High,
            &[],
        ),
    ];

    let out = Command::parse("personnel.locate \"Investigadora Lena Petrova\"")
        .unwrap()
        .execute(&events);
    assert!(out[0].contains("Laboratorio Gamma-5"));
    assert!(out[0].contains("14:20:00"));

    let out = Command::parse("log.search \"brecha\"").unwrap().execute(&events);
    assert!(out[0].starts_with("1 coincidencias"));

    let out = Command::parse("site.status").unwrap().execute(&events);
    assert!(out[1].contains("FALLO DETECTADO (1 alertas altas)"));

    let out = Command::parse("containment.status \"laboratorio gamma-5\"")
        .unwrap()
        .execute(&events);
    assert!(out[0].contains("PRECAUCIÓN - ACTIVIDAD ANÓMALA"));

    let out = Command::parse("cctv.feed \"Sala de Reuniones\"")
        .unwrap()
        .execute(&events);
    assert!(out[0].starts_with("No hay eventos registrados"));
}

// --- Roster ---

#[test]
fn test_d_class_dossiers_are_deterministic_and_distinct() {
    let first = iris_net::roster::d_class_dossier("D-11209");
    let again = iris_net::roster::d_class_dossier("D-11209");
    assert_eq!(first, again);
    assert!(first.starts_with("DESIGNACIÓN: D-11209"));

    let other = iris_net::roster::d_class_dossier("D-11210");
    assert_ne!(first, other);
}

#[test]
fn test_dossier_lookup_covers_notable_and_d_class() {
    assert!(iris_net::roster::dossier("Dr. Aris Thorne")
        .unwrap()
        .contains("Nivel 3"));
    assert!(iris_net::roster::dossier("D-11205").is_some());
    assert!(iris_net::roster::dossier("Guardia Anónimo").is_none());
    assert_eq!(PersonnelKind::of("D-11424"), PersonnelKind::DClass);
    assert_eq!(PersonnelKind::of("Marco Reyes"), PersonnelKind::Staff);
}

// --- Settings ---

#[test]
fn test_settings_round_trip() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("settings.json");

    let mut settings = Settings::new();
    settings.model = "gpt-4o".to_string();
    settings.debug_mode = true;
    settings.save_to_file(&path).expect("Failed to save settings");

    let loaded = Settings::load_from_file(&path).expect("Failed to load settings");
    assert_eq!(loaded.model, "gpt-4o");
    assert!(loaded.debug_mode);
    assert_eq!(loaded.language, "Español");
    assert!(loaded.openai_api_key.is_none());
}

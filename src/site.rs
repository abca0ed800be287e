/// The fixed camera grid of Site-19. The generator is instructed to only
/// report from these locations; the core does not re-validate that (the
/// log faithfully records whatever the generator said it saw).
pub static CAMERA_LOCATIONS: &[(&str, &str)] = &[
    (
        "Containment Area (SCP-173)",
        "Celda de hormigón reforzado, observación por turnos con parpadeo coordinado.",
    ),
    (
        "Containment Area (SCP-106)",
        "Celda de contención primaria con suelo de retención magnética.",
    ),
    (
        "Containment Area (SCP-096)",
        "Cámara sellada; las cámaras interiores operan sin monitoreo visual directo.",
    ),
    (
        "Laboratorio de Materiales Anómalos",
        "Laboratorio de Nivel 3, asignado al equipo del Dr. Aris Thorne.",
    ),
    (
        "Laboratorio Gamma-5",
        "Ala de investigación de cognitopeligros, acceso restringido Nivel 2+.",
    ),
    (
        "Invernadero del Área-12",
        "Contención botánica y estudios de flora anómala.",
    ),
    (
        "Bloque-D",
        "Barracones y zonas comunes del personal de Clase-D.",
    ),
    (
        "Enfermería",
        "Unidad médica general y triaje post-incidente.",
    ),
    (
        "Cafetería del Personal",
        "Zona común de Nivel 1; tráfico elevado en cambios de turno.",
    ),
    (
        "Núcleo del Mainframe",
        "Sala de servidores que aloja los procesos centrales de I.R.I.S.",
    ),
    (
        "Almacén Médico",
        "Depósito de suministros médicos y amnésicos de bajo nivel.",
    ),
    (
        "Pasillo de Contención Este",
        "Corredor de tránsito entre las alas de contención Euclid.",
    ),
    (
        "Perímetro Norte",
        "Valla exterior y puestos de vigilancia de superficie.",
    ),
    (
        "Centro de Seguridad",
        "Sala de monitoreo central y archivo de grabaciones.",
    ),
];

pub fn is_known_camera(name: &str) -> bool {
    CAMERA_LOCATIONS
        .iter()
        .any(|(camera, _)| camera.eq_ignore_ascii_case(name))
}

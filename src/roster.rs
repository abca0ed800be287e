use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Personnel with a written dossier. The generator develops their story
/// arcs; the biomonitor pins them to the top of the roster.
pub static NOTABLE_PERSONNEL: &[(&str, &str)] = &[
    (
        "Dr. Aris Thorne",
        "Un brillante pero despiadadamente ambicioso investigador de Nivel 3 en el Laboratorio de Materiales Anómalos. Actúa a menudo con secretismo, accediendo a datos no relacionados con su proyecto actual. Su objetivo final no es solo el reconocimiento, sino el control sobre una anomalía poderosa.",
    ),
    (
        "Dr. Elias Thorne",
        "El hermano mayor y rival académico de Aris Thorne. Investigador Senior de Nivel 4 en el Departamento de Anomalías Temporales: metódico, cauteloso, y convencido de que la imprudencia de su hermano es un peligro para la instalación.",
    ),
    (
        "Investigadora Lena Petrova",
        "Una joven y entusiasta especialista en cognitopeligros (Nivel 2) asignada al Laboratorio Gamma-5. A menudo desactiva protocolos de seguridad menores para obtener lecturas 'puras', creyendo que la contención estándar obstaculiza el verdadero descubrimiento.",
    ),
    (
        "Dr. Alistair Chen",
        "Investigador de Nivel 3, un purista de los datos obsesionado con la metodología perfecta. No duda en presentar quejas formales y es conocido por instalar sus propios sensores redundantes para verificar el trabajo de los demás.",
    ),
    (
        "Dr. Evelyn Simmons",
        "Especialista en xenobiología de Nivel 3, fascinada por la flora anómala. Su obsesión por crear híbridos en el Invernadero del Área-12 la lleva a ignorar los protocolos de seguridad biológica.",
    ),
    (
        "Marco Reyes",
        "Un técnico de laboratorio junior que admira al Dr. Aris Thorne. Fácilmente impresionable y manipulable; a menudo realiza tareas para Thorne sin comprender plenamente sus implicaciones.",
    ),
    (
        "Jefe de Seguridad Valerius",
        "Un veterano cínico y paranoico de las FDM. Cree firmemente que hay un topo dentro del Sitio-19. Instala vigilancia no autorizada y revisa los registros de terminales obsesivamente.",
    ),
    (
        "Dra. Anya Sharma",
        "Una severa Enlace del Comité de Ética de Nivel 4. Hace cumplir el protocolo al pie de la letra, con un enfoque particular en el tratamiento del personal de Clase-D. Un obstáculo burocrático para los investigadores más ambiciosos.",
    ),
    (
        "Intendente Declan O'Malley",
        "El jefe de logística y adquisiciones del Sitio-19. Controla el acceso a todos los recursos y dirige un pequeño mercado negro de favores y suministros de bajo nivel.",
    ),
    (
        "Comandante Eva Rostova",
        "Comandante de la Fuerza Operativa Móvil Epsilon-11 estacionada en el Sitio-19. Profesional, tranquila bajo presión y absolutamente letal. Su única preocupación es la contención y la seguridad del sitio.",
    ),
    (
        "Agente Kaelen Carter",
        "Un agente de asuntos internos encubierto, que se hace pasar por un guardia regular. Su misión es investigar la corrupción y las violaciones de protocolo dentro del personal de seguridad.",
    ),
    (
        "Sargento Marcus Davis",
        "Un líder de escuadrón de las FDM estricto pero justo, secretamente preocupado por el creciente estrés y la fatiga de su equipo debido a las constantes alertas de bajo nivel.",
    ),
    (
        "Guardia Eva Evans",
        "Veterana con nervios de acero, pero con una adicción secreta a los estimulantes de la Fundación para mantenerse alerta, lo que la hace vulnerable al chantaje.",
    ),
    (
        "Técnico David Lee",
        "Técnico de Nivel 2 en el núcleo del Mainframe. El primero en notar las extrañas irregularidades en el tráfico de la red, sin saber si son interferencia anómala o espionaje deliberado.",
    ),
    (
        "D-11424",
        "El Oportunista. Un sujeto de pruebas con una tasa de supervivencia anómala. Cada crisis es una oportunidad potencial para él: estudia las respuestas de seguridad durante los bloqueos e intenta robar objetos pequeños durante experimentos caóticos.",
    ),
    (
        "D-11283",
        "El Veterano Cínico. Desensibilizado y fatalista. Sigue las órdenes con un mínimo de alboroto para sobrevivir; puede sabotear sutilmente experimentos que considera inútiles o excesivamente peligrosos.",
    ),
    (
        "D-11301",
        "El Creyente Ferviente. Propenso a la superstición. Interpreta los eventos anómalos a través de una lente cuasi-religiosa, lo que lo convierte en un factor de caos impredecible.",
    ),
    (
        "D-11562",
        "La Ex-Ingeniera. Capaz de señalar fallos en el cableado y debilidades estructurales, a menudo para gran molestia de los investigadores que ignoran sus observaciones no solicitadas pero precisas.",
    ),
];

pub const D_CLASS_SERIES_START: u32 = 11_201;
pub const D_CLASS_SERIES_LEN: u32 = 49;

/// The general D-class roster. Notable D-class subjects carry their own
/// dossier above and are excluded from this series.
pub fn d_class_roster() -> impl Iterator<Item = String> {
    (D_CLASS_SERIES_START..D_CLASS_SERIES_START + D_CLASS_SERIES_LEN).map(|n| format!("D-{n}"))
}

/// Every name the biomonitor seeds its report with, notable first,
/// deduplicated (a notable D-class may also fall in the general series).
pub static ALL_PERSONNEL: Lazy<Vec<String>> = Lazy::new(|| {
    let mut names: Vec<String> = NOTABLE_PERSONNEL
        .iter()
        .map(|(name, _)| (*name).to_string())
        .collect();
    for designation in d_class_roster() {
        if !names.contains(&designation) {
            names.push(designation);
        }
    }
    names
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum PersonnelKind {
    #[strum(serialize = "STAFF")]
    Staff,
    #[strum(serialize = "D-CLASS")]
    DClass,
}

impl PersonnelKind {
    /// Name-prefix convention: every D-class designation starts with "D-".
    pub fn of(name: &str) -> Self {
        if name.starts_with("D-") {
            PersonnelKind::DClass
        } else {
            PersonnelKind::Staff
        }
    }
}

pub fn is_notable(name: &str) -> bool {
    NOTABLE_PERSONNEL.iter().any(|(n, _)| *n == name)
}

/// Dossier lookup. Notable personnel have a written dossier; any other
/// D-class gets a synthetic one; general staff have none on file.
pub fn dossier(name: &str) -> Option<String> {
    if let Some((_, text)) = NOTABLE_PERSONNEL.iter().find(|(n, _)| *n == name) {
        return Some((*text).to_string());
    }
    match PersonnelKind::of(name) {
        PersonnelKind::DClass => Some(d_class_dossier(name)),
        PersonnelKind::Staff => None,
    }
}

const ORIGINS: &[&str] = &[
    "Corredor de la muerte",
    "Prisión de máxima seguridad",
    "Reclutamiento de población civil bajo el Protocolo 12",
    "Transferido desde el Sitio-[CENSURADO]",
    "Voluntario (ver anexo psiquiátrico)",
    "Capturado de un Grupo de Interés hostil",
];

const CRIMES: &[&str] = &[
    "Múltiples homicidios",
    "Asesinato de personal de la Fundación",
    "Actos de terrorismo doméstico",
    "Creación/distribución de un agente memético ilegal",
    "Colaboración con el GdI 'La Mano de la Serpiente'",
    "Uso no autorizado de un artefacto anómalo",
    "[CENSURADO] bajo el Protocolo de Seguridad 4000-Eshu",
    "Crímenes de guerra",
];

const PSYCH_TRAITS: &[&str] = &[
    "Muestra una alta tolerancia al dolor.",
    "Exhibe un comportamiento errático bajo estrés.",
    "Tiene experiencia previa con fenómenos anómalos.",
    "Psicológicamente resistente a los efectos meméticos de Clase II.",
    "Muestra una obediencia excepcional al personal de Nivel 3 o superior.",
    "Propenso a la violencia contra otro personal de Clase-D.",
    "Niveles de empatía por debajo de la media.",
    "Sujeto muestra una notable aptitud para la improvisación.",
    "Tendencias a la insubordinación si no está supervisado de cerca.",
    "Se desensibiliza rápidamente a los estímulos anómalos.",
];

const ASSIGNMENT_NOTES: &[&str] = &[
    "Recomendado para pruebas de resistencia física.",
    "No recomendado para tareas que requieran concentración.",
    "Apto para pruebas con cognitopeligros de bajo nivel.",
    "Considerado de alto riesgo de fuga. Requiere vigilancia adicional.",
    "Apto para la observación directa de anomalías visuales.",
    "Recomendado para tareas con anomalías mecánicas o manipulación de dispositivos.",
    "Requiere supervisión constante debido a su comportamiento impredecible.",
];

// Same string-hash the terminal database uses: 32-bit, order-sensitive,
// stable across sessions so a designation always reads the same.
fn name_hash(name: &str) -> i32 {
    let mut hash: i32 = 0;
    for c in name.chars() {
        hash = (c as u32 as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
    }
    hash
}

fn seeded_pick<'a>(pool: &[&'a str], seed: i32) -> &'a str {
    let s = f64::from(seed).sin() * 10_000.0;
    let r = s - s.floor();
    let index = ((r * pool.len() as f64) as usize).min(pool.len() - 1);
    pool[index]
}

/// Deterministic synthetic dossier for a general-roster D-class subject.
pub fn d_class_dossier(name: &str) -> String {
    let hash = name_hash(name);
    let origin = seeded_pick(ORIGINS, hash);
    let crime = seeded_pick(CRIMES, hash.wrapping_add(1));
    let trait_a = seeded_pick(PSYCH_TRAITS, hash.wrapping_add(2));
    let mut offset = 3;
    let mut trait_b = seeded_pick(PSYCH_TRAITS, hash.wrapping_add(offset));
    while trait_b == trait_a {
        offset += 1;
        trait_b = seeded_pick(PSYCH_TRAITS, hash.wrapping_add(offset));
    }
    let note = seeded_pick(ASSIGNMENT_NOTES, hash.wrapping_add(offset + 1));

    format!(
        "DESIGNACIÓN: {name}\n\nORIGEN DEL RECLUTAMIENTO: {origin}\n\nREGISTRO CRIMINAL: {crime}\n\nEVALUACIÓN PSICOLÓGICA: {trait_a} {trait_b} Perfil general estable dentro de los parámetros esperados para el personal de Clase-D.\n\nNOTA DE ASIGNACIÓN: {note}"
    )
}

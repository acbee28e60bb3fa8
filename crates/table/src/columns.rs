//! Canonical column vocabulary.
//!
//! Ingested headers are normalized with [`normalize_header`] so that legacy
//! survey exports (Spanish headers) and ad-hoc English variants land on the
//! same names the scoring functions look for.

// ============================================================================
// IDENTITY
// ============================================================================

/// Positive integer row identifier. Unique per generated source only.
pub const EMPLOYEE_ID: &str = "employee_id";
pub const NAME: &str = "name";

// ============================================================================
// CATEGORICAL DESCRIPTORS
// ============================================================================

pub const WORK_AREA: &str = "work_area";
pub const JOB_TITLE: &str = "job_title";
/// Ordinal: Low / Medium / High / Very High
pub const STRESS_LEVEL: &str = "stress_level";
/// Ordinal, same scale as stress level
pub const WORKLOAD_DEMAND: &str = "workload_demand";
pub const GENDER: &str = "gender";
pub const CONTRACT_TYPE: &str = "contract_type";

// ============================================================================
// NUMERIC MEASURES
// ============================================================================

/// Integer 1-10
pub const JOB_SATISFACTION: &str = "job_satisfaction";
pub const ABSENCE_DAYS: &str = "absence_days";
pub const TENURE_MONTHS: &str = "tenure_months";
pub const AGE: &str = "age";

/// Every canonical column, in presentation order.
pub const CANONICAL: [&str; 12] = [
    EMPLOYEE_ID,
    NAME,
    WORK_AREA,
    JOB_TITLE,
    STRESS_LEVEL,
    WORKLOAD_DEMAND,
    JOB_SATISFACTION,
    ABSENCE_DAYS,
    TENURE_MONTHS,
    AGE,
    GENDER,
    CONTRACT_TYPE,
];

/// Normalize a raw header: trim, lower-case, collapse separators to `_`,
/// then map known aliases onto the canonical name.
pub fn normalize_header(raw: &str) -> String {
    let cleaned = raw.trim().trim_start_matches('\u{feff}').to_lowercase();
    let key: String = cleaned
        .split(|c: char| c.is_whitespace() || c == '-' || c == '.' || c == '_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    match canonical_alias(&key) {
        Some(canonical) => canonical.to_string(),
        None => key,
    }
}

fn canonical_alias(key: &str) -> Option<&'static str> {
    let canonical = match key {
        "employee_id" | "id" | "id_colaborador" | "employee" | "id_employee" => EMPLOYEE_ID,
        "name" | "nombre" | "employee_name" | "full_name" => NAME,
        "work_area" | "area" | "area_trabajo" | "área_trabajo" | "department" => WORK_AREA,
        "job_title" | "cargo" | "title" | "position" | "role" => JOB_TITLE,
        "stress_level" | "stress" | "nivel_estres" | "nivel_estrés" => STRESS_LEVEL,
        "workload_demand" | "workload" | "demand" | "demandas_jornada" => WORKLOAD_DEMAND,
        "job_satisfaction" | "satisfaction" | "satisfaccion_laboral" | "satisfacción_laboral" => {
            JOB_SATISFACTION
        }
        "absence_days" | "absences" | "absenteeism" | "ausentismo_dias" | "ausentismo_días" => {
            ABSENCE_DAYS
        }
        "tenure_months" | "tenure" | "antiguedad_meses" | "antigüedad_meses" => TENURE_MONTHS,
        "age" | "edad" => AGE,
        "gender" | "genero" | "género" | "sex" => GENDER,
        "contract_type" | "contract" | "tipo_contrato" => CONTRACT_TYPE,
        _ => return None,
    };
    Some(canonical)
}

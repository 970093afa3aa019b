//! Critical-symptom detection for chat messages.
//!
//! A fixed, ordered table of condition signatures is scanned against the lower-cased message
//! text. The first keyword found wins, walking conditions in table order and keywords in
//! their listed order. Emergency conditions are declared ahead of the urgent ones, and that
//! order is part of the observable behaviour: when a message mentions several conditions,
//! only the earliest-declared one is reported.

use serde::{Deserialize, Serialize};

/// How quickly a matched condition needs care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Immediately life-threatening.
    Emergency,
    /// Needs prompt, but not immediate, professional evaluation.
    Urgent,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Emergency => "EMERGENCY",
            Severity::Urgent => "URGENT",
        }
    }

    /// Fixed advisory text for this tier.
    pub fn advice(&self) -> &'static str {
        match self {
            Severity::Emergency => EMERGENCY_ADVICE,
            Severity::Urgent => URGENT_ADVICE,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMERGENCY" => Ok(Severity::Emergency),
            "URGENT" => Ok(Severity::Urgent),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

pub const EMERGENCY_ADVICE: &str = "**CALL 911 or seek immediate emergency care. Do not wait. These symptoms require urgent medical attention.**";

pub const URGENT_ADVICE: &str = "**Please consult a healthcare professional as soon as possible. These symptoms require prompt medical evaluation.**";

/// A named set of trigger phrases mapped to a severity tier and warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionSignature {
    pub key: &'static str,
    /// Lower-case phrases matched by substring containment.
    pub keywords: &'static [&'static str],
    pub severity: Severity,
    pub warning: &'static str,
}

/// The condition table, in priority order.
pub static CONDITIONS: &[ConditionSignature] = &[
    // Cardiovascular
    ConditionSignature {
        key: "heartAttack",
        keywords: &[
            "heart attack",
            "myocardial infarction",
            "acute coronary syndrome",
            "chest pain radiating",
            "crushing chest pain",
            "severe chest pressure",
        ],
        severity: Severity::Emergency,
        warning: "🚨 EMERGENCY: Possible heart attack symptoms detected!",
    },
    ConditionSignature {
        key: "stroke",
        keywords: &[
            "stroke",
            "cerebrovascular accident",
            "sudden weakness",
            "face drooping",
            "slurred speech",
            "sudden confusion",
            "sudden numbness",
            "severe sudden headache",
        ],
        severity: Severity::Emergency,
        warning: "🚨 EMERGENCY: Possible stroke symptoms detected!",
    },
    ConditionSignature {
        key: "pulmonaryEmbolism",
        keywords: &[
            "pulmonary embolism",
            "sudden shortness of breath",
            "chest pain with breathing",
            "coughing blood",
            "hemoptysis",
        ],
        severity: Severity::Emergency,
        warning: "🚨 EMERGENCY: Possible pulmonary embolism detected!",
    },
    // Respiratory
    ConditionSignature {
        key: "severeRespiratory",
        keywords: &[
            "difficulty breathing",
            "cannot breathe",
            "severe breathlessness",
            "respiratory distress",
            "gasping for air",
            "blue lips",
            "cyanosis",
        ],
        severity: Severity::Emergency,
        warning: "⚠️ CRITICAL: Severe breathing difficulty detected!",
    },
    // Oncology: serious but not immediate
    ConditionSignature {
        key: "cancer",
        keywords: &[
            "cancer",
            "malignant tumor",
            "carcinoma",
            "lymphoma",
            "leukemia",
            "metastatic",
        ],
        severity: Severity::Urgent,
        warning: "⚠️ SERIOUS: Possible cancer-related symptoms detected!",
    },
    ConditionSignature {
        key: "internalBleeding",
        keywords: &[
            "internal bleeding",
            "vomiting blood",
            "hematemesis",
            "blood in stool",
            "melena",
            "severe abdominal pain",
        ],
        severity: Severity::Emergency,
        warning: "🚨 EMERGENCY: Possible internal bleeding detected!",
    },
    ConditionSignature {
        key: "sepsis",
        keywords: &[
            "sepsis",
            "septic shock",
            "severe infection",
            "rapid heartbeat with fever",
            "confusion with fever",
        ],
        severity: Severity::Emergency,
        warning: "🚨 EMERGENCY: Possible severe infection/sepsis!",
    },
    ConditionSignature {
        key: "anaphylaxis",
        keywords: &[
            "anaphylaxis",
            "anaphylactic shock",
            "severe allergic reaction",
            "throat swelling",
            "difficulty swallowing breathing",
        ],
        severity: Severity::Emergency,
        warning: "🚨 EMERGENCY: Possible severe allergic reaction!",
    },
    // Mental health crisis
    ConditionSignature {
        key: "suicidal",
        keywords: &[
            "suicidal",
            "want to die",
            "end my life",
            "suicide",
            "harm myself",
        ],
        severity: Severity::Emergency,
        warning: "🚨 CRISIS: Suicidal thoughts detected - immediate help needed!",
    },
    ConditionSignature {
        key: "severeTrauma",
        keywords: &[
            "severe injury",
            "major trauma",
            "head injury",
            "loss of consciousness",
            "severe bleeding",
            "broken bones",
        ],
        severity: Severity::Emergency,
        warning: "🚨 EMERGENCY: Severe trauma detected!",
    },
    // Neurological
    ConditionSignature {
        key: "seizure",
        keywords: &["seizure", "convulsion", "epileptic", "uncontrolled shaking"],
        severity: Severity::Emergency,
        warning: "⚠️ CRITICAL: Seizure activity detected!",
    },
    ConditionSignature {
        key: "diabeticEmergency",
        keywords: &[
            "diabetic ketoacidosis",
            "very high blood sugar",
            "severe hypoglycemia",
            "diabetic coma",
        ],
        severity: Severity::Emergency,
        warning: "🚨 EMERGENCY: Diabetic emergency detected!",
    },
    ConditionSignature {
        key: "pregnancyEmergency",
        keywords: &[
            "ectopic pregnancy",
            "severe pregnancy bleeding",
            "pregnancy severe pain",
            "preeclampsia",
            "eclampsia",
        ],
        severity: Severity::Emergency,
        warning: "🚨 EMERGENCY: Pregnancy emergency detected!",
    },
];

/// Outcome of a successful scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub condition: String,
    pub severity: Severity,
    pub warning: String,
    pub matched_keyword: String,
}

/// Looks up a signature by its condition key.
pub fn condition(key: &str) -> Option<&'static ConditionSignature> {
    CONDITIONS.iter().find(|signature| signature.key == key)
}

/// Scans `text` for critical-symptom keywords.
///
/// Returns `None` for empty or whitespace-only input and when nothing matches; neither is an
/// error.
pub fn classify(text: &str) -> Option<Classification> {
    if text.trim().is_empty() {
        return None;
    }

    let lowered = text.to_lowercase();

    CONDITIONS.iter().find_map(|signature| {
        signature
            .keywords
            .iter()
            .find(|keyword| lowered.contains(*keyword))
            .map(|keyword| Classification {
                condition: signature.key.to_string(),
                severity: signature.severity,
                warning: signature.warning.to_string(),
                matched_keyword: (*keyword).to_string(),
            })
    })
}

pub fn is_emergency(result: Option<&Classification>) -> bool {
    matches!(result, Some(c) if c.severity == Severity::Emergency)
}

pub fn is_urgent(result: Option<&Classification>) -> bool {
    matches!(result, Some(c) if c.severity == Severity::Urgent)
}

/// Advisory text for a severity given as its wire string.
///
/// Unknown tiers get an empty string rather than an error.
pub fn advice_for(severity: &str) -> &'static str {
    severity
        .parse::<Severity>()
        .map(|s| s.advice())
        .unwrap_or("")
}

use serde::{Deserialize, Serialize};

// ── Language ─────────────────────────────────────────────────────────────

/// Output locale for every user-facing string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Bn,
    Ta,
    Te,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Hi,
        Language::Bn,
        Language::Ta,
        Language::Te,
    ];

    /// Map an arbitrary language code onto a supported locale.
    /// Anything that is not exactly one of the supported codes resolves to English.
    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or(Language::En)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "hi" => Some(Language::Hi),
            "bn" => Some(Language::Bn),
            "ta" => Some(Language::Ta),
            "te" => Some(Language::Te),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Bn => "bn",
            Language::Ta => "ta",
            Language::Te => "te",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Bn => "Bengali",
            Language::Ta => "Tamil",
            Language::Te => "Telugu",
        }
    }
}

// ── Clauses & risk ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseCategory {
    Indemnification,
    Liability,
    Termination,
    Confidentiality,
    Payment,
    Warranty,
    /// Fallback when nothing else matched.
    General,
}

impl ClauseCategory {
    pub const ALL: [ClauseCategory; 7] = [
        ClauseCategory::Indemnification,
        ClauseCategory::Liability,
        ClauseCategory::Termination,
        ClauseCategory::Confidentiality,
        ClauseCategory::Payment,
        ClauseCategory::Warranty,
        ClauseCategory::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClauseCategory::Indemnification => "indemnification",
            ClauseCategory::Liability => "liability",
            ClauseCategory::Termination => "termination",
            ClauseCategory::Confidentiality => "confidentiality",
            ClauseCategory::Payment => "payment",
            ClauseCategory::Warranty => "warranty",
            ClauseCategory::General => "general",
        }
    }
}

impl std::fmt::Display for ClauseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Fixed numeric weight used by the aggregate risk score.
    pub fn weight(self) -> f64 {
        f64::from(self.weight_tenths()) / 10.0
    }

    /// Weight in tenths, so sums stay exact.
    pub fn weight_tenths(self) -> u32 {
        match self {
            RiskLevel::Low => 3,
            RiskLevel::Medium => 6,
            RiskLevel::High => 9,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Recommendation band for an aggregate risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub const ALL: [RiskBand; 3] = [RiskBand::Low, RiskBand::Moderate, RiskBand::High];

    /// `[0, 0.4)` → low, `[0.4, 0.7)` → moderate, everything above → high.
    pub fn from_score(score: f64) -> Self {
        if score < 0.4 {
            RiskBand::Low
        } else if score < 0.7 {
            RiskBand::Moderate
        } else {
            RiskBand::High
        }
    }
}

// ── Analysis output ──────────────────────────────────────────────────────

/// One detected clause category, rendered in the requested language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseFinding {
    pub category: ClauseCategory,
    pub risk_level: RiskLevel,
    pub localized_description: String,
    pub localized_explanation: String,
}

/// Response body of a single analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub plain_language_summary: String,
    pub findings: Vec<ClauseFinding>,
    /// Mean finding weight, within `[0, 1]`.
    pub risk_score: f64,
    pub recommended_actions: Vec<String>,
}

impl AnalysisResult {
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score)
    }
}

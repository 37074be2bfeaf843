//! Clause keyword table.
//!
//! Phrases are matched as plain substrings of the lowercased document, so a
//! phrase also fires inside longer words ("nda" in "calendar", "fee" in
//! "coffee"). Detection never depends on the requested output language:
//! every locale's phrases are tested for every document.

use std::sync::LazyLock;

use crate::types::{ClauseCategory, Language, RiskLevel};

/// One detectable clause category.
#[derive(Debug, Clone)]
pub struct ClauseRule {
    pub category: ClauseCategory,
    pub risk_level: RiskLevel,
    pub phrases: Vec<(Language, &'static [&'static str])>,
}

impl ClauseRule {
    /// First phrase found in `haystack`, which must already be lowercased.
    pub fn first_match(&self, haystack: &str) -> Option<&'static str> {
        self.phrases
            .iter()
            .flat_map(|(_, phrases)| phrases.iter())
            .find(|phrase| haystack.contains(*phrase))
            .copied()
    }

    pub fn phrases_for(&self, lang: Language) -> &'static [&'static str] {
        self.phrases
            .iter()
            .find(|(l, _)| *l == lang)
            .map(|(_, p)| *p)
            .unwrap_or(&[])
    }
}

/// Ordered rule table; findings are reported in this order.
#[derive(Debug, Clone)]
pub struct ClauseCatalog {
    rules: Vec<ClauseRule>,
}

static BUILTIN: LazyLock<ClauseCatalog> = LazyLock::new(ClauseCatalog::build_builtin);

impl ClauseCatalog {
    pub fn builtin() -> &'static ClauseCatalog {
        &BUILTIN
    }

    /// Build a catalog from explicit rules. Phrases must be lowercase.
    /// Rules for `General` are dropped; it is only ever the fallback.
    pub fn new(rules: Vec<ClauseRule>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .filter(|r| r.category != ClauseCategory::General)
                .collect(),
        }
    }

    pub fn rules(&self) -> &[ClauseRule] {
        &self.rules
    }

    pub fn rule(&self, category: ClauseCategory) -> Option<&ClauseRule> {
        self.rules.iter().find(|r| r.category == category)
    }

    /// Fixed risk level for a category. `General` and unknown categories are low.
    pub fn risk_level(&self, category: ClauseCategory) -> RiskLevel {
        self.rule(category)
            .map(|r| r.risk_level)
            .unwrap_or(RiskLevel::Low)
    }

    fn build_builtin() -> Self {
        Self::new(
            BUILTIN_RULES
                .iter()
                .map(|(category, risk_level, rows)| ClauseRule {
                    category: *category,
                    risk_level: *risk_level,
                    phrases: rows.to_vec(),
                })
                .collect(),
        )
    }
}

type PhraseRow = (Language, &'static [&'static str]);

const BUILTIN_RULES: &[(ClauseCategory, RiskLevel, &[PhraseRow])] = &[
    (
        ClauseCategory::Indemnification,
        RiskLevel::Medium,
        &[
            (Language::En, &["indemnify", "indemnification", "hold harmless"]),
            (Language::Bn, &["ক্ষতিপূরণ"]),
            (Language::Hi, &["क्षतिपूर्ति"]),
            (Language::Ta, &["இழப்பீடு"]),
            (Language::Te, &["పరిహారం"]),
        ],
    ),
    (
        ClauseCategory::Liability,
        RiskLevel::Medium,
        &[
            (Language::En, &["liability", "liable", "damages", "compensate"]),
            (Language::Bn, &["দায়"]),
            (Language::Hi, &["दायित्व"]),
            (Language::Ta, &["பொறுப்பு"]),
            (Language::Te, &["బాధ్యత"]),
        ],
    ),
    (
        ClauseCategory::Termination,
        RiskLevel::Low,
        &[
            (Language::En, &["terminate", "termination", "expire", "cancel"]),
            (Language::Bn, &["সমাপ্তি"]),
            (Language::Hi, &["समाप्ति"]),
            (Language::Ta, &["முடிவு"]),
            (Language::Te, &["ముగింపు"]),
        ],
    ),
    (
        ClauseCategory::Confidentiality,
        RiskLevel::Medium,
        &[
            (Language::En, &["confidential", "non-disclosure", "nda", "secret"]),
            (Language::Bn, &["গোপনীয়"]),
            (Language::Hi, &["गोपनीय"]),
            (Language::Ta, &["ரகசிய"]),
            (Language::Te, &["గోప్య"]),
        ],
    ),
    (
        ClauseCategory::Payment,
        RiskLevel::Low,
        &[
            (Language::En, &["payment", "fee", "compensation", "price"]),
            (Language::Bn, &["পেমেন্ট"]),
            (Language::Hi, &["भुगतान"]),
            (Language::Ta, &["கட்டணம்"]),
            (Language::Te, &["చెల్లింపు"]),
        ],
    ),
    (
        ClauseCategory::Warranty,
        RiskLevel::Low,
        &[
            (Language::En, &["warranty", "guarantee", "warrant"]),
            (Language::Bn, &["ওয়ারেন্টি"]),
            (Language::Hi, &["वारंटी"]),
            (Language::Ta, &["உத்தரவாதம்"]),
            (Language::Te, &["వారంటీ"]),
        ],
    ),
];

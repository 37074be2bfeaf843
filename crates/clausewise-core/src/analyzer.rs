//! Clause detection and risk scoring.

use tracing::debug;

use crate::catalog::ClauseCatalog;
use crate::locale::{LocalizationTable, TextKey};
use crate::types::{AnalysisResult, ClauseCategory, ClauseFinding, Language, RiskBand, RiskLevel};

/// Score used when there is nothing to average.
pub const DEFAULT_RISK_SCORE: f64 = 0.3;

/// Keyword-based clause analyzer. Infallible: every input yields a complete result.
#[derive(Debug, Clone, Copy)]
pub struct ClauseAnalyzer<'a> {
    catalog: &'a ClauseCatalog,
    locale: &'a LocalizationTable,
}

impl Default for ClauseAnalyzer<'static> {
    fn default() -> Self {
        Self::new(ClauseCatalog::builtin(), LocalizationTable::builtin())
    }
}

impl<'a> ClauseAnalyzer<'a> {
    pub fn new(catalog: &'a ClauseCatalog, locale: &'a LocalizationTable) -> Self {
        Self { catalog, locale }
    }

    /// Analyze `text` and render the result in `language` (any code; unknown codes render English).
    pub fn analyze(&self, text: &str, summary: &str, language: &str) -> AnalysisResult {
        self.analyze_in(text, summary, Language::resolve(language))
    }

    pub fn analyze_in(&self, text: &str, summary: &str, lang: Language) -> AnalysisResult {
        let findings = self.detect(text, lang);
        let risk_score = risk_score(&findings);
        let recommended_actions = self.recommendations(risk_score, lang);

        debug!(
            language = lang.code(),
            findings = findings.len(),
            risk_score,
            "clause analysis complete"
        );

        AnalysisResult {
            summary: summary.to_string(),
            plain_language_summary: self.plain_language(summary, lang),
            findings,
            risk_score,
            recommended_actions,
        }
    }

    /// One finding per matched category in catalog order, or a single `general` finding.
    pub fn detect(&self, text: &str, lang: Language) -> Vec<ClauseFinding> {
        let normalized = text.to_lowercase();
        let mut findings: Vec<ClauseFinding> = self
            .catalog
            .rules()
            .iter()
            .filter_map(|rule| {
                let phrase = rule.first_match(&normalized)?;
                debug!(category = %rule.category, phrase, "clause matched");
                Some(self.finding(rule.category, rule.risk_level, lang))
            })
            .collect();

        if findings.is_empty() {
            findings.push(self.finding(ClauseCategory::General, RiskLevel::Low, lang));
        }
        findings
    }

    pub fn finding(&self, category: ClauseCategory, risk_level: RiskLevel, lang: Language) -> ClauseFinding {
        ClauseFinding {
            category,
            risk_level,
            localized_description: self.locale.text(TextKey::Description(category), lang).to_string(),
            localized_explanation: format!(
                "{}: {}",
                self.locale.text(TextKey::RiskLabel(risk_level), lang),
                self.locale.text(TextKey::Explanation(category), lang)
            ),
        }
    }

    pub fn recommendations(&self, risk_score: f64, lang: Language) -> Vec<String> {
        self.locale.recommendations(RiskBand::from_score(risk_score), lang)
    }

    pub fn plain_language(&self, summary: &str, lang: Language) -> String {
        format!("{}: {summary}", self.locale.text(TextKey::PlainLanguageLead, lang))
    }
}

/// Mean of the findings' risk weights, capped at 1.0.
///
/// Summed in integer tenths and divided once, so a uniform set of findings
/// scores exactly its weight (three low findings give 0.3, not 0.29999...).
pub fn risk_score(findings: &[ClauseFinding]) -> f64 {
    if findings.is_empty() {
        return DEFAULT_RISK_SCORE;
    }
    let tenths: u64 = findings
        .iter()
        .map(|f| u64::from(f.risk_level.weight_tenths()))
        .sum();
    (tenths as f64 / (10 * findings.len()) as f64).min(1.0)
}

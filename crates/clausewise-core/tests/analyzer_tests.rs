use clausewise_core::analyzer::{risk_score, ClauseAnalyzer};
use clausewise_core::locale::{LocalizationTable, TextKey};
use clausewise_core::{ClauseCategory, ClauseFinding, Language, RiskBand, RiskLevel};

const EN_LOW: [&str; 3] = [
    "Review the document carefully",
    "Ensure you understand all obligations",
    "Clarify ambiguous terms",
];

const HI_MODERATE: [&str; 3] = [
    "कानूनी सलाह लेने पर विचार करें",
    "प्रतिकूल शर्तों पर बातचीत करें",
    "विशिष्ट खंडों पर स्पष्टीकरण माँगें",
];

fn is_devanagari(s: &str) -> bool {
    s.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn test_termination_notice_is_single_low_finding() {
    let text = "This agreement may be terminated by either party with 30 days notice.";
    let result = ClauseAnalyzer::default().analyze(text, "A short summary.", "en");

    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].category, ClauseCategory::Termination);
    assert_eq!(result.findings[0].risk_level, RiskLevel::Low);
    assert!((result.risk_score - 0.3).abs() < 1e-9);
    assert_eq!(result.risk_band(), RiskBand::Low);
    assert_eq!(result.recommended_actions, EN_LOW);
    assert_eq!(result.summary, "A short summary.");
    assert_eq!(result.plain_language_summary, "In simple terms: A short summary.");
}

#[test]
fn test_indemnity_and_liability_in_hindi() {
    let text = "The Contractor shall indemnify and hold harmless the Client. \
                The Contractor is liable for damages caused by its staff.";
    let result = ClauseAnalyzer::default().analyze(text, "सारांश", "hi");

    let categories: Vec<ClauseCategory> = result.findings.iter().map(|f| f.category).collect();
    assert_eq!(
        categories,
        vec![ClauseCategory::Indemnification, ClauseCategory::Liability]
    );
    for finding in &result.findings {
        assert_eq!(finding.risk_level, RiskLevel::Medium);
        assert!(is_devanagari(&finding.localized_description));
        assert!(is_devanagari(&finding.localized_explanation));
        assert!(finding.localized_explanation.starts_with("मध्यम जोखिम: "));
    }
    assert!((result.risk_score - 0.6).abs() < 1e-9);
    assert_eq!(result.risk_band(), RiskBand::Moderate);
    assert_eq!(result.recommended_actions, HI_MODERATE);
    assert_eq!(result.plain_language_summary, "सरल शब्दों में: सारांश");
}

// =============================================================================
// Category exclusivity and ordering
// =============================================================================

#[test]
fn test_two_categories_no_duplicates_no_general() {
    let text = "Tenant shall indemnify Landlord. Landlord may terminate; termination is final. \
                Tenant shall indemnify again.";
    let findings = ClauseAnalyzer::default().detect(text, Language::En);
    let categories: Vec<ClauseCategory> = findings.iter().map(|f| f.category).collect();
    assert_eq!(
        categories,
        vec![ClauseCategory::Indemnification, ClauseCategory::Termination]
    );
}

#[test]
fn test_order_follows_catalog_not_text_position() {
    let text = "A warranty is given. Payment is due monthly. Either side may cancel.";
    let findings = ClauseAnalyzer::default().detect(text, Language::En);
    let categories: Vec<ClauseCategory> = findings.iter().map(|f| f.category).collect();
    assert_eq!(
        categories,
        vec![
            ClauseCategory::Termination,
            ClauseCategory::Payment,
            ClauseCategory::Warranty
        ]
    );
}

#[test]
fn test_general_only_when_nothing_matches() {
    let result = ClauseAnalyzer::default().analyze("The parties met on Tuesday.", "s", "en");
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].category, ClauseCategory::General);
    assert_eq!(
        result.findings[0].localized_explanation,
        "Low risk: Standard legal language that should still be reviewed carefully."
    );
    assert!((result.risk_score - 0.3).abs() < 1e-9);
}

#[test]
fn test_non_english_keywords_detected_regardless_of_output_language() {
    let text = "किरायेदार को समय पर भुगतान करना होगा।";
    let findings = ClauseAnalyzer::default().detect(text, Language::En);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, ClauseCategory::Payment);
    assert_eq!(
        findings[0].localized_description,
        "This clause sets out what must be paid, how much and when."
    );
}

#[test]
fn test_substring_matching_is_preserved() {
    // "nda" inside "calendar" still counts as a confidentiality hit.
    let findings = ClauseAnalyzer::default().detect("Check the calendar.", Language::En);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, ClauseCategory::Confidentiality);
}

// =============================================================================
// Risk score
// =============================================================================

#[test]
fn test_score_is_mean_and_within_bounds() {
    let text = "confidential information; payment of the fee; warranty; indemnify; liable";
    let result = ClauseAnalyzer::default().analyze(text, "s", "en");
    let mean: f64 = result
        .findings
        .iter()
        .map(|f| f.risk_level.weight())
        .sum::<f64>()
        / result.findings.len() as f64;
    assert!((result.risk_score - mean).abs() < 1e-9);
    assert!(result.risk_score >= 0.3 && result.risk_score <= 1.0);
}

#[test]
fn test_score_of_all_weight_combinations_stays_bounded() {
    let levels = RiskLevel::ALL;
    for a in levels {
        for b in levels {
            for c in levels {
                let findings: Vec<ClauseFinding> = [a, b, c]
                    .into_iter()
                    .map(|level| ClauseFinding {
                        category: ClauseCategory::General,
                        risk_level: level,
                        localized_description: String::new(),
                        localized_explanation: String::new(),
                    })
                    .collect();
                let score = risk_score(&findings);
                assert!((0.3..=1.0).contains(&score), "{score}");
            }
        }
    }
}

// =============================================================================
// Recommendation banding
// =============================================================================

#[test]
fn test_band_boundaries_select_triads() {
    let analyzer = ClauseAnalyzer::default();
    let table = LocalizationTable::builtin();
    assert_eq!(
        analyzer.recommendations(0.39, Language::En),
        table.recommendations(RiskBand::Low, Language::En)
    );
    assert_eq!(
        analyzer.recommendations(0.4, Language::En),
        table.recommendations(RiskBand::Moderate, Language::En)
    );
    assert_eq!(
        analyzer.recommendations(0.7, Language::En),
        table.recommendations(RiskBand::High, Language::En)
    );
    assert_eq!(
        analyzer.recommendations(1.0, Language::En),
        table.recommendations(RiskBand::High, Language::En)
    );
}

// =============================================================================
// Locale fallback
// =============================================================================

#[test]
fn test_unsupported_language_renders_english() {
    let text = "Confidential. The supplier shall indemnify the buyer.";
    let en = ClauseAnalyzer::default().analyze(text, "sum", "en");
    for code in ["fr", "es", "english", "xx", ""] {
        let other = ClauseAnalyzer::default().analyze(text, "sum", code);
        assert_eq!(other, en, "language {code:?}");
    }
}

#[test]
fn test_every_language_renders_every_category() {
    let analyzer = ClauseAnalyzer::default();
    let table = LocalizationTable::builtin();
    for lang in Language::ALL {
        for category in ClauseCategory::ALL {
            let f = analyzer.finding(category, RiskLevel::Medium, lang);
            assert_eq!(
                f.localized_description,
                table.text(TextKey::Description(category), lang)
            );
            assert!(f
                .localized_explanation
                .ends_with(table.text(TextKey::Explanation(category), lang)));
        }
    }
}

#[test]
fn test_result_serializes_with_expected_fields() {
    let result = ClauseAnalyzer::default().analyze("terminate", "s", "en");
    let v = serde_json::to_value(&result).unwrap();
    let obj = v.as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "findings",
            "plain_language_summary",
            "recommended_actions",
            "risk_score",
            "summary"
        ]
    );
    assert_eq!(v["findings"][0]["category"], "termination");
    assert_eq!(v["findings"][0]["risk_level"], "low");
    assert!(v["findings"][0]["localized_description"].is_string());
    assert!(v["findings"][0]["localized_explanation"].is_string());
}

//! Localized user-facing text.
//!
//! Every concept carries an English default, so a lookup for any language
//! (supported or not) always produces a non-empty string.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::{ClauseCategory, Language, RiskBand, RiskLevel};

/// A translatable concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Description(ClauseCategory),
    Explanation(ClauseCategory),
    /// Prefix of a finding's explanation ("Medium risk").
    RiskLabel(RiskLevel),
    /// Lead-in of the plain-language summary ("In simple terms").
    PlainLanguageLead,
    /// Deterministic summary used when remote summarization is unavailable.
    PlaceholderSummary,
    /// Instruction prefix sent to the remote summarizer.
    SummaryPrompt,
}

/// English default plus per-language overrides.
#[derive(Debug, Clone)]
pub struct Localized<T> {
    default: T,
    overrides: HashMap<Language, T>,
}

impl<T: Copy> Localized<T> {
    pub fn new(default: T) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    pub fn with(mut self, lang: Language, value: T) -> Self {
        if lang == Language::En {
            self.default = value;
        } else {
            self.overrides.insert(lang, value);
        }
        self
    }

    pub fn get(&self, lang: Language) -> T {
        self.overrides.get(&lang).copied().unwrap_or(self.default)
    }

    /// Build from a row ordered like [`Language::ALL`].
    fn from_row(row: [T; 5]) -> Self {
        let mut localized = Self::new(row[0]);
        for (lang, value) in Language::ALL.into_iter().zip(row).skip(1) {
            localized.overrides.insert(lang, value);
        }
        localized
    }
}

pub type Triad = [&'static str; 3];

/// Immutable lookup of every localized string the analyzer renders.
#[derive(Debug, Clone)]
pub struct LocalizationTable {
    texts: HashMap<TextKey, Localized<&'static str>>,
    recommendations: HashMap<RiskBand, Localized<Triad>>,
}

static BUILTIN: LazyLock<LocalizationTable> = LazyLock::new(LocalizationTable::build_builtin);

impl LocalizationTable {
    /// The process-wide table, built on first use.
    pub fn builtin() -> &'static LocalizationTable {
        &BUILTIN
    }

    pub fn empty() -> Self {
        Self {
            texts: HashMap::new(),
            recommendations: HashMap::new(),
        }
    }

    pub fn insert_text(&mut self, key: TextKey, value: Localized<&'static str>) {
        self.texts.insert(key, value);
    }

    pub fn insert_recommendations(&mut self, band: RiskBand, value: Localized<Triad>) {
        self.recommendations.insert(band, value);
    }

    /// Localized text for `key`, English when `lang` has no entry.
    pub fn text(&self, key: TextKey, lang: Language) -> &'static str {
        match self.texts.get(&key) {
            Some(localized) => localized.get(lang),
            None => {
                tracing::warn!(?key, "no localized text registered");
                ""
            }
        }
    }

    /// Text for `key` in the given language code, resolving unknown codes to English.
    pub fn text_for_code(&self, key: TextKey, code: &str) -> &'static str {
        self.text(key, Language::resolve(code))
    }

    pub fn recommendations(&self, band: RiskBand, lang: Language) -> Vec<String> {
        match self.recommendations.get(&band) {
            Some(localized) => localized.get(lang).iter().map(|s| s.to_string()).collect(),
            None => {
                tracing::warn!(?band, "no recommendations registered");
                Vec::new()
            }
        }
    }

    /// Every key the analyzer and summarizers may ask for.
    pub fn required_keys() -> Vec<TextKey> {
        let mut keys = Vec::new();
        for category in ClauseCategory::ALL {
            keys.push(TextKey::Description(category));
            keys.push(TextKey::Explanation(category));
        }
        for level in RiskLevel::ALL {
            keys.push(TextKey::RiskLabel(level));
        }
        keys.push(TextKey::PlainLanguageLead);
        keys.push(TextKey::PlaceholderSummary);
        keys.push(TextKey::SummaryPrompt);
        keys
    }

    /// Keys (or bands) with no entry at all.
    pub fn missing(&self) -> Vec<String> {
        let mut missing: Vec<String> = Self::required_keys()
            .into_iter()
            .filter(|k| !self.texts.contains_key(k))
            .map(|k| format!("{k:?}"))
            .collect();
        for band in RiskBand::ALL {
            if !self.recommendations.contains_key(&band) {
                missing.push(format!("Recommendations({band:?})"));
            }
        }
        missing
    }

    fn build_builtin() -> Self {
        let mut table = Self::empty();
        for (category, row) in DESCRIPTIONS {
            table.insert_text(TextKey::Description(*category), Localized::from_row(*row));
        }
        for (category, row) in EXPLANATIONS {
            table.insert_text(TextKey::Explanation(*category), Localized::from_row(*row));
        }
        for (level, row) in RISK_LABELS {
            table.insert_text(TextKey::RiskLabel(*level), Localized::from_row(*row));
        }
        table.insert_text(TextKey::PlainLanguageLead, Localized::from_row(PLAIN_LANGUAGE_LEAD));
        table.insert_text(TextKey::PlaceholderSummary, Localized::from_row(PLACEHOLDER_SUMMARY));
        table.insert_text(TextKey::SummaryPrompt, Localized::from_row(SUMMARY_PROMPT));
        for (band, row) in RECOMMENDATIONS {
            table.insert_recommendations(*band, Localized::from_row(*row));
        }
        let missing = table.missing();
        if !missing.is_empty() {
            tracing::error!(?missing, "built-in localization table is incomplete");
        }
        table
    }
}

// ── Built-in text (rows ordered en, hi, bn, ta, te) ──────────────────────

const DESCRIPTIONS: &[(ClauseCategory, [&str; 5])] = &[
    (
        ClauseCategory::Indemnification,
        [
            "This clause requires one party to compensate the other for losses or damages.",
            "यह खंड एक पक्ष को नुकसान या क्षति के लिए दूसरे पक्ष को मुआवजा देने की आवश्यकता है।",
            "এই ধারাটি অন্য পক্ষকে ক্ষতি বা ক্ষতিপূরণের জন্য ক্ষতিপূরণ দিতে বলে।",
            "இந்த விதி, இழப்புகள் அல்லது சேதங்களுக்கு ஒரு தரப்பு மற்ற தரப்புக்கு ஈடுசெய்ய வேண்டும்.",
            "ఈ నిబంధన ఒక పక్షాన్ని నష్టాల కోసం మరొక పక్షానికి పరిహారం చెల్లించడానికి చెప్పిస్తుంది.",
        ],
    ),
    (
        ClauseCategory::Liability,
        [
            "This clause defines who is responsible for losses or harm and how much they may have to pay.",
            "यह खंड तय करता है कि नुकसान या क्षति के लिए कौन जिम्मेदार है और उसे कितना भुगतान करना पड़ सकता है।",
            "এই ধারাটি নির্ধারণ করে যে ক্ষতির জন্য কে দায়ী এবং তাকে কতটা অর্থ দিতে হতে পারে।",
            "இழப்புகள் அல்லது சேதங்களுக்கு யார் பொறுப்பு, எவ்வளவு செலுத்த வேண்டும் என்பதை இந்த விதி வரையறுக்கிறது.",
            "నష్టాలకు ఎవరు బాధ్యులు, వారు ఎంత చెల్లించాల్సి రావచ్చు అనే విషయాన్ని ఈ నిబంధన నిర్ణయిస్తుంది.",
        ],
    ),
    (
        ClauseCategory::Termination,
        [
            "This clause explains how and when the agreement can be ended.",
            "यह खंड बताता है कि समझौता कैसे और कब समाप्त किया जा सकता है।",
            "এই ধারাটি ব্যাখ্যা করে কীভাবে এবং কখন চুক্তিটি শেষ করা যায়।",
            "ஒப்பந்தத்தை எப்படி, எப்போது முடிவுக்குக் கொண்டு வரலாம் என்பதை இந்த விதி விளக்குகிறது.",
            "ఒప్పందాన్ని ఎలా, ఎప్పుడు ముగించవచ్చో ఈ నిబంధన వివరిస్తుంది.",
        ],
    ),
    (
        ClauseCategory::Confidentiality,
        [
            "This clause restricts what information you may share with others.",
            "यह खंड सीमित करता है कि आप कौन-सी जानकारी दूसरों के साथ साझा कर सकते हैं।",
            "এই ধারাটি সীমাবদ্ধ করে আপনি কোন তথ্য অন্যদের সাথে ভাগ করতে পারবেন।",
            "நீங்கள் மற்றவர்களுடன் எந்தத் தகவலைப் பகிரலாம் என்பதை இந்த விதி கட்டுப்படுத்துகிறது.",
            "మీరు ఇతరులతో ఏ సమాచారాన్ని పంచుకోవచ్చో ఈ నిబంధన పరిమితం చేస్తుంది.",
        ],
    ),
    (
        ClauseCategory::Payment,
        [
            "This clause sets out what must be paid, how much and when.",
            "यह खंड बताता है कि क्या भुगतान करना है, कितना और कब।",
            "এই ধারাটি নির্ধারণ করে কী পরিশোধ করতে হবে, কত এবং কখন।",
            "என்ன செலுத்த வேண்டும், எவ்வளவு, எப்போது என்பதை இந்த விதி குறிப்பிடுகிறது.",
            "ఏమి చెల్లించాలి, ఎంత, ఎప్పుడు అనే విషయాలను ఈ నిబంధన తెలియజేస్తుంది.",
        ],
    ),
    (
        ClauseCategory::Warranty,
        [
            "This clause contains promises about the quality or condition of goods or services.",
            "इस खंड में वस्तुओं या सेवाओं की गुणवत्ता या स्थिति के बारे में वादे शामिल हैं।",
            "এই ধারায় পণ্য বা পরিষেবার মান বা অবস্থা সম্পর্কে প্রতিশ্রুতি রয়েছে।",
            "பொருட்கள் அல்லது சேவைகளின் தரம் அல்லது நிலை பற்றிய வாக்குறுதிகள் இந்த விதியில் உள்ளன.",
            "వస్తువులు లేదా సేవల నాణ్యత లేదా స్థితి గురించి హామీలు ఈ నిబంధనలో ఉన్నాయి.",
        ],
    ),
    (
        ClauseCategory::General,
        [
            "This appears to be a standard legal agreement.",
            "यह एक मानक कानूनी समझौता प्रतीत होता है।",
            "এটি একটি মানক আইনী চুক্তি বলে মনে হচ্ছে।",
            "இது ஒரு நிலையான சட்ட ஒப்பந்தம் போல் தெரிகிறது.",
            "ఇది ఒక ప్రామాణిక చట్టపరమైన ఒప్పందం.",
        ],
    ),
];

const EXPLANATIONS: &[(ClauseCategory, [&str; 5])] = &[
    (
        ClauseCategory::Indemnification,
        [
            "Can create significant financial obligations if things go wrong.",
            "यदि कुछ गलत होता है तो महत्वपूर्ण वित्तीय दायित्व बन सकता है।",
            "যদি কিছু ভুল হয় তবে উল্লেখযোগ্য আর্থিক বাধ্যবাধকতা তৈরি করতে পারে।",
            "விஷயங்கள் தவறாக நடந்தால் கணிசமான நிதி கடமைகளை உருவாக்கும்.",
            "విషయాలు తప్పుగా జరిగితే గణనీయమైన ఆర్థిక బాధ్యతలు ఏర్పడతాయి.",
        ],
    ),
    (
        ClauseCategory::Liability,
        [
            "Could leave you paying for losses, sometimes without an upper limit.",
            "आपको नुकसान की भरपाई करनी पड़ सकती है, कभी-कभी बिना किसी ऊपरी सीमा के।",
            "আপনাকে ক্ষতির দায় বহন করতে হতে পারে, কখনও কখনও কোনো ঊর্ধ্বসীমা ছাড়াই।",
            "இழப்புகளுக்கு நீங்கள் பணம் செலுத்த நேரிடலாம், சில நேரங்களில் உச்சவரம்பு இல்லாமல்.",
            "మీరు నష్టాలకు చెల్లించాల్సి రావచ్చు, కొన్నిసార్లు గరిష్ఠ పరిమితి లేకుండా.",
        ],
    ),
    (
        ClauseCategory::Termination,
        [
            "Check the notice period and what happens to your rights when the agreement ends.",
            "नोटिस अवधि और समझौता समाप्त होने पर आपके अधिकारों का क्या होता है, इसकी जाँच करें।",
            "নোটিশের মেয়াদ এবং চুক্তি শেষ হলে আপনার অধিকারের কী হয় তা যাচাই করুন।",
            "அறிவிப்புக் காலத்தையும் ஒப்பந்தம் முடிந்தால் உங்கள் உரிமைகளுக்கு என்ன ஆகும் என்பதையும் சரிபார்க்கவும்.",
            "నోటీసు వ్యవధిని, ఒప్పందం ముగిసినప్పుడు మీ హక్కులకు ఏమవుతుందో తనిఖీ చేయండి.",
        ],
    ),
    (
        ClauseCategory::Confidentiality,
        [
            "Breaking these obligations can lead to legal claims, even after the agreement ends.",
            "इन शर्तों का उल्लंघन करने पर कानूनी दावे हो सकते हैं, समझौता समाप्त होने के बाद भी।",
            "এই বাধ্যবাধকতা ভঙ্গ করলে চুক্তি শেষ হওয়ার পরেও আইনি দাবি হতে পারে।",
            "இந்தக் கடமைகளை மீறினால், ஒப்பந்தம் முடிந்த பிறகும் சட்ட நடவடிக்கை எடுக்கப்படலாம்.",
            "ఈ నిబంధనలను ఉల్లంఘిస్తే, ఒప్పందం ముగిసిన తర్వాత కూడా చట్టపరమైన దావాలు రావచ్చు.",
        ],
    ),
    (
        ClauseCategory::Payment,
        [
            "Confirm the amounts, due dates and any penalties for late payment.",
            "राशि, देय तिथियों और देर से भुगतान पर लगने वाले किसी भी दंड की पुष्टि करें।",
            "পরিমাণ, নির্ধারিত তারিখ এবং দেরিতে পরিশোধের জরিমানা নিশ্চিত করুন।",
            "தொகைகள், செலுத்த வேண்டிய தேதிகள் மற்றும் தாமதக் கட்டணங்களை உறுதிப்படுத்தவும்.",
            "మొత్తాలు, గడువు తేదీలు, ఆలస్య చెల్లింపు జరిమానాలను నిర్ధారించుకోండి.",
        ],
    ),
    (
        ClauseCategory::Warranty,
        [
            "Check what is promised, for how long, and what remedies you have if it fails.",
            "क्या वादा किया गया है, कितने समय के लिए, और विफल होने पर आपके पास क्या उपाय हैं, इसकी जाँच करें।",
            "কী প্রতিশ্রুতি দেওয়া হয়েছে, কতদিনের জন্য এবং ব্যর্থ হলে আপনার কী প্রতিকার আছে তা যাচাই করুন।",
            "என்ன உறுதியளிக்கப்பட்டுள்ளது, எவ்வளவு காலத்திற்கு, தோல்வியடைந்தால் உங்களுக்கு என்ன தீர்வுகள் உள்ளன என்பதைச் சரிபார்க்கவும்.",
            "ఏమి హామీ ఇవ్వబడింది, ఎంత కాలం, విఫలమైతే మీకు ఉన్న పరిష్కారాలు ఏమిటో తనిఖీ చేయండి.",
        ],
    ),
    (
        ClauseCategory::General,
        [
            "Standard legal language that should still be reviewed carefully.",
            "मानक कानूनी भाषा शामिल है जिसकी सावधानीपूर्वक समीक्षा की जानी चाहिए।",
            "মানক আইনী ভাষা রয়েছে যা সাবধানে পর্যালোচনা করা উচিত।",
            "நிலையான சட்ட மொழி, கவனமாக மதிப்பாய்வு செய்யப்பட வேண்டும்.",
            "ప్రామాణిక చట్టపరమైన భాష, జాగ్రత్తగా సమీక్షించాలి.",
        ],
    ),
];

const RISK_LABELS: &[(RiskLevel, [&str; 5])] = &[
    (
        RiskLevel::Low,
        ["Low risk", "कम जोखिम", "কম ঝুঁকি", "குறைந்த ஆபத்து", "తక్కువ ప్రమాదం"],
    ),
    (
        RiskLevel::Medium,
        ["Medium risk", "मध्यम जोखिम", "মাঝারি ঝুঁকি", "நடுத்தர ஆபத்து", "మధ్యస్థ ప్రమాదం"],
    ),
    (
        RiskLevel::High,
        ["High risk", "उच्च जोखिम", "উচ্চ ঝুঁকি", "அதிக ஆபத்து", "అధిక ప్రమాదం"],
    ),
];

const PLAIN_LANGUAGE_LEAD: [&str; 5] = [
    "In simple terms",
    "सरल शब्दों में",
    "সহজভাবে বললে",
    "எளிதான முறையில்",
    "సరళమైన పదాలలో",
];

const PLACEHOLDER_SUMMARY: [&str; 5] = [
    "Automatic summary unavailable: the legal document could not be summarized at this time.",
    "स्वचालित सारांश उपलब्ध नहीं: इस समय कानूनी दस्तावेज़ का सारांश नहीं बनाया जा सका।",
    "স্বয়ংক্রিয় সারাংশ পাওয়া যায়নি: এই মুহূর্তে আইনী দলিলের সারাংশ তৈরি করা যায়নি।",
    "தானியங்கு சுருக்கம் கிடைக்கவில்லை: இப்போது சட்ட ஆவணத்தைச் சுருக்க முடியவில்லை.",
    "స్వయంచాలక సారాంశం అందుబాటులో లేదు: ప్రస్తుతం చట్టపరమైన పత్రాన్ని సంగ్రహించలేకపోయాము.",
];

const SUMMARY_PROMPT: [&str; 5] = [
    "Summarize this legal document in simple, plain English",
    "इस कानूनी दस्तावेज़ को सरल, स्पष्ट हिंदी में संक्षेप में प्रस्तुत करें",
    "এই আইনী দলিলটি সরল, স্পষ্ট বাংলায় সংক্ষিপ্ত করুন",
    "இந்த சட்ட ஆவணத்தை எளிய, தெளிவான தமிழில் சுருக்கவும்",
    "ఈ చట్టపరమైన పత్రాన్ని సరళమైన, స్పష్టమైన తెలుగులో సంగ్రహించండి",
];

const RECOMMENDATIONS: &[(RiskBand, [Triad; 5])] = &[
    (
        RiskBand::Low,
        [
            [
                "Review the document carefully",
                "Ensure you understand all obligations",
                "Clarify ambiguous terms",
            ],
            [
                "दस्तावेज़ की सावधानीपूर्वक समीक्षा करें",
                "सुनिश्चित करें कि आप सभी दायित्वों को समझते हैं",
                "अस्पष्ट शर्तों को स्पष्ट करें",
            ],
            [
                "দলিলটি সাবধানে পর্যালোচনা করুন",
                "সমস্ত দায়িত্ব বোঝা নিশ্চিত করুন",
                "অস্পষ্ট শর্ত স্পষ্ট করুন",
            ],
            [
                "ஆவணத்தை கவனமாக மதிப்பாய்வு செய்யவும்",
                "அனைத்து கடமைகளையும் நீங்கள் புரிந்துகொண்டுள்ளீர்கள் என்பதை உறுதிப்படுத்தவும்",
                "தெளிவற்ற விதிமுறைகளைத் தெளிவுபடுத்தவும்",
            ],
            [
                "పత్రాన్ని జాగ్రత్తగా సమీక్షించండి",
                "అన్ని బాధ్యతలను మీరు అర్థం చేసుకున్నారని నిర్ధారించుకోండి",
                "అస్పష్టమైన నిబంధనలను స్పష్టం చేసుకోండి",
            ],
        ],
    ),
    (
        RiskBand::Moderate,
        [
            [
                "Consider seeking legal advice",
                "Negotiate unfavorable terms",
                "Request clarification on specific clauses",
            ],
            [
                "कानूनी सलाह लेने पर विचार करें",
                "प्रतिकूल शर्तों पर बातचीत करें",
                "विशिष्ट खंडों पर स्पष्टीकरण माँगें",
            ],
            [
                "আইনি পরামর্শ নেওয়ার কথা বিবেচনা করুন",
                "অপ্রিয় শর্ত নিয়ে আলোচনা করুন",
                "নির্দিষ্ট ধারাগুলি স্পষ্ট করুন",
            ],
            [
                "சட்ட ஆலோசனை பெறுவதைப் பரிசீலிக்கவும்",
                "சாதகமற்ற விதிமுறைகளைப் பேச்சுவார்த்தை செய்யவும்",
                "குறிப்பிட்ட விதிகள் குறித்து விளக்கம் கேட்கவும்",
            ],
            [
                "న్యాయ సలహా తీసుకోవడాన్ని పరిగణించండి",
                "అననుకూల నిబంధనలపై చర్చించండి",
                "నిర్దిష్ట నిబంధనలపై వివరణ కోరండి",
            ],
        ],
    ),
    (
        RiskBand::High,
        [
            [
                "Strongly recommend consulting a lawyer",
                "Consider significant changes",
                "Evaluate whether to proceed",
            ],
            [
                "वकील से परामर्श करने की पुरज़ोर सलाह दी जाती है",
                "महत्वपूर्ण बदलावों पर विचार करें",
                "आगे बढ़ना है या नहीं, इसका मूल्यांकन करें",
            ],
            [
                "আইনজীবীর পরামর্শ নেওয়া শক্তভাবে সুপারিশ করা হয়",
                "গুরুত্বপূর্ণ পরিবর্তনের কথা বিবেচনা করুন",
                "চলতে হবে কিনা মূল্যায়ন করুন",
            ],
            [
                "வழக்கறிஞரை அணுகுமாறு வலுவாகப் பரிந்துரைக்கப்படுகிறது",
                "குறிப்பிடத்தக்க மாற்றங்களைப் பரிசீலிக்கவும்",
                "தொடரலாமா என்பதை மதிப்பிடவும்",
            ],
            [
                "న్యాయవాదిని సంప్రదించాలని గట్టిగా సిఫార్సు చేస్తున్నాము",
                "గణనీయమైన మార్పులను పరిగణించండి",
                "ముందుకు సాగాలా వద్దా అని అంచనా వేయండి",
            ],
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_complete() {
        let table = LocalizationTable::builtin();
        assert!(table.missing().is_empty(), "missing: {:?}", table.missing());
    }

    #[test]
    fn every_supported_language_has_non_empty_text() {
        let table = LocalizationTable::builtin();
        for key in LocalizationTable::required_keys() {
            for lang in Language::ALL {
                assert!(!table.text(key, lang).is_empty(), "{key:?} / {lang:?}");
            }
        }
    }

    #[test]
    fn unknown_code_returns_english_variant() {
        let table = LocalizationTable::builtin();
        for code in ["fr", "de", "english", "EN", "zz-ZZ", ""] {
            for key in LocalizationTable::required_keys() {
                assert_eq!(
                    table.text_for_code(key, code),
                    table.text(key, Language::En),
                    "{key:?} for {code:?}"
                );
            }
        }
    }

    #[test]
    fn non_english_rows_differ_from_english() {
        let table = LocalizationTable::builtin();
        let lead = TextKey::PlainLanguageLead;
        assert_eq!(table.text(lead, Language::En), "In simple terms");
        assert_eq!(table.text(lead, Language::Hi), "सरल शब्दों में");
        assert_ne!(table.text(lead, Language::Ta), table.text(lead, Language::En));
    }

    #[test]
    fn recommendations_are_triads() {
        let table = LocalizationTable::builtin();
        for band in RiskBand::ALL {
            for lang in Language::ALL {
                assert_eq!(table.recommendations(band, lang).len(), 3);
            }
        }
    }

    #[test]
    fn sparse_table_falls_back_to_default() {
        let mut table = LocalizationTable::empty();
        table.insert_text(
            TextKey::PlainLanguageLead,
            Localized::new("Plainly").with(Language::Hi, "सरल"),
        );
        assert_eq!(table.text(TextKey::PlainLanguageLead, Language::Hi), "सरल");
        assert_eq!(table.text(TextKey::PlainLanguageLead, Language::Te), "Plainly");
        assert_eq!(table.text(TextKey::SummaryPrompt, Language::En), "");
        assert!(table.missing().iter().any(|m| m.contains("SummaryPrompt")));
    }
}

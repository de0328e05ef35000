//! Offline fallback dictionary
//!
//! A static English→Arabic term table used only when no provider is
//! configured or the provider call failed. Lookup is word by word, so the
//! output is intentionally rough: it keeps the pipeline producing *something*
//! in the right script rather than aiming for a faithful translation.

use crate::language::{FRENCH, is_arabic, normalize_language};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// English term → Arabic rendering
///
/// When several terms share an Arabic rendering, the reverse mapping keeps the
/// last one listed.
pub const TERMS: &[(&str, &str)] = &[
    // Goal terms
    ("goal", "هدف"),
    ("goals", "أهداف"),
    ("objective", "هدف"),
    ("objectives", "أهداف"),
    ("target", "هدف"),
    ("targets", "أهداف"),
    ("aim", "هدف"),
    ("aims", "أهداف"),
    ("purpose", "غرض"),
    ("purposes", "أغراض"),
    ("achievement", "إنجاز"),
    ("achievements", "إنجازات"),
    ("outcome", "نتيجة"),
    ("outcomes", "نتائج"),
    ("result", "نتيجة"),
    ("results", "نتائج"),
    ("milestone", "معلم"),
    ("milestones", "معالم"),
    ("deadline", "موعد نهائي"),
    ("priority", "أولوية"),
    ("priorities", "أولويات"),

    // Priority levels
    ("high", "عالي"),
    ("medium", "متوسط"),
    ("low", "منخفض"),
    ("urgent", "عاجل"),
    ("important", "مهم"),
    ("critical", "حرج"),
    ("normal", "عادي"),

    // Education terms
    ("education", "التعليم"),
    ("learning", "التعلم"),
    ("teaching", "التدريس"),
    ("student", "طالب"),
    ("teacher", "معلم"),
    ("school", "مدرسة"),
    ("class", "فصل"),
    ("course", "دورة"),
    ("lesson", "درس"),
    ("progress", "تقدم"),
    ("improvement", "تحسن"),
    ("development", "تطوير"),
    ("growth", "نمو"),
    ("success", "نجاح"),
    ("performance", "أداء"),
    ("evaluation", "تقييم"),
    ("assessment", "تقييم"),
    ("skill", "مهارة"),
    ("skills", "مهارات"),
    ("ability", "قدرة"),
    ("abilities", "قدرات"),
    ("competence", "كفاءة"),
    ("competency", "كفاءة"),
    ("knowledge", "معرفة"),
    ("understanding", "فهم"),

    // Health terms
    ("health", "الصحة"),
    ("medical", "طبي"),
    ("patient", "مريض"),
    ("doctor", "طبيب"),
    ("hospital", "مستشفى"),
    ("medicine", "دواء"),
    ("behavior", "سلوك"),
    ("behavioral", "سلوكي"),
    ("psychological", "نفسي"),
    ("mental", "عقلي"),
    ("emotional", "عاطفي"),
    ("social", "اجتماعي"),
    ("cognitive", "إدراكي"),
    ("physical", "جسدي"),
    ("therapy", "علاج"),
    ("treatment", "معالجة"),
    ("intervention", "تدخل"),
    ("support", "دعم"),
    ("assistance", "مساعدة"),
    ("help", "مساعدة"),

    // Action terms
    ("improve", "تحسين"),
    ("increase", "زيادة"),
    ("decrease", "تقليل"),
    ("maintain", "الحفاظ على"),
    ("develop", "تطوير"),
    ("enhance", "تعزيز"),
    ("strengthen", "تقوية"),
    ("build", "بناء"),
    ("create", "إنشاء"),
    ("establish", "تأسيس"),
    ("achieve", "تحقيق"),
    ("reach", "الوصول إلى"),
    ("attain", "تحقيق"),
    ("complete", "إكمال"),
    ("finish", "إنهاء"),
    ("master", "إتقان"),
    ("learn", "تعلم"),
    ("understand", "فهم"),
    ("demonstrate", "إظهار"),
    ("practice", "ممارسة"),
    ("apply", "تطبيق"),
    ("use", "استخدام"),
    ("utilize", "استخدام"),

    // Time terms
    ("date", "تاريخ"),
    ("time", "وقت"),
    ("duration", "مدة"),
    ("period", "فترة"),
    ("week", "أسبوع"),
    ("weeks", "أسابيع"),
    ("month", "شهر"),
    ("months", "أشهر"),
    ("year", "سنة"),
    ("years", "سنوات"),
    ("day", "يوم"),
    ("days", "أيام"),
    ("today", "اليوم"),
    ("yesterday", "أمس"),
    ("tomorrow", "غداً"),
    ("morning", "صباح"),
    ("afternoon", "ظهر"),
    ("evening", "مساء"),
    ("night", "ليل"),
    ("schedule", "جدول"),
    ("timeline", "الجدول الزمني"),

    // General terms
    ("this", "هذا"),
    ("is", "هو"),
    ("a", "أ"),
    ("for", "ل"),
    ("of", "من"),
    ("the", "ال"),
    ("and", "و"),
    ("with", "مع"),
    ("in", "في"),
    ("on", "على"),
    ("at", "في"),
    ("to", "إلى"),
    ("from", "من"),
    ("by", "بواسطة"),
    ("about", "حول"),
    ("description", "وصف"),
    ("title", "عنوان"),
    ("name", "اسم"),
    ("detail", "تفصيل"),
    ("details", "تفاصيل"),
    ("information", "معلومات"),
    ("data", "بيانات"),
    ("plan", "خطة"),
    ("planning", "تخطيط"),
    ("strategy", "استراتيجية"),
    ("method", "طريقة"),
    ("approach", "نهج"),
    ("technique", "تقنية"),
    ("way", "طريقة"),
    ("means", "وسيلة"),
    ("tool", "أداة"),
    ("tools", "أدوات"),
    ("resource", "مورد"),
    ("resources", "موارد"),
    ("material", "مادة"),
    ("materials", "مواد"),

    // Item, domain and category terms
    ("category", "فئة"),
    ("item", "عنصر"),
    ("domain", "مجال"),
    ("comment", "تعليق"),
    ("commentaire", "تعليق"),
    ("test", "اختبار"),
    ("example", "مثال"),
    ("sample", "عينة"),
];

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

static GLOBAL: Lazy<FallbackDictionary> = Lazy::new(|| FallbackDictionary::new(TERMS));

/// Bag-of-words translator over a fixed term table
#[derive(Debug, Clone)]
pub struct FallbackDictionary {
    forward: HashMap<&'static str, &'static str>,
    reverse: HashMap<&'static str, &'static str>,
}

impl FallbackDictionary {
    /// Build a dictionary from `(english, arabic)` pairs
    pub fn new(terms: &'static [(&'static str, &'static str)]) -> Self {
        let mut forward = HashMap::with_capacity(terms.len());
        let mut reverse = HashMap::with_capacity(terms.len());
        for &(term, arabic) in terms {
            forward.insert(term, arabic);
            reverse.insert(arabic, term);
        }
        Self { forward, reverse }
    }

    /// The process-wide dictionary built from [`TERMS`]
    pub fn global() -> &'static FallbackDictionary {
        &GLOBAL
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Arabic rendering of a single lowercase term
    pub fn lookup(&self, term: &str) -> Option<&'static str> {
        self.forward.get(term).copied()
    }

    /// Term whose Arabic rendering is exactly `arabic`
    pub fn reverse_lookup(&self, arabic: &str) -> Option<&'static str> {
        self.reverse.get(arabic).copied()
    }

    /// Lowercase, split on whitespace, strip punctuation per token and map
    /// each token; unknown tokens are kept as they were (lowercased).
    pub fn to_arabic(&self, text: &str) -> String {
        text.to_lowercase()
            .split_whitespace()
            .map(|word| {
                let clean = PUNCTUATION.replace_all(word, "");
                match self.lookup(&clean) {
                    Some(arabic) => arabic.to_string(),
                    None => word.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Map each whitespace-separated token through the reverse table verbatim
    pub fn from_arabic(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.reverse_lookup(word).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Translate towards `target_language`
    ///
    /// Arabic targets use the forward table, French the reverse one; any other
    /// target gets the text back unchanged.
    pub fn translate(&self, text: &str, target_language: &str) -> String {
        if is_arabic(target_language) {
            self.to_arabic(text)
        } else if normalize_language(target_language) == FRENCH {
            self.from_arabic(text)
        } else {
            text.to_string()
        }
    }

    /// [`translate`](Self::translate), or `None` when not a single token of
    /// `text` is in the table
    ///
    /// Unknown tokens still pass through inside a phrase that has at least
    /// one known term.
    pub fn try_translate(&self, text: &str, target_language: &str) -> Option<String> {
        if self.known_terms(text, target_language) == 0 {
            return None;
        }
        Some(self.translate(text, target_language))
    }

    /// Number of tokens the table would actually map for `target_language`
    pub fn known_terms(&self, text: &str, target_language: &str) -> usize {
        if is_arabic(target_language) {
            text.to_lowercase()
                .split_whitespace()
                .filter(|word| self.lookup(&PUNCTUATION.replace_all(word, "")).is_some())
                .count()
        } else if normalize_language(target_language) == FRENCH {
            text.split_whitespace()
                .filter(|word| self.reverse_lookup(word).is_some())
                .count()
        } else {
            0
        }
    }
}

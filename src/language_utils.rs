use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;

/// Language catalog and ISO code helpers
///
/// The catalog is the fixed list of target languages a user may pick from.
/// Each entry carries a display name and a flag glyph for the results view.

/// Glyph used when a language has no dedicated flag
pub const FALLBACK_FLAG: &str = "🌐";

// Languages offered by the translation service out of the box
const BUILTIN_LANGUAGES: &[(&str, &str, &str)] = &[
    ("es", "Spanish", "🇪🇸"),
    ("de", "German", "🇩🇪"),
    ("hi", "Hindi", "🇮🇳"),
];

static DEFAULT_CATALOG: Lazy<LanguageCatalog> = Lazy::new(|| LanguageCatalog {
    entries: BUILTIN_LANGUAGES
        .iter()
        .map(|(code, name, flag)| LanguageOption {
            code: (*code).to_string(),
            name: (*name).to_string(),
            flag: (*flag).to_string(),
        })
        .collect(),
});

/// One selectable target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOption {
    /// Short ISO 639-1 code, lowercase
    pub code: String,
    /// English display name
    pub name: String,
    /// Flag glyph shown next to the name
    pub flag: String,
}

/// Ordered set of languages the user can select from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    entries: Vec<LanguageOption>,
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        DEFAULT_CATALOG.clone()
    }
}

impl LanguageCatalog {
    /// Build a catalog from a list of codes, in the given order
    ///
    /// Duplicate codes are collapsed. Codes with a built-in entry keep its name
    /// and flag; any other valid ISO code gets its ISO name and the fallback flag.
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Self> {
        let mut entries: Vec<LanguageOption> = Vec::with_capacity(codes.len());

        for raw in codes {
            let code = normalize_code(raw.as_ref());
            if entries.iter().any(|e| e.code == code) {
                continue;
            }

            let option = match DEFAULT_CATALOG.get(&code) {
                Some(builtin) => builtin.clone(),
                None => LanguageOption {
                    name: get_language_name(&code)?,
                    flag: FALLBACK_FLAG.to_string(),
                    code,
                },
            };
            entries.push(option);
        }

        Ok(Self { entries })
    }

    /// Look up a language by code
    pub fn get(&self, code: &str) -> Option<&LanguageOption> {
        let code = normalize_code(code);
        self.entries.iter().find(|e| e.code == code)
    }

    /// Whether the code is selectable
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Codes in catalog order
    pub fn codes(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.code.clone()).collect()
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[LanguageOption] {
        &self.entries
    }

    /// Flag for a code, falling back to the globe glyph
    pub fn flag_for(&self, code: &str) -> &str {
        self.get(code).map(|e| e.flag.as_str()).unwrap_or(FALLBACK_FLAG)
    }
}

/// Trim and lowercase a language code
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Check that a code is a known ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<Language> {
    let normalized = normalize_code(code);

    let language = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    };

    language.ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Get the English language name for a code
pub fn get_language_name(code: &str) -> Result<String> {
    let language = validate_language_code(code)?;
    Ok(language.to_name().to_string())
}

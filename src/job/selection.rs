use crate::language_utils::normalize_code;

/// Target languages chosen for the next submission
///
/// Codes are unique and kept in the order they were first selected, which is
/// also the order of the repeated `languages` fields in the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetLanguageSet {
    codes: Vec<String>,
}

impl TargetLanguageSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from codes, dropping blanks and duplicates
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Self {
        let mut set = Self::new();
        for code in codes {
            let code = normalize_code(code.as_ref());
            if !code.is_empty() && !set.contains(&code) {
                set.codes.push(code);
            }
        }
        set
    }

    /// Add the code if absent, remove it if present
    ///
    /// Returns whether the code is selected afterwards. Blank codes are ignored.
    pub fn toggle(&mut self, code: &str) -> bool {
        let code = normalize_code(code);
        if code.is_empty() {
            return false;
        }

        match self.codes.iter().position(|c| *c == code) {
            Some(index) => {
                self.codes.remove(index);
                false
            }
            None => {
                self.codes.push(code);
                true
            }
        }
    }

    /// Whether the code is selected
    pub fn contains(&self, code: &str) -> bool {
        let code = normalize_code(code);
        self.codes.iter().any(|c| *c == code)
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of selected codes
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Selected codes in selection order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Owned copy of the selected codes
    pub fn to_vec(&self) -> Vec<String> {
        self.codes.clone()
    }
}

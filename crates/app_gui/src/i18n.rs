//! Language preference handling on top of the core's message tables.

pub use petlens_core::Language;

/// What the user chose in settings; `System` follows the OS locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LanguagePreference {
    #[default]
    System,
    Portuguese,
    English,
}

impl LanguagePreference {
    pub fn from_config(language: Option<Language>) -> Self {
        match language {
            None => LanguagePreference::System,
            Some(Language::Portuguese) => LanguagePreference::Portuguese,
            Some(Language::English) => LanguagePreference::English,
        }
    }

    pub fn to_config(self) -> Option<Language> {
        match self {
            LanguagePreference::System => None,
            LanguagePreference::Portuguese => Some(Language::Portuguese),
            LanguagePreference::English => Some(Language::English),
        }
    }

    pub fn resolve(self) -> Language {
        self.to_config().unwrap_or_else(detect_system_language)
    }
}

pub fn detect_system_language() -> Language {
    match sys_locale::get_locale() {
        Some(tag) => Language::from_locale(&tag),
        None => Language::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LanguagePreference::System)]
    #[case(LanguagePreference::Portuguese)]
    #[case(LanguagePreference::English)]
    fn config_round_trip(#[case] pref: LanguagePreference) {
        assert_eq!(LanguagePreference::from_config(pref.to_config()), pref);
    }

    #[test]
    fn explicit_preference_wins_over_locale() {
        assert_eq!(LanguagePreference::English.resolve(), Language::English);
        assert_eq!(
            LanguagePreference::Portuguese.resolve(),
            Language::Portuguese
        );
    }
}

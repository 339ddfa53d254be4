//! User-facing result texts in the supported languages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Portuguese,
    English,
}

impl Language {
    /// Maps a locale tag such as `pt-BR` or `en_US.UTF-8`.
    pub fn from_locale(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("pt") {
            Language::Portuguese
        } else {
            Language::English
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Portuguese => "pt",
            Language::English => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "pt" | "pt-br" | "portuguese" => Some(Language::Portuguese),
            "en" | "english" => Some(Language::English),
            _ => None,
        }
    }

    /// Picks the string for this language.
    pub fn pick<'a>(self, pt: &'a str, en: &'a str) -> &'a str {
        match self {
            Language::Portuguese => pt,
            Language::English => en,
        }
    }

    pub fn missing_file(self) -> &'static str {
        self.pick(
            "Por favor, selecione uma imagem primeiro.",
            "Please select an image first.",
        )
    }

    pub fn server_error(self) -> &'static str {
        self.pick(
            "Erro ao classificar a imagem. Tente novamente.",
            "Error classifying the image. Please try again.",
        )
    }

    pub fn unreachable(self) -> &'static str {
        self.pick(
            "Não foi possível conectar à API. Verifique se ela está em execução.",
            "Could not connect to the API. Check that it is running.",
        )
    }

    pub fn placeholder(self) -> &'static str {
        self.pick("Pré-visualização da imagem", "Image preview")
    }
}

/// A result line split so the label can be emphasised.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedResult {
    pub lead: String,
    pub emphasis: Option<String>,
}

impl RenderedResult {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            lead: text.into(),
            emphasis: None,
        }
    }

    pub fn prediction(language: Language, prediction: &str, confidence: &str) -> Self {
        let lead = match language {
            Language::Portuguese => format!("Eu tenho {confidence} de certeza que isso é um... "),
            Language::English => format!("I am {confidence} sure this is a... "),
        };
        Self {
            lead,
            emphasis: Some(format!("{prediction}!")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lead.is_empty() && self.emphasis.is_none()
    }

    pub fn text(&self) -> String {
        match &self.emphasis {
            Some(emphasis) => format!("{}{}", self.lead, emphasis),
            None => self.lead.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pt-BR", Language::Portuguese)]
    #[case("pt_PT.UTF-8", Language::Portuguese)]
    #[case("en-US", Language::English)]
    #[case("nl-NL", Language::English)]
    fn locale_mapping(#[case] tag: &str, #[case] expected: Language) {
        assert_eq!(Language::from_locale(tag), expected);
    }

    #[test]
    fn prediction_sentence_interpolates_verbatim() {
        let pt = RenderedResult::prediction(Language::Portuguese, "cat", "92%");
        assert_eq!(pt.text(), "Eu tenho 92% de certeza que isso é um... cat!");
        assert_eq!(pt.emphasis.as_deref(), Some("cat!"));

        let en = RenderedResult::prediction(Language::English, "dog", "87%");
        assert_eq!(en.text(), "I am 87% sure this is a... dog!");
    }

    #[test]
    fn codes_round_trip() {
        for lang in [Language::Portuguese, Language::English] {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("de"), None);
    }
}

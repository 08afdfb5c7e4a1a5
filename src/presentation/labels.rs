//! Fixed strings shown by the card, per locale.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

/// Placeholders and phrases used by the presentation cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLabels {
    pub loading: String,
    pub unknown_tutor: String,
    pub date_unavailable: String,
    /// Review count phrase; `{n}` is replaced by the count.
    pub reviews_phrase: String,
    pub currency_prefix: String,
}

impl CardLabels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Es => Self::spanish(),
            Locale::En => Self::english(),
        }
    }

    pub fn spanish() -> Self {
        Self {
            loading: "Cargando...".into(),
            unknown_tutor: "Tutor desconocido".into(),
            date_unavailable: "Fecha no disponible".into(),
            reviews_phrase: "{n} reseñas".into(),
            currency_prefix: "S/. ".into(),
        }
    }

    pub fn english() -> Self {
        Self {
            loading: "loading".into(),
            unknown_tutor: "unknown tutor".into(),
            date_unavailable: "date unavailable".into(),
            reviews_phrase: "{n} reviews".into(),
            currency_prefix: "S/. ".into(),
        }
    }

    pub fn reviews(&self, count: usize) -> String {
        self.reviews_phrase.replace("{n}", &count.to_string())
    }
}

impl Default for CardLabels {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

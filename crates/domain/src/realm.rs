//! Realm themes for origin area styling

use std::fmt;

/// Visual theme keyed by the realm a starting area belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RealmTheme {
    Arx,
    Umbros,
    Luxen,
    Inferna,
    Ariwn,
    Aythirmok,
    #[default]
    Default,
}

impl RealmTheme {
    /// Map a realm or city name to its theme, ignoring case and surrounding
    /// whitespace. Anything unrecognized, including an empty name, maps to
    /// [`RealmTheme::Default`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "arx" => RealmTheme::Arx,
            "umbros" => RealmTheme::Umbros,
            "luxen" => RealmTheme::Luxen,
            "inferna" => RealmTheme::Inferna,
            "ariwn" => RealmTheme::Ariwn,
            "aythirmok" => RealmTheme::Aythirmok,
            _ => RealmTheme::Default,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RealmTheme::Arx => "arx",
            RealmTheme::Umbros => "umbros",
            RealmTheme::Luxen => "luxen",
            RealmTheme::Inferna => "inferna",
            RealmTheme::Ariwn => "ariwn",
            RealmTheme::Aythirmok => "aythirmok",
            RealmTheme::Default => "default",
        }
    }
}

impl fmt::Display for RealmTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

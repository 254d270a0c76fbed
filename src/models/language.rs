// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Supported UI languages.

use serde::{Deserialize, Serialize};

/// A language the front end ships strings for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AppLanguage {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "zh-Hans")]
    SimplifiedChinese,
}

/// Lowercase identifier prefixes matched per language, in priority order.
const PREFIXES: &[(AppLanguage, &[&str])] = &[
    (AppLanguage::English, &["en"]),
    (AppLanguage::Spanish, &["es"]),
    (AppLanguage::French, &["fr"]),
    (AppLanguage::German, &["de"]),
    (AppLanguage::SimplifiedChinese, &["zh-hans", "zh"]),
];

impl AppLanguage {
    pub const ALL: [AppLanguage; 5] = [
        AppLanguage::English,
        AppLanguage::Spanish,
        AppLanguage::French,
        AppLanguage::German,
        AppLanguage::SimplifiedChinese,
    ];

    /// BCP 47 code used for string bundles.
    pub fn code(self) -> &'static str {
        match self {
            AppLanguage::English => "en",
            AppLanguage::Spanish => "es",
            AppLanguage::French => "fr",
            AppLanguage::German => "de",
            AppLanguage::SimplifiedChinese => "zh-Hans",
        }
    }

    /// Name of the language in itself.
    pub fn display_name(self) -> &'static str {
        match self {
            AppLanguage::English => "English",
            AppLanguage::Spanish => "Español",
            AppLanguage::French => "Français",
            AppLanguage::German => "Deutsch",
            AppLanguage::SimplifiedChinese => "简体中文",
        }
    }

    /// First supported language matching the preferred identifiers, in order.
    /// Falls back to English.
    pub fn resolve<I, S>(preferred: I) -> AppLanguage
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for identifier in preferred {
            let lowercased = identifier.as_ref().to_lowercase();
            let matched = PREFIXES
                .iter()
                .find(|(_, prefixes)| prefixes.iter().any(|p| lowercased.starts_with(p)));
            if let Some((language, _)) = matched {
                return *language;
            }
        }
        AppLanguage::English
    }
}

// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline heuristic language detection.
//!
//! A fixed keyword/character table, not a statistical model: given the same
//! tables, detection is reproducible bit-for-bit. The combined score is
//! `keyword_hits + 1.5 * unique_char_hits` over the lowercased, trimmed
//! text; ties resolve toward the earliest language in [`Lang::ALL`], so
//! English is the default.

use triago_core::{Lang, LanguageContext};

/// Source tag carried on every context produced by this detector.
const DETECTOR_SOURCE: &str = "lingua-offline";

/// Weight of a unique-character hit relative to a keyword hit.
const CHAR_WEIGHT: f64 = 1.5;

/// Language-specific keywords and phrases, matched as substrings.
fn keywords(lang: Lang) -> &'static [&'static str] {
    match lang {
        Lang::En => &["help", "billing", "password", "support", "upgrade", "cancel"],
        Lang::Es => &["factura", "ayuda", "contraseña", "soporte", "precio", "cancelar"],
        Lang::Fr => &["facture", "assistance", "mot de passe", "prix"],
        Lang::De => &["rechnung", "hilfe", "kennwort", "preis"],
        Lang::Zh => &["价格", "帮助", "支持", "发票"],
    }
}

/// Characters considered unique to a language within the supported set.
fn unique_chars(lang: Lang) -> &'static [char] {
    match lang {
        Lang::En => &[],
        Lang::Es => &['ñ', 'á', 'é', 'í', 'ó', 'ú'],
        Lang::Fr => &['à', 'ç', 'è', 'é', 'ù'],
        Lang::De => &['ä', 'ö', 'ü', 'ß'],
        Lang::Zh => &['你', '们', '客', '户'],
    }
}

/// Lightweight offline language detector.
#[derive(Debug, Default, Clone)]
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect the language of `text`. Total: never fails.
    ///
    /// Empty or whitespace-only text yields English at zero confidence.
    pub fn detect(&self, text: &str) -> LanguageContext {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return LanguageContext {
                language: Lang::En,
                confidence: 0.0,
                source: DETECTOR_SOURCE,
            };
        }

        let mut best = Lang::En;
        let mut best_score = f64::NEG_INFINITY;
        for lang in Lang::ALL {
            let keyword_score = keywords(lang)
                .iter()
                .filter(|keyword| normalized.contains(*keyword))
                .count() as f64;
            let char_score = unique_chars(lang)
                .iter()
                .filter(|c| normalized.contains(**c))
                .count() as f64;
            let combined = keyword_score + CHAR_WEIGHT * char_score;
            if combined > best_score {
                best_score = combined;
                best = lang;
            }
        }

        let max_possible =
            keywords(best).len() as f64 + CHAR_WEIGHT * unique_chars(best).len() as f64;
        let confidence = if max_possible == 0.0 {
            0.0
        } else {
            (best_score / max_possible).min(1.0)
        };

        LanguageContext {
            language: best,
            confidence,
            source: DETECTOR_SOURCE,
        }
    }
}

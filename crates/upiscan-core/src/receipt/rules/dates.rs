//! Date extraction for payment screenshots.
//!
//! Dates are recognized, not interpreted: the text is returned as it appeared
//! (whitespace collapsed) without calendar validation or timezone handling.

use tracing::debug;

use super::patterns::{DATE_ISO, DATE_LONG};
use super::{ExtractionMatch, FieldExtractor};
use crate::receipt::normalize::normalize_spaces;

const TIER_LONG: usize = 0;
const TIER_ISO: usize = 1;

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        // "4 Oct 2025, 6:43 pm"
        let long: Vec<_> = DATE_LONG
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(normalize_spaces(m.as_str()), TIER_LONG, m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect();
        if !long.is_empty() {
            return long;
        }

        // 2025-08-10
        let iso: Vec<_> = DATE_ISO
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), TIER_ISO, m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect();
        if !iso.is_empty() {
            debug!("No long-form date, using ISO date {}", iso[0].value);
        }
        iso
    }
}

/// Extract the first date (and optional time) from receipt text.
pub fn parse_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

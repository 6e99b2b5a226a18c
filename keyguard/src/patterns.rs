// Copyright 2024, The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Locale dependent clock patterns, computed once per locale and skeleton pair.

use log::debug;

/// Produces the best date/time pattern for a skeleton in a locale.
pub trait PatternGenerator {
    fn best_pattern(&self, locale: &str, skeleton: &str) -> String;
}

/// The clock patterns for the current locale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClockPatterns {
    pub clock_12: String,
    pub clock_24: String,
}

struct Entry {
    locale: String,
    skeleton_12: String,
    skeleton_24: String,
    patterns: ClockPatterns,
}

impl Entry {
    fn matches(&self, locale: &str, skeleton_12: &str, skeleton_24: &str) -> bool {
        self.locale == locale && self.skeleton_12 == skeleton_12 && self.skeleton_24 == skeleton_24
    }
}

/// Remembers the patterns of the last locale and skeleton pair it was asked about.
#[derive(Default)]
pub struct PatternCache {
    entry: Option<Entry>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the patterns for `locale`, calling `generator` only if the locale or either
    /// skeleton differs from the previous call.
    ///
    /// Generators add an AM/PM marker to 12 hour patterns even when the skeleton has none. If
    /// `skeleton_12` has no `a`, every `a` is removed from the 12 hour pattern.
    pub fn resolve(
        &mut self,
        generator: &dyn PatternGenerator,
        locale: &str,
        skeleton_12: &str,
        skeleton_24: &str,
    ) -> &ClockPatterns {
        if !matches!(&self.entry, Some(entry) if entry.matches(locale, skeleton_12, skeleton_24)) {
            self.entry = None;
        }
        let entry = self.entry.get_or_insert_with(|| {
            debug!("Computing clock patterns for {locale}");
            let mut clock_12 = generator.best_pattern(locale, skeleton_12);
            if !skeleton_12.contains('a') {
                clock_12 = clock_12.replace('a', "").trim().to_owned();
            }
            let clock_24 = generator.best_pattern(locale, skeleton_24);
            Entry {
                locale: locale.to_owned(),
                skeleton_12: skeleton_12.to_owned(),
                skeleton_24: skeleton_24.to_owned(),
                patterns: ClockPatterns { clock_12, clock_24 },
            }
        });
        &entry.patterns
    }

    /// The patterns last resolved, if any.
    pub fn cached(&self) -> Option<&ClockPatterns> {
        self.entry.as_ref().map(|entry| &entry.patterns)
    }
}

/// A locale independent generator that understands the hour and minute skeleton fields.
///
/// Like CLDR, it adds ` a` to every 12 hour pattern.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkeletonPatternGenerator;

impl PatternGenerator for SkeletonPatternGenerator {
    fn best_pattern(&self, _locale: &str, skeleton: &str) -> String {
        let hour = skeleton.chars().find(|c| matches!(c, 'h' | 'H' | 'k' | 'K'));
        let mut pattern = String::from(match hour {
            Some('h') => "h",
            Some('K') => "K",
            Some('H') => "HH",
            Some('k') => "kk",
            _ => "",
        });
        if skeleton.contains('m') {
            if !pattern.is_empty() {
                pattern.push(':');
            }
            pattern.push_str("mm");
        }
        if matches!(hour, Some('h' | 'K')) {
            pattern.push_str(" a");
        }
        pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every call and forwards to the skeleton generator.
    #[derive(Default)]
    struct RecordingGenerator {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl PatternGenerator for RecordingGenerator {
        fn best_pattern(&self, locale: &str, skeleton: &str) -> String {
            self.calls.borrow_mut().push((locale.to_owned(), skeleton.to_owned()));
            SkeletonPatternGenerator.best_pattern(locale, skeleton)
        }
    }

    #[test]
    fn identical_key_is_served_from_cache() {
        let generator = RecordingGenerator::default();
        let mut cache = PatternCache::new();

        let first = cache.resolve(&generator, "en_US", "hm", "Hm").clone();
        let second = cache.resolve(&generator, "en_US", "hm", "Hm").clone();

        assert_eq!(first, second);
        assert_eq!(generator.calls.borrow().len(), 2);
    }

    #[test]
    fn locale_change_recomputes() {
        let generator = RecordingGenerator::default();
        let mut cache = PatternCache::new();

        cache.resolve(&generator, "en_US", "hm", "Hm");
        cache.resolve(&generator, "de_DE", "hm", "Hm");
        cache.resolve(&generator, "de_DE", "hm", "Hm");

        assert_eq!(
            *generator.calls.borrow(),
            vec![
                ("en_US".to_owned(), "hm".to_owned()),
                ("en_US".to_owned(), "Hm".to_owned()),
                ("de_DE".to_owned(), "hm".to_owned()),
                ("de_DE".to_owned(), "Hm".to_owned()),
            ]
        );
    }

    #[test]
    fn skeleton_change_recomputes() {
        let generator = RecordingGenerator::default();
        let mut cache = PatternCache::new();

        cache.resolve(&generator, "en_US", "hm", "Hm");
        let patterns = cache.resolve(&generator, "en_US", "hma", "Hm");

        assert_eq!(patterns.clock_12, "h:mm a");
        assert_eq!(generator.calls.borrow().len(), 4);
    }

    #[test]
    fn am_pm_marker_is_stripped_unless_requested() {
        let mut cache = PatternCache::new();
        let patterns = cache.resolve(&SkeletonPatternGenerator, "en_US", "hm", "Hm");
        assert_eq!(patterns.clock_12, "h:mm");
        assert_eq!(patterns.clock_24, "HH:mm");
    }

    #[test]
    fn empty_cache_has_nothing() {
        assert_eq!(PatternCache::new().cached(), None);
    }

    #[test]
    fn skeleton_generator_fields() {
        let generator = SkeletonPatternGenerator;
        assert_eq!(generator.best_pattern("", "hm"), "h:mm a");
        assert_eq!(generator.best_pattern("", "Km"), "K:mm a");
        assert_eq!(generator.best_pattern("", "km"), "kk:mm");
        assert_eq!(generator.best_pattern("", "H"), "HH");
    }
}

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

//! The typefaces selectable for the lock screen date and owner info.

use log::warn;
use std::fmt;

/// Index of the typeface used when the setting is absent or out of range.
pub const DEFAULT_FONT_INDEX: usize = 28;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypefaceStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl TypefaceStyle {
    /// Parses a style label. Unknown labels are `Normal`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "BOLD" => Self::Bold,
            "ITALIC" => Self::Italic,
            "BOLD_ITALIC" => Self::BoldItalic,
            _ => Self::Normal,
        }
    }
}

/// A font family together with its style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Typeface {
    pub family: &'static str,
    pub style: TypefaceStyle,
}

impl fmt::Display for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({:?})", self.family, self.style)
    }
}

/// Family and style label of every selectable font, by setting index.
const FONTS_STYLE: [(&str, &str); 32] = [
    ("sans-serif", "NORMAL"),
    ("sans-serif", "BOLD"),
    ("sans-serif", "ITALIC"),
    ("sans-serif", "BOLD_ITALIC"),
    ("sans-serif-light", "NORMAL"),
    ("sans-serif-light", "ITALIC"),
    ("sans-serif-thin", "NORMAL"),
    ("sans-serif-thin", "ITALIC"),
    ("sans-serif-condensed", "NORMAL"),
    ("sans-serif-condensed", "ITALIC"),
    ("sans-serif-condensed", "BOLD"),
    ("sans-serif-condensed", "BOLD_ITALIC"),
    ("sans-serif-medium", "NORMAL"),
    ("sans-serif-medium", "ITALIC"),
    ("sans-serif-black", "NORMAL"),
    ("sans-serif-black", "ITALIC"),
    ("sans-serif-condensed-light", "NORMAL"),
    ("sans-serif-condensed-light", "ITALIC"),
    ("cursive", "NORMAL"),
    ("cursive", "BOLD"),
    ("casual", "NORMAL"),
    ("serif", "NORMAL"),
    ("serif", "ITALIC"),
    ("serif", "BOLD"),
    ("serif", "BOLD_ITALIC"),
    ("serif-monospace", "NORMAL"),
    ("monospace", "NORMAL"),
    ("sans-serif-smallcaps", "NORMAL"),
    ("google-sans", "NORMAL"),
    ("google-sans", "BOLD"),
    ("google-sans-medium", "NORMAL"),
    ("google-sans-clock", "NORMAL"),
];

/// Number of selectable fonts.
pub fn font_count() -> usize {
    FONTS_STYLE.len()
}

/// Returns the typeface at `index`, or the default typeface when `index` is out of range.
pub fn typeface_for(index: i32) -> Typeface {
    let (family, style) = usize::try_from(index)
        .ok()
        .and_then(|i| FONTS_STYLE.get(i))
        .copied()
        .unwrap_or_else(|| {
            warn!("unknown font index {index}, using default");
            FONTS_STYLE[DEFAULT_FONT_INDEX]
        });
    Typeface { family, style: TypefaceStyle::from_label(style) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_index_is_in_table() {
        assert!(DEFAULT_FONT_INDEX < font_count());
        assert_eq!(
            typeface_for(DEFAULT_FONT_INDEX as i32),
            Typeface { family: "google-sans", style: TypefaceStyle::Normal }
        );
    }

    #[test]
    fn styles_are_parsed() {
        assert_eq!(typeface_for(1).style, TypefaceStyle::Bold);
        assert_eq!(typeface_for(2).style, TypefaceStyle::Italic);
        assert_eq!(typeface_for(3).style, TypefaceStyle::BoldItalic);
        assert_eq!(TypefaceStyle::from_label("LIGHT"), TypefaceStyle::Normal);
    }

    #[test]
    fn out_of_range_uses_default() {
        let default = typeface_for(DEFAULT_FONT_INDEX as i32);
        assert_eq!(typeface_for(-1), default);
        assert_eq!(typeface_for(font_count() as i32), default);
        assert_eq!(typeface_for(i32::MAX), default);
    }
}

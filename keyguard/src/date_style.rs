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

//! Background, padding and text style of the lock screen date.

use crate::resources::{Dimen, Drawable, Resources};
use log::warn;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Alpha of the translucent accent backgrounds.
const TRANSLUCENT: u8 = 160;

/// Date selection, as stored in `lockscreen_date_selection`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(i32)]
pub enum DateStyle {
    Plain = 0,
    Box = 1,
    Rounded = 2,
    Pill = 3,
    Accent = 4,
    AccentDay = 5,
    TranslucentAccent = 6,
    TranslucentAccentDay = 7,
    Gradient = 8,
    BorderAccent = 9,
    BorderGradient = 10,
}

/// The padding dimension pair of a date style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaddingKeys {
    pub horizontal: Dimen,
    pub vertical: Dimen,
}

const BOX_PADDING: PaddingKeys = PaddingKeys {
    horizontal: Dimen::DateBoxPaddingHorizontal,
    vertical: Dimen::DateBoxPaddingVertical,
};
const PILL_PADDING: PaddingKeys =
    PaddingKeys { horizontal: Dimen::PillPaddingHorizontal, vertical: Dimen::PillPaddingVertical };
const ACCENT_PADDING: PaddingKeys = PaddingKeys {
    horizontal: Dimen::AccentBoxPaddingHorizontal,
    vertical: Dimen::AccentBoxPaddingVertical,
};

/// Static attributes of a date style. Background and padding always come as a pair, as do
/// text scale and bold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DateStyleAttributes {
    /// Background drawable and padding keys, or `None` for no background and no padding.
    pub background: Option<(Drawable, PaddingKeys)>,
    /// Alpha applied over the drawable. `None` keeps the drawable's own alpha.
    pub background_alpha: Option<u8>,
    pub text_scale: f32,
    pub bold: bool,
}

const fn attrs(
    background: Option<(Drawable, PaddingKeys)>,
    background_alpha: Option<u8>,
    text_scale: f32,
    bold: bool,
) -> DateStyleAttributes {
    DateStyleAttributes { background, background_alpha, text_scale, bold }
}

/// Indexed by `DateStyle as usize`.
static DATE_STYLES: [DateStyleAttributes; 11] = [
    attrs(None, None, 0.05, false),
    attrs(Some((Drawable::DateBoxBorder, BOX_PADDING)), None, 0.05, false),
    attrs(Some((Drawable::DateBorderRound, BOX_PADDING)), None, 0.05, false),
    attrs(Some((Drawable::AmbientPill, PILL_PADDING)), None, 0.05, false),
    attrs(Some((Drawable::DateAccent, ACCENT_PADDING)), None, 0.15, true),
    attrs(Some((Drawable::DateAccent, ACCENT_PADDING)), None, 0.15, true),
    attrs(Some((Drawable::DateAccent, ACCENT_PADDING)), Some(TRANSLUCENT), 0.15, true),
    attrs(Some((Drawable::DateAccent, ACCENT_PADDING)), Some(TRANSLUCENT), 0.15, true),
    attrs(Some((Drawable::DateGradient, ACCENT_PADDING)), None, 0.15, true),
    attrs(Some((Drawable::DateBorderAccent, ACCENT_PADDING)), None, 0.08, true),
    attrs(Some((Drawable::DateBorderGradient, ACCENT_PADDING)), None, 0.08, true),
];

/// A date style with its padding resolved to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedDateStyle {
    pub background: Option<Drawable>,
    pub background_alpha: Option<u8>,
    pub horizontal_padding: i32,
    pub vertical_padding: i32,
    pub text_scale: f32,
    pub bold: bool,
}

impl DateStyle {
    /// Maps a stored setting to a style. Unknown values fall back to `Plain`.
    pub fn from_setting(value: i32) -> Self {
        Self::from_i32(value).unwrap_or_else(|| {
            warn!("unknown date selection {value}, using default");
            Self::Plain
        })
    }

    pub fn attributes(self) -> &'static DateStyleAttributes {
        &DATE_STYLES[self as usize]
    }

    /// Resolves the padding keys of this style through `resources`.
    pub fn resolve(self, resources: &dyn Resources) -> ResolvedDateStyle {
        let attributes = self.attributes();
        let (background, horizontal_padding, vertical_padding) = match attributes.background {
            Some((drawable, padding)) => (
                Some(drawable),
                resources.dimension_pixel_size(padding.horizontal),
                resources.dimension_pixel_size(padding.vertical),
            ),
            None => (None, 0, 0),
        };
        ResolvedDateStyle {
            background,
            background_alpha: attributes.background_alpha,
            horizontal_padding,
            vertical_padding,
            text_scale: attributes.text_scale,
            bold: attributes.bold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::FixedResources;

    #[test]
    fn text_style_pairs() {
        let expected = [
            (0.05, false),
            (0.05, false),
            (0.05, false),
            (0.05, false),
            (0.15, true),
            (0.15, true),
            (0.15, true),
            (0.15, true),
            (0.15, true),
            (0.08, true),
            (0.08, true),
        ];
        for (selection, (scale, bold)) in expected.into_iter().enumerate() {
            let attributes = DateStyle::from_setting(selection as i32).attributes();
            assert_eq!((attributes.text_scale, attributes.bold), (scale, bold), "{selection}");
        }
    }

    #[test]
    fn plain_has_no_background_and_no_padding() {
        let resolved = DateStyle::Plain.resolve(&FixedResources::default());
        assert_eq!(resolved.background, None);
        assert_eq!((resolved.horizontal_padding, resolved.vertical_padding), (0, 0));
    }

    #[test]
    fn padding_is_resolved_with_the_background() {
        let resources = FixedResources::default();

        let pill = DateStyle::Pill.resolve(&resources);
        assert_eq!(pill.background, Some(Drawable::AmbientPill));
        assert_eq!((pill.horizontal_padding, pill.vertical_padding), (14, 6));

        let rounded = DateStyle::Rounded.resolve(&resources);
        assert_eq!(rounded.background, Some(Drawable::DateBorderRound));
        assert_eq!((rounded.horizontal_padding, rounded.vertical_padding), (12, 4));

        let gradient = DateStyle::BorderGradient.resolve(&resources);
        assert_eq!(gradient.background, Some(Drawable::DateBorderGradient));
        assert_eq!((gradient.horizontal_padding, gradient.vertical_padding), (16, 6));
    }

    #[test]
    fn paired_selections_share_attributes() {
        assert_eq!(DateStyle::Accent.attributes(), DateStyle::AccentDay.attributes());
        assert_eq!(
            DateStyle::TranslucentAccent.attributes(),
            DateStyle::TranslucentAccentDay.attributes()
        );
        assert_eq!(DateStyle::TranslucentAccent.attributes().background_alpha, Some(160));
    }

    #[test]
    fn only_translucent_styles_set_alpha() {
        let resources = FixedResources::default();
        for selection in 0..=10 {
            let style = DateStyle::from_setting(selection);
            let alpha = style.resolve(&resources).background_alpha;
            match style {
                DateStyle::TranslucentAccent | DateStyle::TranslucentAccentDay => {
                    assert_eq!(alpha, Some(160), "{selection}")
                }
                _ => assert_eq!(alpha, None, "{selection}"),
            }
        }
    }

    #[test]
    fn out_of_range_falls_back_to_plain() {
        for selection in [-1, 11, 42] {
            assert_eq!(DateStyle::from_setting(selection), DateStyle::Plain);
        }
    }
}

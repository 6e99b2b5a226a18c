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

//! Which clock widget the lock screen shows, and how its time is formatted.

use crate::patterns::ClockPatterns;
use log::warn;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Line spacing multiplier of the stacked "sammy" clocks.
const SAMMY_LINE_SPACING: f32 = 0.8;

/// Clock selection, as stored in `lockscreen_clock_selection`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(i32)]
pub enum ClockStyle {
    Hidden = 1,
    Default = 2,
    DefaultBold = 3,
    Sammy = 4,
    SammyBold = 5,
    SammyHourAccent = 6,
    SammyMinuteAccent = 7,
    CustomText = 8,
    CustomAnalog = 9,
    CustomNumAnalog = 10,
    DuAnalog = 11,
}

/// A clock widget slot. Exactly one slot is visible at any time; `Hidden` is the empty
/// placeholder shown when the user turns the clock off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockSlot {
    Hidden,
    SmallClock,
    TextClock,
    CustomAnalog,
    CustomNumAnalog,
    DuAnalog,
}

impl ClockSlot {
    pub const ALL: [ClockSlot; 6] = [
        Self::Hidden,
        Self::SmallClock,
        Self::TextClock,
        Self::CustomAnalog,
        Self::CustomNumAnalog,
        Self::DuAnalog,
    ];
}

/// View that the status area is laid out below.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    ClockView,
    CustomTextClockView,
    CustomClockView,
    CustomNumClockView,
    DuClockView,
}

impl Anchor {
    pub fn view_id(self) -> &'static str {
        match self {
            Self::ClockView => "clock_view",
            Self::CustomTextClockView => "custom_text_clock_view",
            Self::CustomClockView => "custom_clock_view",
            Self::CustomNumClockView => "custom_num_clock_view",
            Self::DuClockView => "du_clock_view",
        }
    }
}

/// Layout produced by a clock style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilitySet {
    /// The one visible slot.
    pub visible: ClockSlot,
    /// The view the status area goes below.
    pub anchor: Anchor,
    /// Line spacing multiplier for the default clock, if the style overrides it.
    pub line_spacing: Option<f32>,
}

impl VisibilitySet {
    pub fn is_visible(&self, slot: ClockSlot) -> bool {
        self.visible == slot
    }

    /// Every slot with its visibility.
    pub fn slots(&self) -> impl Iterator<Item = (ClockSlot, bool)> + '_ {
        ClockSlot::ALL.into_iter().map(move |slot| (slot, self.is_visible(slot)))
    }
}

const fn layout(visible: ClockSlot, anchor: Anchor, line_spacing: Option<f32>) -> VisibilitySet {
    VisibilitySet { visible, anchor, line_spacing }
}

/// Indexed by `ClockStyle as usize - 1`.
const CLOCK_LAYOUTS: [VisibilitySet; 11] = [
    layout(ClockSlot::Hidden, Anchor::ClockView, None),
    layout(ClockSlot::SmallClock, Anchor::ClockView, None),
    layout(ClockSlot::SmallClock, Anchor::ClockView, None),
    layout(ClockSlot::SmallClock, Anchor::ClockView, Some(SAMMY_LINE_SPACING)),
    layout(ClockSlot::SmallClock, Anchor::ClockView, Some(SAMMY_LINE_SPACING)),
    layout(ClockSlot::SmallClock, Anchor::ClockView, Some(SAMMY_LINE_SPACING)),
    layout(ClockSlot::SmallClock, Anchor::ClockView, Some(SAMMY_LINE_SPACING)),
    layout(ClockSlot::TextClock, Anchor::CustomTextClockView, None),
    layout(ClockSlot::CustomAnalog, Anchor::CustomClockView, None),
    layout(ClockSlot::CustomNumAnalog, Anchor::CustomNumClockView, None),
    layout(ClockSlot::DuAnalog, Anchor::DuClockView, None),
];

/// A pair of clock formats. They may contain simple HTML markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockFormat {
    pub format_12: String,
    pub format_24: String,
}

impl ClockFormat {
    fn new(format_12: impl Into<String>, format_24: impl Into<String>) -> Self {
        Self { format_12: format_12.into(), format_24: format_24.into() }
    }
}

/// What to do when the time changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeRefresh {
    /// Apply these formats to the default clock.
    Format(ClockFormat),
    /// The widget in this slot draws the time itself and only needs to be told.
    Widget(ClockSlot),
}

impl ClockStyle {
    pub const ALL: [ClockStyle; 11] = [
        Self::Hidden,
        Self::Default,
        Self::DefaultBold,
        Self::Sammy,
        Self::SammyBold,
        Self::SammyHourAccent,
        Self::SammyMinuteAccent,
        Self::CustomText,
        Self::CustomAnalog,
        Self::CustomNumAnalog,
        Self::DuAnalog,
    ];

    /// Maps a stored setting to a style. Unknown values fall back to `Default`.
    pub fn from_setting(value: i32) -> Self {
        Self::from_i32(value).unwrap_or_else(|| {
            warn!("unknown clock selection {value}, using default");
            Self::Default
        })
    }

    /// Returns which slot is visible and where the status area is anchored.
    pub fn visibility(self) -> VisibilitySet {
        CLOCK_LAYOUTS[self as usize - 1]
    }

    /// Returns how the clock is refreshed on a time change. `patterns` are the locale's best
    /// patterns; `accent_color` colors the accented half of the sammy clocks.
    pub fn time_refresh(self, patterns: &ClockPatterns, accent_color: u32) -> TimeRefresh {
        let accent = format!("#{:06x}", accent_color & 0x00ff_ffff);
        let format = match self {
            Self::Default => ClockFormat::new(&patterns.clock_12, &patterns.clock_24),
            Self::DefaultBold => {
                ClockFormat::new("<strong>h</strong>:mm", "<strong>kk</strong>:mm")
            }
            Self::SammyBold => ClockFormat::new("hh\nmm", "kk\nmm"),
            Self::SammyHourAccent => ClockFormat::new(
                format!("<font color={accent}>hh</font><br>mm"),
                format!("<font color={accent}>kk</font><br>mm"),
            ),
            Self::SammyMinuteAccent => ClockFormat::new(
                format!("hh<br><font color={accent}>mm</font>"),
                format!("kk<br><font color={accent}>mm</font>"),
            ),
            Self::CustomText | Self::CustomAnalog | Self::CustomNumAnalog | Self::DuAnalog => {
                return TimeRefresh::Widget(self.visibility().visible);
            }
            Self::Hidden | Self::Sammy => {
                ClockFormat::new("<strong>hh</strong><br>mm", "<strong>kk</strong><br>mm")
            }
        };
        TimeRefresh::Format(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> ClockPatterns {
        ClockPatterns { clock_12: "h:mm".to_owned(), clock_24: "HH:mm".to_owned() }
    }

    #[test]
    fn exactly_one_slot_visible() {
        for selection in 1..=11 {
            let set = ClockStyle::from_setting(selection).visibility();
            assert_eq!(set.slots().filter(|(_, visible)| *visible).count(), 1, "{selection}");
        }
    }

    #[test]
    fn table_order_matches_discriminants() {
        for (index, style) in ClockStyle::ALL.iter().enumerate() {
            assert_eq!(*style as usize, index + 1);
            assert_eq!(ClockStyle::from_setting(index as i32 + 1), *style);
        }
    }

    #[test]
    fn custom_clocks_anchor_below_themselves() {
        let cases = [
            (ClockStyle::CustomText, ClockSlot::TextClock, Anchor::CustomTextClockView),
            (ClockStyle::CustomAnalog, ClockSlot::CustomAnalog, Anchor::CustomClockView),
            (ClockStyle::CustomNumAnalog, ClockSlot::CustomNumAnalog, Anchor::CustomNumClockView),
            (ClockStyle::DuAnalog, ClockSlot::DuAnalog, Anchor::DuClockView),
        ];
        for (style, slot, anchor) in cases {
            let set = style.visibility();
            assert_eq!(set.visible, slot);
            assert_eq!(set.anchor, anchor);
            assert_eq!(set.line_spacing, None);
        }
    }

    #[test]
    fn sammy_clocks_tighten_line_spacing() {
        for style in [
            ClockStyle::Sammy,
            ClockStyle::SammyBold,
            ClockStyle::SammyHourAccent,
            ClockStyle::SammyMinuteAccent,
        ] {
            assert_eq!(style.visibility().line_spacing, Some(SAMMY_LINE_SPACING));
            assert_eq!(style.visibility().visible, ClockSlot::SmallClock);
        }
    }

    #[test]
    fn hidden_shows_only_the_placeholder() {
        let set = ClockStyle::Hidden.visibility();
        assert!(set.is_visible(ClockSlot::Hidden));
        assert!(!set.is_visible(ClockSlot::SmallClock));
        assert_eq!(set.anchor, Anchor::ClockView);
    }

    #[test]
    fn out_of_range_falls_back_to_default() {
        for selection in [i32::MIN, -1, 0, 12, 100] {
            assert_eq!(ClockStyle::from_setting(selection), ClockStyle::Default);
        }
    }

    #[test]
    fn default_uses_best_patterns() {
        assert_eq!(
            ClockStyle::Default.time_refresh(&patterns(), 0),
            TimeRefresh::Format(ClockFormat::new("h:mm", "HH:mm"))
        );
    }

    #[test]
    fn accent_clocks_embed_the_color() {
        let refresh = ClockStyle::SammyMinuteAccent.time_refresh(&patterns(), 0xff1a73e8);
        assert_eq!(
            refresh,
            TimeRefresh::Format(ClockFormat::new(
                "hh<br><font color=#1a73e8>mm</font>",
                "kk<br><font color=#1a73e8>mm</font>"
            ))
        );
    }

    #[test]
    fn custom_clocks_refresh_themselves() {
        assert_eq!(
            ClockStyle::CustomNumAnalog.time_refresh(&patterns(), 0),
            TimeRefresh::Widget(ClockSlot::CustomNumAnalog)
        );
        assert_eq!(
            ClockStyle::CustomText.time_refresh(&patterns(), 0),
            TimeRefresh::Widget(ClockSlot::TextClock)
        );
    }
}

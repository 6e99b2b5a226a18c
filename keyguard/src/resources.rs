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

//! Symbolic resource keys and the collaborator that resolves them.

use std::collections::HashMap;

/// Background drawables of the date area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Drawable {
    DateBoxBorder,
    DateBorderRound,
    AmbientPill,
    DateAccent,
    DateGradient,
    DateBorderAccent,
    DateBorderGradient,
}

impl Drawable {
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::DateBoxBorder => "date_box_str_border",
            Self::DateBorderRound => "date_str_border",
            Self::AmbientPill => "ambient_indication_pill_background",
            Self::DateAccent => "date_str_accent",
            Self::DateGradient => "date_str_gradient",
            Self::DateBorderAccent => "date_str_borderacc",
            Self::DateBorderGradient => "date_str_bordergrad",
        }
    }
}

/// Dimension resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimen {
    DateBoxPaddingHorizontal,
    DateBoxPaddingVertical,
    PillPaddingHorizontal,
    PillPaddingVertical,
    AccentBoxPaddingHorizontal,
    AccentBoxPaddingVertical,
    /// Start padding of the custom text clock when it is start aligned.
    CustomClockLeftPadding,
    /// Gap between the status area and the notification icons.
    WidgetVerticalPadding,
    /// Same gap, when the status area shows a header.
    WidgetVerticalPaddingWithHeader,
}

impl Dimen {
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::DateBoxPaddingHorizontal => "widget_date_box_padding_hor",
            Self::DateBoxPaddingVertical => "widget_date_box_padding_ver",
            Self::PillPaddingHorizontal => "q_nowplay_pill_padding_hor",
            Self::PillPaddingVertical => "q_nowplay_pill_padding_ver",
            Self::AccentBoxPaddingHorizontal => "widget_date_accent_box_padding_hor",
            Self::AccentBoxPaddingVertical => "widget_date_accent_box_padding_ver",
            Self::CustomClockLeftPadding => "custom_clock_left_padding",
            Self::WidgetVerticalPadding => "widget_vertical_padding",
            Self::WidgetVerticalPaddingWithHeader => "widget_vertical_padding_with_header",
        }
    }
}

/// String resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Text {
    /// Best-pattern skeleton for the 12 hour clock.
    Clock12HourSkeleton,
    /// Best-pattern skeleton for the 24 hour clock.
    Clock24HourSkeleton,
    /// Label of the logout button.
    Logout,
}

/// Resolves resource keys for the current configuration.
pub trait Resources {
    /// Returns the size of `dimen` in whole pixels.
    fn dimension_pixel_size(&self, dimen: Dimen) -> i32;

    /// Returns the string for `text` in the current locale.
    fn string(&self, text: Text) -> String;

    /// Returns the light accent color as ARGB.
    fn accent_color(&self) -> u32;
}

/// Resources with fixed values, for hosts without a resource table.
#[derive(Clone, Debug)]
pub struct FixedResources {
    pub dimens: HashMap<Dimen, i32>,
    pub strings: HashMap<Text, String>,
    pub accent_color: u32,
}

impl Default for FixedResources {
    fn default() -> Self {
        let dimens = HashMap::from([
            (Dimen::DateBoxPaddingHorizontal, 12),
            (Dimen::DateBoxPaddingVertical, 4),
            (Dimen::PillPaddingHorizontal, 14),
            (Dimen::PillPaddingVertical, 6),
            (Dimen::AccentBoxPaddingHorizontal, 16),
            (Dimen::AccentBoxPaddingVertical, 6),
            (Dimen::CustomClockLeftPadding, 40),
            (Dimen::WidgetVerticalPadding, 26),
            (Dimen::WidgetVerticalPaddingWithHeader, 36),
        ]);
        let strings = HashMap::from([
            (Text::Clock12HourSkeleton, "hm".to_owned()),
            (Text::Clock24HourSkeleton, "Hm".to_owned()),
            (Text::Logout, "Log out".to_owned()),
        ]);
        Self { dimens, strings, accent_color: 0xff1a73e8 }
    }
}

impl Resources for FixedResources {
    fn dimension_pixel_size(&self, dimen: Dimen) -> i32 {
        self.dimens.get(&dimen).copied().unwrap_or(0)
    }

    fn string(&self, text: Text) -> String {
        self.strings.get(&text).cloned().unwrap_or_default()
    }

    fn accent_color(&self) -> u32 {
        self.accent_color
    }
}

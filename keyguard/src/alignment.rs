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

//! Alignment of the custom text clock.

use crate::clock_style::ClockStyle;
use log::warn;

/// Alignment selection, as stored in `text_clock_alignment`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextClockAlignment {
    #[default]
    Start,
    Center,
}

impl TextClockAlignment {
    pub fn from_setting(value: i32) -> Self {
        match value {
            0 => Self::Start,
            1 => Self::Center,
            _ => {
                warn!("unknown text clock alignment {value}, using start");
                Self::Start
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gravity {
    Start,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlignmentStyle {
    pub gravity: Gravity,
    pub padding_start: i32,
}

impl AlignmentStyle {
    pub const CENTERED: AlignmentStyle =
        AlignmentStyle { gravity: Gravity::Center, padding_start: 0 };
}

/// Returns the gravity and start padding for text that follows the clock alignment.
///
/// Only the custom text clock can be start aligned; with any other clock the text is centered
/// without padding.
pub fn align_text_clock(
    clock: ClockStyle,
    alignment: TextClockAlignment,
    left_padding: i32,
) -> AlignmentStyle {
    match (clock, alignment) {
        (ClockStyle::CustomText, TextClockAlignment::Start) => {
            AlignmentStyle { gravity: Gravity::Start, padding_start: left_padding }
        }
        _ => AlignmentStyle::CENTERED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_text_clocks_are_centered() {
        for clock in ClockStyle::ALL.into_iter().filter(|c| *c != ClockStyle::CustomText) {
            for alignment in [TextClockAlignment::Start, TextClockAlignment::Center] {
                assert_eq!(align_text_clock(clock, alignment, 40), AlignmentStyle::CENTERED);
            }
        }
    }

    #[test]
    fn text_clock_follows_alignment() {
        assert_eq!(
            align_text_clock(ClockStyle::CustomText, TextClockAlignment::Start, 40),
            AlignmentStyle { gravity: Gravity::Start, padding_start: 40 }
        );
        assert_eq!(
            align_text_clock(ClockStyle::CustomText, TextClockAlignment::Center, 40),
            AlignmentStyle::CENTERED
        );
    }

    #[test]
    fn unknown_alignment_is_start() {
        assert_eq!(TextClockAlignment::from_setting(1), TextClockAlignment::Center);
        assert_eq!(TextClockAlignment::from_setting(2), TextClockAlignment::Start);
        assert_eq!(TextClockAlignment::from_setting(-5), TextClockAlignment::Start);
    }
}

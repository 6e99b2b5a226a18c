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

//! ARGB color helpers.

pub const WHITE: u32 = 0xffff_ffff;

fn channel(color: u32, shift: u32) -> f32 {
    ((color >> shift) & 0xff) as f32
}

/// Blends `from` towards `to` by `ratio` (0.0 gives `from`, 1.0 gives `to`), channel by
/// channel including alpha. Fractional channel values are truncated.
pub fn blend_argb(from: u32, to: u32, ratio: f32) -> u32 {
    let ratio = ratio.clamp(0.0, 1.0);
    let inverse = 1.0 - ratio;
    [24, 16, 8, 0].into_iter().fold(0, |blended, shift| {
        let value = channel(from, shift) * inverse + channel(to, shift) * ratio;
        blended | ((value as u32).min(0xff) << shift)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(blend_argb(0xff00_0000, WHITE, 0.0), 0xff00_0000);
        assert_eq!(blend_argb(0xff00_0000, WHITE, 1.0), WHITE);
    }

    #[test]
    fn midpoint_truncates() {
        // 0x7f.8 on every color channel is truncated to 0x7f.
        assert_eq!(blend_argb(0xff00_0000, WHITE, 0.5), 0xff7f_7f7f);
    }

    #[test]
    fn alpha_is_blended() {
        assert_eq!(blend_argb(0x0000_0000, 0xff00_0000, 0.25), 0x3f00_0000);
    }

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(blend_argb(0xff12_3456, WHITE, 2.0), WHITE);
        assert_eq!(blend_argb(0xff12_3456, WHITE, -1.0), 0xff12_3456);
    }
}

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

//! Styling and state of the lock screen clock, date and owner info.
//!
//! Integer settings choose which clock widget is shown, how the date is decorated and how the
//! custom text clock is aligned. [`KeyguardStatusView`] applies them to a set of widgets and
//! keeps them current as keyguard and configuration events arrive.

pub mod alignment;
pub mod clock_style;
pub mod color;
pub mod date_style;
pub mod fonts;
pub mod monitor;
pub mod patterns;
pub mod resources;
pub mod settings;
pub mod status_view;
pub mod subscription;
pub mod widgets;

pub use crate::alignment::{align_text_clock, AlignmentStyle, Gravity, TextClockAlignment};
pub use crate::clock_style::{Anchor, ClockSlot, ClockStyle, TimeRefresh, VisibilitySet};
pub use crate::date_style::{DateStyle, ResolvedDateStyle};
pub use crate::patterns::{ClockPatterns, PatternCache, PatternGenerator, SkeletonPatternGenerator};
pub use crate::settings::{SettingsProvider, SettingsSnapshot};
pub use crate::status_view::{Collaborators, KeyguardStatusView, StatusViewAttachment};
pub use crate::subscription::Subscription;

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

//! The collaborators the status view drives: the widgets themselves, owner info storage, the
//! activity manager and a timer.

use crate::alignment::AlignmentStyle;
use crate::clock_style::{Anchor, ClockFormat, ClockSlot};
use crate::date_style::{DateStyle, ResolvedDateStyle};
use crate::fonts::Typeface;
use anyhow::Result;
use std::time::Duration;

/// The inflated widgets of the lock screen status view.
pub trait StatusViewWidgets {
    /// Shows or hides the clock in `slot`.
    fn set_slot_visible(&mut self, slot: ClockSlot, visible: bool);

    /// Lays the status area out below `anchor`.
    fn set_status_area_anchor(&mut self, anchor: Anchor);

    /// Sets the line spacing multiplier of the default clock.
    fn set_clock_line_spacing(&mut self, multiplier: f32);

    /// Sets the 12 and 24 hour formats of the default clock.
    fn set_clock_format(&mut self, format: &ClockFormat);

    /// Redraws the default clock with the current time.
    fn refresh_clock(&mut self);

    /// Tells the self-drawing clock in `slot` that the time changed.
    fn notify_clock_time_changed(&mut self, slot: ClockSlot);

    fn set_clock_time_zone(&mut self, time_zone: &str);

    /// Re-reads the clock font and size settings.
    fn refresh_clock_font(&mut self);
    fn refresh_clock_size(&mut self);

    /// Re-reads the date size setting.
    fn refresh_date_size(&mut self);

    fn set_text_clock_alignment(&mut self, alignment: AlignmentStyle);
    fn set_status_area_alignment(&mut self, alignment: AlignmentStyle);

    /// Applies a date style. `style` is passed along so the status area can decide which part
    /// of the date gets the background.
    fn set_date_style(&mut self, style: DateStyle, resolved: &ResolvedDateStyle);
    fn set_date_typeface(&mut self, typeface: Typeface);

    fn set_owner_info(&mut self, text: Option<&str>);
    fn set_owner_info_visible(&mut self, visible: bool);
    fn set_owner_info_alpha(&mut self, alpha: f32);
    fn set_owner_info_alignment(&mut self, alignment: AlignmentStyle);
    fn set_owner_info_typeface(&mut self, typeface: Typeface);
    /// Size in dip.
    fn set_owner_info_text_size(&mut self, size: f32);
    /// Starts or stops scrolling owner info that does not fit.
    fn set_owner_info_marquee(&mut self, enabled: bool);

    fn set_logout_visible(&mut self, visible: bool);
    fn set_logout_text(&mut self, text: &str);
    fn set_logout_alpha(&mut self, alpha: f32);

    fn current_clock_text_color(&self) -> u32;
    fn set_clock_text_color(&mut self, color: u32);
    fn set_clock_dark_amount(&mut self, dark_amount: f32);
    fn set_status_area_dark_amount(&mut self, dark_amount: f32);

    /// Whether the status area currently shows a header.
    fn status_area_has_header(&self) -> bool;
    fn set_clock_showing_header(&mut self, showing: bool);
    fn set_notification_icons_top_margin(&mut self, margin: i32);

    /// Reloads the status area content.
    fn refresh_status_area(&mut self);
}

/// Where owner info text is stored.
pub trait OwnerInfoSource {
    /// Owner info set by the device owner. Takes precedence over per-user owner info.
    fn device_owner_info(&self) -> Option<String>;

    fn is_owner_info_enabled(&self, user_id: i32) -> bool;

    fn owner_info(&self, user_id: i32) -> Option<String>;
}

/// The remote activity manager.
pub trait ActivityManager {
    fn switch_user(&self, user_id: i32) -> Result<()>;

    fn stop_user(&self, user_id: i32, force: bool) -> Result<()>;
}

/// A single shot timer. When it fires, the host calls
/// [`on_marquee_timer`](crate::status_view::KeyguardStatusView::on_marquee_timer).
pub trait MarqueeScheduler {
    /// Starts the timer. Only called while no timer is pending.
    fn schedule(&mut self, delay: Duration);

    /// Cancels the pending timer.
    fn cancel(&mut self);
}

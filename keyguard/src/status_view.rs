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

//! The lock screen status view: clock, date and owner info, kept in line with the settings and
//! the keyguard state.

use crate::alignment::{align_text_clock, AlignmentStyle, TextClockAlignment};
use crate::clock_style::{ClockStyle, TimeRefresh};
use crate::color::{blend_argb, WHITE};
use crate::date_style::DateStyle;
use crate::fonts::typeface_for;
use crate::monitor::{
    ConfigurationController, ConfigurationListener, KeyguardUpdateMonitor,
    KeyguardUpdateMonitorCallback, USER_SYSTEM,
};
use crate::patterns::{ClockPatterns, PatternCache, PatternGenerator};
use crate::resources::{Dimen, Resources, Text};
use crate::settings::{
    Setting, SettingsProvider, LOCKOWNER_FONT_SIZE, LOCKSCREEN_CLOCK_SELECTION,
    LOCKSCREEN_DATE_SELECTION, LOCK_DATE_FONTS, LOCK_OWNERINFO_FONTS, TEXT_CLOCK_ALIGNMENT,
};
use crate::subscription::Subscription;
use crate::widgets::{ActivityManager, MarqueeScheduler, OwnerInfoSource, StatusViewWidgets};
use anyhow::{Context, Result};
use log::{debug, error, warn};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::{Rc, Weak};
use std::time::Duration;

/// How long after waking up the owner info starts scrolling.
pub const MARQUEE_DELAY: Duration = Duration::from_millis(2000);

/// Line spacing of the default clock when its style does not override it.
const DEFAULT_LINE_SPACING: f32 = 1.0;

/// An event that reached the view while it was borrowed.
type DeferredEvent = Box<dyn FnOnce(&mut KeyguardStatusView)>;

/// Everything the status view talks to.
pub struct Collaborators {
    pub widgets: Box<dyn StatusViewWidgets>,
    pub settings: Rc<dyn SettingsProvider>,
    pub resources: Rc<dyn Resources>,
    pub owner_info: Box<dyn OwnerInfoSource>,
    pub activity_manager: Box<dyn ActivityManager>,
    pub marquee: Box<dyn MarqueeScheduler>,
    pub pattern_generator: Box<dyn PatternGenerator>,
    pub monitor: Rc<KeyguardUpdateMonitor>,
}

pub struct KeyguardStatusView {
    widgets: Box<dyn StatusViewWidgets>,
    settings: Rc<dyn SettingsProvider>,
    resources: Rc<dyn Resources>,
    owner_info_source: Box<dyn OwnerInfoSource>,
    activity_manager: Box<dyn ActivityManager>,
    marquee: Box<dyn MarqueeScheduler>,
    pattern_generator: Box<dyn PatternGenerator>,
    monitor: Rc<KeyguardUpdateMonitor>,
    /// Shared with the attached callbacks, replayed once the view is free again.
    deferred: Rc<RefCell<Vec<DeferredEvent>>>,

    locale: String,
    pattern_cache: PatternCache,
    clock_style: ClockStyle,
    pulsing: bool,
    dark_amount: f32,
    text_color: u32,
    owner_info: Option<String>,
    owner_info_visible: bool,
    logout_visible: bool,
    marquee_pending: bool,
    showing_header: bool,
    /// Gap between the status area and the notification icons, without and with a header.
    icon_top_margin: i32,
    icon_top_margin_with_header: i32,
}

impl KeyguardStatusView {
    /// Creates the view and brings every widget in line with the current settings.
    pub fn new(collaborators: Collaborators, locale: impl Into<String>) -> Self {
        let Collaborators {
            widgets,
            settings,
            resources,
            owner_info,
            activity_manager,
            marquee,
            pattern_generator,
            monitor,
        } = collaborators;
        let text_color = widgets.current_clock_text_color();
        let mut view = Self {
            widgets,
            settings,
            resources,
            owner_info_source: owner_info,
            activity_manager,
            marquee,
            pattern_generator,
            monitor,
            deferred: Rc::new(RefCell::new(Vec::new())),
            locale: locale.into(),
            pattern_cache: PatternCache::new(),
            clock_style: ClockStyle::from_setting(LOCKSCREEN_CLOCK_SELECTION.default),
            pulsing: false,
            dark_amount: 0.0,
            text_color,
            owner_info: None,
            owner_info_visible: false,
            logout_visible: false,
            marquee_pending: false,
            showing_header: false,
            icon_top_margin: 0,
            icon_top_margin_with_header: 0,
        };
        view.load_bottom_margin();
        view.refresh_fonts_and_sizes();
        view.on_status_area_content_changed();
        let interactive = view.monitor.is_device_interactive();
        view.set_enable_marquee(interactive);
        view.update_all();
        view.refresh_format();
        view.update_owner_info();
        view.update_logout_view();
        view
    }

    /// Registers the view for keyguard and configuration events. The view stops receiving
    /// them when the returned attachment is dropped.
    pub fn attach(
        view: &Rc<RefCell<Self>>,
        configuration: &ConfigurationController,
    ) -> StatusViewAttachment {
        let (monitor, deferred) = {
            let view = view.borrow();
            (view.monitor.clone(), view.deferred.clone())
        };
        let callbacks = Rc::new(StatusViewCallbacks { view: Rc::downgrade(view), deferred });
        StatusViewAttachment {
            _monitor: monitor.register_callback(callbacks.clone()),
            _configuration: configuration.add_callback(callbacks),
        }
    }

    pub fn clock_style(&self) -> ClockStyle {
        self.clock_style
    }

    pub fn dark_amount(&self) -> f32 {
        self.dark_amount
    }

    pub fn is_logout_visible(&self) -> bool {
        self.logout_visible
    }

    pub fn is_owner_info_visible(&self) -> bool {
        self.owner_info_visible
    }

    pub fn is_marquee_pending(&self) -> bool {
        self.marquee_pending
    }

    /// Re-reads the clock and date settings.
    pub fn update_all(&mut self) {
        self.update_settings();
        self.update_date_styles();
    }

    /// Shows the clock chosen in the settings and anchors the status area below it.
    pub fn update_settings(&mut self) {
        self.clock_style = ClockStyle::from_setting(self.read(&LOCKSCREEN_CLOCK_SELECTION));
        let visibility = self.clock_style.visibility();
        for (slot, visible) in visibility.slots() {
            self.widgets.set_slot_visible(slot, visible);
        }
        self.widgets.set_status_area_anchor(visibility.anchor);
        let line_spacing = visibility.line_spacing.unwrap_or(DEFAULT_LINE_SPACING);
        self.widgets.set_clock_line_spacing(line_spacing);
        self.update_clock_alignment();
    }

    /// Applies the date style chosen in the settings.
    pub fn update_date_styles(&mut self) {
        let style = DateStyle::from_setting(self.read(&LOCKSCREEN_DATE_SELECTION));
        let resolved = style.resolve(self.resources.as_ref());
        self.widgets.set_date_style(style, &resolved);
        self.update_clock_alignment();
    }

    fn update_clock_alignment(&mut self) {
        let alignment = self.alignment_for(self.clock_style);
        if self.clock_style == ClockStyle::CustomText {
            self.widgets.set_text_clock_alignment(alignment);
        }
        self.widgets.set_status_area_alignment(alignment);
    }

    fn alignment_for(&self, clock: ClockStyle) -> AlignmentStyle {
        let alignment = TextClockAlignment::from_setting(self.read(&TEXT_CLOCK_ALIGNMENT));
        let left_padding = self.resources.dimension_pixel_size(Dimen::CustomClockLeftPadding);
        align_text_clock(clock, alignment, left_padding)
    }

    /// Called on every minute tick while dozing.
    pub fn doze_time_tick(&mut self) {
        self.refresh_time();
        self.widgets.refresh_status_area();
    }

    fn refresh_time(&mut self) {
        self.widgets.refresh_clock();
        let accent = self.resources.accent_color();
        let refresh = match self.pattern_cache.cached() {
            Some(patterns) => self.clock_style.time_refresh(patterns, accent),
            None => self.clock_style.time_refresh(&ClockPatterns::default(), accent),
        };
        match refresh {
            TimeRefresh::Format(format) => self.widgets.set_clock_format(&format),
            TimeRefresh::Widget(slot) => self.widgets.notify_clock_time_changed(slot),
        }
    }

    /// Resolves the clock patterns for the current locale, then reapplies the clock format.
    fn refresh_format(&mut self) {
        let skeleton_12 = self.resources.string(Text::Clock12HourSkeleton);
        let skeleton_24 = self.resources.string(Text::Clock24HourSkeleton);
        self.pattern_cache.resolve(
            self.pattern_generator.as_ref(),
            &self.locale,
            &skeleton_12,
            &skeleton_24,
        );
        self.refresh_time();
    }

    fn refresh_fonts_and_sizes(&mut self) {
        self.widgets.refresh_clock_font();
        self.widgets.set_date_typeface(typeface_for(self.read(&LOCK_DATE_FONTS)));
        self.widgets.refresh_clock_size();
        self.widgets.refresh_date_size();
        self.refresh_owner_info_size();
        self.widgets.set_owner_info_typeface(typeface_for(self.read(&LOCK_OWNERINFO_FONTS)));
    }

    fn refresh_owner_info_size(&mut self) {
        self.widgets.set_owner_info_text_size(self.read(&LOCKOWNER_FONT_SIZE) as f32);
    }

    fn load_bottom_margin(&mut self) {
        self.icon_top_margin = self.resources.dimension_pixel_size(Dimen::WidgetVerticalPadding);
        self.icon_top_margin_with_header =
            self.resources.dimension_pixel_size(Dimen::WidgetVerticalPaddingWithHeader);
    }

    fn update_owner_info(&mut self) {
        let user_id = self.user();
        let info = match self.owner_info_source.device_owner_info() {
            Some(info) => Some(info),
            None => {
                let clock = ClockStyle::from_setting(self.read(&LOCKSCREEN_CLOCK_SELECTION));
                let alignment = self.alignment_for(clock);
                self.widgets.set_owner_info_alignment(alignment);
                if self.owner_info_source.is_owner_info_enabled(user_id) {
                    self.owner_info_source.owner_info(user_id)
                } else {
                    None
                }
            }
        };
        self.widgets.set_owner_info(info.as_deref());
        self.owner_info = info;
        self.update_dark();
    }

    fn update_logout_view(&mut self) {
        self.logout_visible =
            self.monitor.is_logout_enabled() && self.monitor.current_user() != USER_SYSTEM;
        self.widgets.set_logout_visible(self.logout_visible);
        // The label would otherwise stay in the language of the system user.
        self.widgets.set_logout_text(&self.resources.string(Text::Logout));
    }

    /// Switches back to the system user and stops the current one. Failures are logged.
    pub fn on_logout_clicked(&mut self) {
        let user_id = self.user();
        if let Err(e) = self.log_out(user_id) {
            error!("Failed to logout user: {e:?}");
        }
        // The activity manager may report the switch before returning.
        self.replay_deferred();
    }

    /// Handles the events that arrived while the view was borrowed, in arrival order.
    pub fn replay_deferred(&mut self) {
        loop {
            let events = std::mem::take(&mut *self.deferred.borrow_mut());
            if events.is_empty() {
                return;
            }
            for event in events {
                event(self);
            }
        }
    }

    fn log_out(&self, user_id: i32) -> Result<()> {
        self.activity_manager
            .switch_user(USER_SYSTEM)
            .context("Failed to switch to the system user")?;
        self.activity_manager
            .stop_user(user_id, true)
            .with_context(|| format!("Failed to stop user {user_id}"))
    }

    /// Sets how far the view is into the doze transition, from 0 (awake) to 1 (dozing).
    pub fn set_dark_amount(&mut self, dark_amount: f32) {
        if self.dark_amount == dark_amount {
            return;
        }
        self.dark_amount = dark_amount;
        self.widgets.set_clock_dark_amount(dark_amount);
        self.update_dark();
    }

    fn update_dark(&mut self) {
        let dark = self.dark_amount == 1.0;
        self.widgets.set_logout_alpha(if dark { 0.0 } else { 1.0 });

        self.owner_info_visible = self.owner_info.as_deref().map_or(false, |info| !info.is_empty());
        self.widgets.set_owner_info_visible(self.owner_info_visible);
        if self.owner_info_visible {
            self.widgets.set_owner_info_alpha(1.0 - self.dark_amount);
        }

        let blended_text_color = blend_argb(self.text_color, WHITE, self.dark_amount);
        self.widgets.set_status_area_dark_amount(self.dark_amount);
        self.widgets.set_clock_text_color(blended_text_color);
    }

    pub fn set_pulsing(&mut self, pulsing: bool) {
        self.pulsing = pulsing;
    }

    fn set_enable_marquee(&mut self, enabled: bool) {
        debug!("Schedule set_enable_marquee: {}", if enabled { "Enable" } else { "Disable" });
        if enabled {
            if !self.marquee_pending {
                self.marquee_pending = true;
                self.marquee.schedule(MARQUEE_DELAY);
            }
        } else {
            if self.marquee_pending {
                self.marquee.cancel();
                self.marquee_pending = false;
            }
            self.widgets.set_owner_info_marquee(false);
        }
    }

    /// Called by the host when the timer started through [`MarqueeScheduler`] fires.
    pub fn on_marquee_timer(&mut self) {
        if !self.marquee_pending {
            warn!("Marquee timer fired with nothing pending");
            return;
        }
        self.marquee_pending = false;
        self.widgets.set_owner_info_marquee(true);
    }

    /// Called when the status area gains or loses its header.
    pub fn on_status_area_content_changed(&mut self) {
        let has_header = self.widgets.status_area_has_header();
        self.widgets.set_clock_showing_header(has_header);
        if self.showing_header == has_header {
            return;
        }
        self.showing_header = has_header;
        let margin =
            if has_header { self.icon_top_margin_with_header } else { self.icon_top_margin };
        self.widgets.set_notification_icons_top_margin(margin);
    }

    pub fn on_time_changed(&mut self) {
        self.refresh_time();
    }

    pub fn on_time_zone_changed(&mut self, time_zone: &str) {
        self.widgets.set_clock_time_zone(time_zone);
    }

    pub fn on_keyguard_visibility_changed(&mut self, showing: bool) {
        if showing {
            debug!("refresh status view showing: {showing}");
            self.refresh_time();
            self.update_owner_info();
            self.update_logout_view();
            self.refresh_fonts_and_sizes();
            self.update_date_styles();
        }
    }

    pub fn on_started_waking_up(&mut self) {
        self.set_enable_marquee(true);
    }

    pub fn on_finished_going_to_sleep(&mut self) {
        self.set_enable_marquee(false);
    }

    pub fn on_user_switch_complete(&mut self) {
        self.refresh_format();
        self.update_owner_info();
        self.update_logout_view();
        self.refresh_fonts_and_sizes();
        self.update_date_styles();
    }

    pub fn on_logout_enabled_changed(&mut self) {
        self.update_logout_view();
    }

    pub fn on_density_or_font_scale_changed(&mut self) {
        self.widgets.refresh_clock_size();
        self.refresh_owner_info_size();
        self.load_bottom_margin();
    }

    pub fn on_locale_list_changed(&mut self, locale: &str) {
        self.locale = locale.to_owned();
        self.refresh_format();
    }

    /// Writes a human readable description of the view state.
    pub fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "KeyguardStatusView:")?;
        writeln!(out, "  clock style: {:?}", self.clock_style)?;
        writeln!(out, "  owner info visible: {}", self.owner_info_visible)?;
        writeln!(out, "  pulsing: {}", self.pulsing)?;
        writeln!(out, "  dark amount: {}", self.dark_amount)?;
        writeln!(out, "  text color: {:x}", self.text_color)?;
        writeln!(out, "  logout visible: {}", self.logout_visible)?;
        writeln!(out, "  locale: {}", self.locale)
    }

    fn user(&self) -> i32 {
        self.monitor.current_user()
    }

    fn read(&self, setting: &Setting) -> i32 {
        self.settings.read(setting, self.user())
    }
}

/// Keeps a [`KeyguardStatusView`] registered for events. Dropping it unregisters the view.
#[derive(Debug)]
pub struct StatusViewAttachment {
    _monitor: Subscription,
    _configuration: Subscription,
}

impl StatusViewAttachment {
    pub fn detach(self) {}
}

/// Forwards events to a view without keeping it alive.
struct StatusViewCallbacks {
    view: Weak<RefCell<KeyguardStatusView>>,
    deferred: Rc<RefCell<Vec<DeferredEvent>>>,
}

impl StatusViewCallbacks {
    fn with_view(&self, event: &str, f: impl FnOnce(&mut KeyguardStatusView) + 'static) {
        let Some(view) = self.view.upgrade() else {
            return;
        };
        match view.try_borrow_mut() {
            Ok(mut view) => {
                view.replay_deferred();
                f(&mut view);
            }
            Err(_) => {
                debug!("Deferring {event}: status view is busy");
                self.deferred.borrow_mut().push(Box::new(f));
            }
        };
    }
}

impl KeyguardUpdateMonitorCallback for StatusViewCallbacks {
    fn on_time_changed(&self) {
        self.with_view("time change", |view| view.on_time_changed());
    }

    fn on_time_zone_changed(&self, time_zone: &str) {
        let time_zone = time_zone.to_owned();
        self.with_view("time zone change", move |view| view.on_time_zone_changed(&time_zone));
    }

    fn on_keyguard_visibility_changed(&self, showing: bool) {
        self.with_view("visibility change", move |view| {
            view.on_keyguard_visibility_changed(showing)
        });
    }

    fn on_started_waking_up(&self) {
        self.with_view("wake up", |view| view.on_started_waking_up());
    }

    fn on_finished_going_to_sleep(&self, _why: i32) {
        self.with_view("sleep", |view| view.on_finished_going_to_sleep());
    }

    fn on_user_switch_complete(&self, _user_id: i32) {
        self.with_view("user switch", |view| view.on_user_switch_complete());
    }

    fn on_logout_enabled_changed(&self) {
        self.with_view("logout change", |view| view.on_logout_enabled_changed());
    }
}

impl ConfigurationListener for StatusViewCallbacks {
    fn on_density_or_font_scale_changed(&self) {
        self.with_view("density change", |view| view.on_density_or_font_scale_changed());
    }

    fn on_locale_list_changed(&self, locale: &str) {
        let locale = locale.to_owned();
        self.with_view("locale change", move |view| view.on_locale_list_changed(&locale));
    }
}

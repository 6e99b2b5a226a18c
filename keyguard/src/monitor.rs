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

//! Sources of the lock screen lifecycle events and the device state that goes with them.

use crate::subscription::{CallbackList, Subscription};
use log::debug;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// The system user. Logging out always returns to it.
pub const USER_SYSTEM: i32 = 0;

/// A trait to be implemented by clients interested in keyguard state changes. Default
/// implementations of all functions are provided so clients only need to handle the
/// notifications they are interested in.
#[allow(unused_variables)]
pub trait KeyguardUpdateMonitorCallback {
    /// Called when the wall clock time changes, including every minute tick.
    fn on_time_changed(&self) {}

    /// Called when the time zone changes. `time_zone` is an IANA id such as `Europe/London`.
    fn on_time_zone_changed(&self, time_zone: &str) {}

    /// Called when the keyguard is shown or hidden.
    fn on_keyguard_visibility_changed(&self, showing: bool) {}

    /// Called when the device starts waking up.
    fn on_started_waking_up(&self) {}

    /// Called when the device has finished going to sleep. `why` is the power manager reason.
    fn on_finished_going_to_sleep(&self, why: i32) {}

    /// Called once a switch to `user_id` has completed.
    fn on_user_switch_complete(&self, user_id: i32) {}

    /// Called when the logout-enabled device policy changes.
    fn on_logout_enabled_changed(&self) {}
}

/// Tracks device state relevant to the lock screen and fans events out to callbacks.
pub struct KeyguardUpdateMonitor {
    callbacks: CallbackList<dyn KeyguardUpdateMonitorCallback>,
    device_interactive: Cell<bool>,
    logout_enabled: Cell<bool>,
    current_user: Cell<i32>,
}

impl Default for KeyguardUpdateMonitor {
    fn default() -> Self {
        Self {
            callbacks: CallbackList::new(),
            device_interactive: Cell::new(false),
            logout_enabled: Cell::new(false),
            current_user: Cell::new(USER_SYSTEM),
        }
    }
}

impl KeyguardUpdateMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` until the returned subscription is dropped.
    pub fn register_callback(
        &self,
        callback: Rc<dyn KeyguardUpdateMonitorCallback>,
    ) -> Subscription {
        self.callbacks.register(callback)
    }

    pub fn is_device_interactive(&self) -> bool {
        self.device_interactive.get()
    }

    pub fn is_logout_enabled(&self) -> bool {
        self.logout_enabled.get()
    }

    pub fn current_user(&self) -> i32 {
        self.current_user.get()
    }

    pub fn dispatch_time_changed(&self) {
        self.callbacks.for_each(|cb| cb.on_time_changed());
    }

    pub fn dispatch_time_zone_changed(&self, time_zone: &str) {
        debug!("time zone changed to {time_zone}");
        self.callbacks.for_each(|cb| cb.on_time_zone_changed(time_zone));
    }

    pub fn dispatch_keyguard_visibility_changed(&self, showing: bool) {
        debug!("keyguard showing: {showing}");
        self.callbacks.for_each(|cb| cb.on_keyguard_visibility_changed(showing));
    }

    pub fn dispatch_started_waking_up(&self) {
        self.device_interactive.set(true);
        self.callbacks.for_each(|cb| cb.on_started_waking_up());
    }

    pub fn dispatch_finished_going_to_sleep(&self, why: i32) {
        self.device_interactive.set(false);
        self.callbacks.for_each(|cb| cb.on_finished_going_to_sleep(why));
    }

    pub fn dispatch_user_switch_complete(&self, user_id: i32) {
        debug!("user switch to {user_id} complete");
        self.current_user.set(user_id);
        self.callbacks.for_each(|cb| cb.on_user_switch_complete(user_id));
    }

    /// Updates the logout policy. Callbacks are only told about actual changes.
    pub fn set_logout_enabled(&self, enabled: bool) {
        if self.logout_enabled.replace(enabled) != enabled {
            self.callbacks.for_each(|cb| cb.on_logout_enabled_changed());
        }
    }
}

/// A trait to be implemented by clients interested in configuration changes.
#[allow(unused_variables)]
pub trait ConfigurationListener {
    fn on_density_or_font_scale_changed(&self) {}

    /// Called with the new primary locale, such as `en_US`.
    fn on_locale_list_changed(&self, locale: &str) {}
}

/// Tracks the device configuration and notifies listeners when it changes.
pub struct ConfigurationController {
    listeners: CallbackList<dyn ConfigurationListener>,
    locale: RefCell<String>,
}

impl ConfigurationController {
    pub fn new(locale: impl Into<String>) -> Self {
        Self { listeners: CallbackList::new(), locale: RefCell::new(locale.into()) }
    }

    /// Registers `listener` until the returned subscription is dropped.
    pub fn add_callback(&self, listener: Rc<dyn ConfigurationListener>) -> Subscription {
        self.listeners.register(listener)
    }

    pub fn locale(&self) -> String {
        self.locale.borrow().clone()
    }

    pub fn notify_density_or_font_scale_changed(&self) {
        self.listeners.for_each(|l| l.on_density_or_font_scale_changed());
    }

    /// Switches to `locale`. Listeners are only told about actual changes.
    pub fn set_locale(&self, locale: &str) {
        if *self.locale.borrow() == locale {
            return;
        }
        *self.locale.borrow_mut() = locale.to_owned();
        self.listeners.for_each(|l| l.on_locale_list_changed(locale));
    }
}

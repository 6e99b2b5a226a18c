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

//! Lock screen appearance settings and where they are read from.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Settings table a key lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    Secure,
    System,
}

/// A settings key together with the value used when it is absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Setting {
    pub namespace: Namespace,
    pub key: &'static str,
    pub default: i32,
}

/// Which clock widget is shown; see `ClockStyle`.
pub const LOCKSCREEN_CLOCK_SELECTION: Setting =
    Setting { namespace: Namespace::Secure, key: "lockscreen_clock_selection", default: 2 };

/// Background and text style of the date; see `DateStyle`.
pub const LOCKSCREEN_DATE_SELECTION: Setting =
    Setting { namespace: Namespace::Secure, key: "lockscreen_date_selection", default: 0 };

/// Alignment of the custom text clock; see `TextClockAlignment`.
pub const TEXT_CLOCK_ALIGNMENT: Setting =
    Setting { namespace: Namespace::System, key: "text_clock_alignment", default: 0 };

/// Index into the font table for the date.
pub const LOCK_DATE_FONTS: Setting =
    Setting { namespace: Namespace::System, key: "lock_date_fonts", default: 28 };

/// Index into the font table for the owner info.
pub const LOCK_OWNERINFO_FONTS: Setting =
    Setting { namespace: Namespace::System, key: "lock_ownerinfo_fonts", default: 28 };

/// Owner info text size, in dip.
pub const LOCKOWNER_FONT_SIZE: Setting =
    Setting { namespace: Namespace::System, key: "lockowner_font_size", default: 18 };

/// A store of per-user integer settings.
pub trait SettingsProvider {
    /// Returns the stored value of `key` in `namespace` for `user_id`, if there is one.
    fn get_int_for_user(&self, namespace: Namespace, key: &str, user_id: i32) -> Option<i32>;

    /// Reads `setting` for `user_id`, falling back to its default when absent.
    fn read(&self, setting: &Setting, user_id: i32) -> i32 {
        self.get_int_for_user(setting.namespace, setting.key, user_id).unwrap_or(setting.default)
    }
}

/// A fixed set of settings values, shared by all users.
///
/// This is what host tools and tests use in place of the settings provider. It is stored as JSON:
///
/// ```json
/// { "secure": { "lockscreen_clock_selection": 8 }, "system": { "text_clock_alignment": 1 } }
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SettingsSnapshot {
    #[serde(default)]
    pub secure: HashMap<String, i32>,
    #[serde(default)]
    pub system: HashMap<String, i32>,
}

impl SettingsSnapshot {
    /// Loads a snapshot from the JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open {path:?}"))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse settings from {path:?}"))
    }

    /// Stores `value` for `setting`, replacing any previous value.
    pub fn set(&mut self, setting: &Setting, value: i32) {
        self.table_mut(setting.namespace).insert(setting.key.to_owned(), value);
    }

    fn table(&self, namespace: Namespace) -> &HashMap<String, i32> {
        match namespace {
            Namespace::Secure => &self.secure,
            Namespace::System => &self.system,
        }
    }

    fn table_mut(&mut self, namespace: Namespace) -> &mut HashMap<String, i32> {
        match namespace {
            Namespace::Secure => &mut self.secure,
            Namespace::System => &mut self.system,
        }
    }
}

impl SettingsProvider for SettingsSnapshot {
    fn get_int_for_user(&self, namespace: Namespace, key: &str, _user_id: i32) -> Option<i32> {
        self.table(namespace).get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn absent_settings_read_as_defaults() {
        let settings = SettingsSnapshot::default();
        assert_eq!(settings.read(&LOCKSCREEN_CLOCK_SELECTION, 0), 2);
        assert_eq!(settings.read(&LOCKSCREEN_DATE_SELECTION, 0), 0);
        assert_eq!(settings.read(&TEXT_CLOCK_ALIGNMENT, 0), 0);
        assert_eq!(settings.read(&LOCK_DATE_FONTS, 0), 28);
        assert_eq!(settings.read(&LOCK_OWNERINFO_FONTS, 0), 28);
        assert_eq!(settings.read(&LOCKOWNER_FONT_SIZE, 0), 18);
    }

    #[test]
    fn namespaces_are_separate() {
        let mut settings = SettingsSnapshot::default();
        settings.set(&LOCKSCREEN_CLOCK_SELECTION, 9);
        assert_eq!(settings.read(&LOCKSCREEN_CLOCK_SELECTION, 10), 9);
        assert_eq!(
            settings.get_int_for_user(Namespace::System, LOCKSCREEN_CLOCK_SELECTION.key, 10),
            None
        );
    }

    #[test]
    fn load_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "secure": {{ "lockscreen_date_selection": 6 }}, "system": {{ "lockowner_font_size": 22 }} }}"#
        )
        .unwrap();

        let settings = SettingsSnapshot::load(file.path()).unwrap();
        assert_eq!(settings.read(&LOCKSCREEN_DATE_SELECTION, 0), 6);
        assert_eq!(settings.read(&LOCKOWNER_FONT_SIZE, 0), 22);
        assert_eq!(settings.read(&LOCKSCREEN_CLOCK_SELECTION, 0), 2);
    }

    #[test]
    fn load_reports_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = SettingsSnapshot::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse settings"));
    }
}

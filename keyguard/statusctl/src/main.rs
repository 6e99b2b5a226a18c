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

//! A tool to inspect lock screen status styles and rollback records without a device.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use keyguard_status::alignment::{align_text_clock, TextClockAlignment};
use keyguard_status::clock_style::{ClockStyle, TimeRefresh};
use keyguard_status::date_style::DateStyle;
use keyguard_status::fonts::typeface_for;
use keyguard_status::patterns::{PatternCache, SkeletonPatternGenerator};
use keyguard_status::resources::{Dimen, FixedResources, Resources, Text};
use keyguard_status::settings::{
    SettingsProvider, SettingsSnapshot, LOCKOWNER_FONT_SIZE, LOCKSCREEN_CLOCK_SELECTION,
    LOCKSCREEN_DATE_SELECTION, LOCK_DATE_FONTS, LOCK_OWNERINFO_FONTS, TEXT_CLOCK_ALIGNMENT,
};
use log::{error, info, LevelFilter};
use rollback::RollbackInfo;
use std::fs::File;
use std::io::Read;
use std::panic;
use std::path::{Path, PathBuf};

const LOG_TAG: &str = "keyguard_statusctl";
const MAX_RECORD_SIZE_BYTES: u64 = 1024 * 1024;

#[derive(Parser)]
#[clap(name = "keyguard_statusctl")]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prints the styles the lock screen would use for a settings snapshot
    Styles {
        /// JSON settings snapshot. Every setting is at its default when omitted.
        #[clap(long)]
        settings: Option<PathBuf>,

        /// User whose settings are read
        #[clap(long, default_value_t = 0)]
        user: i32,

        /// Locale for the clock patterns
        #[clap(long, default_value = "en_US")]
        locale: String,
    },
    /// Decodes a rollback record and prints it
    Rollback {
        /// File holding exactly one encoded record
        file: PathBuf,
    },
}

fn main() {
    android_logger::init_once(
        android_logger::Config::default().with_tag(LOG_TAG).with_max_level(LevelFilter::Info),
    );

    // Redirect panic messages to logcat.
    panic::set_hook(Box::new(|panic_info| {
        error!("{}", panic_info);
    }));

    if let Err(e) = try_main() {
        error!("{:?}", e);
        eprintln!("{:?}", e);
        std::process::exit(1)
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Command::Styles { settings, user, locale } => {
            let settings = match settings {
                Some(path) => SettingsSnapshot::load(&path)?,
                None => SettingsSnapshot::default(),
            };
            command_styles(&settings, user, &locale)
        }
        Command::Rollback { file } => command_rollback(&file),
    }
}

fn command_styles(settings: &dyn SettingsProvider, user: i32, locale: &str) -> Result<()> {
    let resources = FixedResources::default();

    let clock = ClockStyle::from_setting(settings.read(&LOCKSCREEN_CLOCK_SELECTION, user));
    let visibility = clock.visibility();
    println!("clock: {:?}", clock);
    println!("  visible slot: {:?}", visibility.visible);
    println!("  anchor: {}", visibility.anchor.view_id());
    if let Some(line_spacing) = visibility.line_spacing {
        println!("  line spacing: {}", line_spacing);
    }

    let mut cache = PatternCache::new();
    let patterns = cache.resolve(
        &SkeletonPatternGenerator,
        locale,
        &resources.string(Text::Clock12HourSkeleton),
        &resources.string(Text::Clock24HourSkeleton),
    );
    match clock.time_refresh(patterns, resources.accent_color()) {
        TimeRefresh::Format(format) => {
            println!("  12 hour format: {:?}", format.format_12);
            println!("  24 hour format: {:?}", format.format_24);
        }
        TimeRefresh::Widget(slot) => println!("  drawn by: {:?}", slot),
    }

    let alignment = TextClockAlignment::from_setting(settings.read(&TEXT_CLOCK_ALIGNMENT, user));
    let left_padding = resources.dimension_pixel_size(Dimen::CustomClockLeftPadding);
    let aligned = align_text_clock(clock, alignment, left_padding);
    println!("  alignment: {:?}, start padding {}", aligned.gravity, aligned.padding_start);

    let date = DateStyle::from_setting(settings.read(&LOCKSCREEN_DATE_SELECTION, user));
    let resolved = date.resolve(&resources);
    println!("date: {:?}", date);
    match resolved.background {
        Some(background) => {
            print!("  background: {}", background.resource_name());
            if let Some(alpha) = resolved.background_alpha {
                print!(" (alpha {alpha})");
            }
            println!(", padding {}x{}", resolved.horizontal_padding, resolved.vertical_padding);
        }
        None => println!("  background: none"),
    }
    println!("  text: scale {}, bold {}", resolved.text_scale, resolved.bold);
    println!("  typeface: {}", typeface_for(settings.read(&LOCK_DATE_FONTS, user)));

    println!("owner info:");
    println!("  typeface: {}", typeface_for(settings.read(&LOCK_OWNERINFO_FONTS, user)));
    println!("  size: {}dip", settings.read(&LOCKOWNER_FONT_SIZE, user));

    info!("Printed styles for user {user}");
    Ok(())
}

fn command_rollback(path: &Path) -> Result<()> {
    let data = read_small_file(path).with_context(|| format!("Failed to read {path:?}"))?;
    let rollback = RollbackInfo::from_bytes(&data)
        .with_context(|| format!("Failed to decode rollback record from {path:?}"))?;

    println!("rollback {}", rollback.rollback_id());
    println!("  staged: {}", rollback.is_staged());
    println!("  committed session: {}", rollback.committed_session_id());
    for package in rollback.packages() {
        println!(
            "  package {}: {} -> {} ({:?})",
            package.package_name(),
            package.version_rolled_back_from.version_code,
            package.version_rolled_back_to.version_code,
            package.rollback_data_policy
        );
    }
    for cause in rollback.cause_packages() {
        println!("  caused by {} {}", cause.package_name, cause.version_code);
    }
    Ok(())
}

fn read_small_file(file: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(file)?;
    if file.metadata()?.len() > MAX_RECORD_SIZE_BYTES {
        bail!("File is too big");
    }
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_args() {
        // Check that the command parsing has been configured in a valid way.
        Args::command().debug_assert();
    }

    #[test]
    fn styles_defaults() {
        let args = Args::try_parse_from(["keyguard_statusctl", "styles"]).unwrap();
        match args.command {
            Command::Styles { settings, user, locale } => {
                assert_eq!(settings, None);
                assert_eq!(user, 0);
                assert_eq!(locale, "en_US");
            }
            Command::Rollback { .. } => panic!("parsed as rollback"),
        }
    }

    #[test]
    fn rollback_requires_file() {
        assert!(Args::try_parse_from(["keyguard_statusctl", "rollback"]).is_err());
    }
}

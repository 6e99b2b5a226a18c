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

//! Per-package records nested inside a rollback.

use crate::parcel::{Parcel, ParcelError, ParcelReader, Parcelable, Result};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// A package name together with a specific version code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VersionedPackage {
    /// Name of the package.
    pub package_name: String,
    /// The long version code of the package.
    pub version_code: i64,
}

impl VersionedPackage {
    pub fn new(package_name: impl Into<String>, version_code: i64) -> Self {
        Self { package_name: package_name.into(), version_code }
    }
}

impl Parcelable for VersionedPackage {
    fn write_to_parcel(&self, out: &mut Parcel) {
        out.write_string(Some(&self.package_name));
        out.write_i64(self.version_code);
    }

    fn read_from_parcel(input: &mut ParcelReader) -> Result<Self> {
        Ok(Self { package_name: input.read_non_null_string()?, version_code: input.read_i64()? })
    }
}

/// App data that still has to be restored for a user once the rollback is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestoreInfo {
    pub user_id: i32,
    pub app_id: i32,
    /// SELinux info of the app, used to label the restored data.
    pub se_info: String,
}

impl Parcelable for RestoreInfo {
    fn write_to_parcel(&self, out: &mut Parcel) {
        out.write_i32(self.user_id);
        out.write_i32(self.app_id);
        out.write_string(Some(&self.se_info));
    }

    fn read_from_parcel(input: &mut ParcelReader) -> Result<Self> {
        Ok(Self {
            user_id: input.read_i32()?,
            app_id: input.read_i32()?,
            se_info: input.read_non_null_string()?,
        })
    }
}

/// What happens to a package's user data when it is rolled back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromPrimitive)]
#[repr(i32)]
pub enum RollbackDataPolicy {
    /// Restore the data snapshotted when the rollback was enabled.
    #[default]
    Restore = 0,
    /// Wipe the data.
    Wipe = 1,
    /// Leave the data as it is.
    Retain = 2,
}

impl RollbackDataPolicy {
    fn from(value: i32) -> Result<Self> {
        Self::from_i32(value)
            .ok_or(ParcelError::UnknownValue { kind: "rollback data policy", value })
    }
}

/// Information about one package taking part in a rollback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageRollbackInfo {
    /// The version being rolled back from.
    pub version_rolled_back_from: VersionedPackage,
    /// The version being rolled back to.
    pub version_rolled_back_to: VersionedPackage,
    /// Users whose data still needs backing up.
    pub pending_backups: Vec<i32>,
    /// Data restores that still need to run once the rollback is applied.
    pub pending_restores: Vec<RestoreInfo>,
    pub is_apex: bool,
    /// Whether the package is an APK shipped inside an APEX.
    pub is_apk_in_apex: bool,
    /// Users whose data has been snapshotted.
    pub snapshotted_users: Vec<i32>,
    pub rollback_data_policy: RollbackDataPolicy,
}

impl PackageRollbackInfo {
    /// Creates a record for an ordinary APK with nothing pending.
    pub fn new(from: VersionedPackage, to: VersionedPackage) -> Self {
        Self {
            version_rolled_back_from: from,
            version_rolled_back_to: to,
            pending_backups: Vec::new(),
            pending_restores: Vec::new(),
            is_apex: false,
            is_apk_in_apex: false,
            snapshotted_users: Vec::new(),
            rollback_data_policy: RollbackDataPolicy::default(),
        }
    }

    /// Name of the package being rolled back.
    pub fn package_name(&self) -> &str {
        &self.version_rolled_back_from.package_name
    }
}

impl Parcelable for PackageRollbackInfo {
    fn write_to_parcel(&self, out: &mut Parcel) {
        out.write_typed_object(&self.version_rolled_back_from);
        out.write_typed_object(&self.version_rolled_back_to);
        out.write_int_array(&self.pending_backups);
        out.write_typed_list(&self.pending_restores);
        out.write_bool(self.is_apex);
        out.write_bool(self.is_apk_in_apex);
        out.write_int_array(&self.snapshotted_users);
        out.write_i32(self.rollback_data_policy as i32);
    }

    fn read_from_parcel(input: &mut ParcelReader) -> Result<Self> {
        Ok(Self {
            version_rolled_back_from: read_version(input)?,
            version_rolled_back_to: read_version(input)?,
            pending_backups: input.read_int_array()?,
            pending_restores: input.read_typed_list()?,
            is_apex: input.read_bool()?,
            is_apk_in_apex: input.read_bool()?,
            snapshotted_users: input.read_int_array()?,
            rollback_data_policy: RollbackDataPolicy::from(input.read_i32()?)?,
        })
    }
}

fn read_version(input: &mut ParcelReader) -> Result<VersionedPackage> {
    let offset = input.position();
    input.read_typed_object()?.ok_or(ParcelError::NullObject(offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parcel::{from_bytes, to_bytes};

    fn apex_info() -> PackageRollbackInfo {
        PackageRollbackInfo {
            pending_backups: vec![0, 10],
            pending_restores: vec![RestoreInfo {
                user_id: 10,
                app_id: 10123,
                se_info: "default:targetSdkVersion=34".to_owned(),
            }],
            is_apex: true,
            snapshotted_users: vec![0],
            rollback_data_policy: RollbackDataPolicy::Retain,
            ..PackageRollbackInfo::new(
                VersionedPackage::new("com.android.tzdata", 340_090_000),
                VersionedPackage::new("com.android.tzdata", 330_000_000),
            )
        }
    }

    #[test]
    fn package_name_comes_from_rolled_back_version() {
        assert_eq!(apex_info().package_name(), "com.android.tzdata");
    }

    #[test]
    fn package_info_survives_parcel() {
        let info = apex_info();
        assert_eq!(from_bytes::<PackageRollbackInfo>(&to_bytes(&info)), Ok(info));
    }

    #[test]
    fn unknown_data_policy() {
        let mut bytes = to_bytes(&apex_info());
        let len = bytes.len();
        bytes[len - 4..].copy_from_slice(&7i32.to_le_bytes());
        assert_eq!(
            from_bytes::<PackageRollbackInfo>(&bytes),
            Err(ParcelError::UnknownValue { kind: "rollback data policy", value: 7 })
        );
    }

    #[test]
    fn null_version_is_rejected() {
        let mut parcel = Parcel::new();
        parcel.write_i32(0);
        assert_eq!(
            from_bytes::<PackageRollbackInfo>(parcel.as_bytes()),
            Err(ParcelError::NullObject(0))
        );
    }
}

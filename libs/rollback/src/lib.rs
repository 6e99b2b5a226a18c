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

//! Information about a set of packages that can be, or already have been, rolled back together,
//! and its parcel encoding.

pub mod package;
pub mod parcel;

pub use crate::package::{PackageRollbackInfo, RestoreInfo, RollbackDataPolicy, VersionedPackage};
pub use crate::parcel::{Parcel, ParcelError, ParcelReader, Parcelable};

use log::debug;

/// Session ID used when no install session has been committed for a rollback.
pub const INVALID_SESSION_ID: i32 = -1;

/// A rollback record. Built once by the rollback manager and never modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollbackInfo {
    rollback_id: i32,
    packages: Vec<PackageRollbackInfo>,
    cause_packages: Vec<VersionedPackage>,
    is_staged: bool,
    committed_session_id: i32,
}

impl RollbackInfo {
    /// Creates a rollback that has not been committed yet.
    pub fn new(rollback_id: i32, packages: Vec<PackageRollbackInfo>, is_staged: bool) -> Self {
        Self::with_commit(rollback_id, packages, is_staged, Vec::new(), INVALID_SESSION_ID)
    }

    /// Creates a rollback, including the packages that caused it and the committed session.
    pub fn with_commit(
        rollback_id: i32,
        packages: Vec<PackageRollbackInfo>,
        is_staged: bool,
        cause_packages: Vec<VersionedPackage>,
        committed_session_id: i32,
    ) -> Self {
        Self { rollback_id, packages, cause_packages, is_staged, committed_session_id }
    }

    /// Returns a unique identifier for this rollback.
    pub fn rollback_id(&self) -> i32 {
        self.rollback_id
    }

    /// Returns the packages that are rolled back.
    pub fn packages(&self) -> &[PackageRollbackInfo] {
        &self.packages
    }

    /// Returns true if this rollback requires a reboot to take effect after being committed.
    pub fn is_staged(&self) -> bool {
        self.is_staged
    }

    /// Returns the session ID of the committed rollback, for staged rollbacks that have been
    /// committed. [`INVALID_SESSION_ID`] otherwise.
    pub fn committed_session_id(&self) -> i32 {
        self.committed_session_id
    }

    /// Returns the package versions that motivated this rollback, as provided when it was
    /// committed.
    pub fn cause_packages(&self) -> &[VersionedPackage] {
        &self.cause_packages
    }

    /// Encodes the rollback into its wire form.
    pub fn to_bytes(&self) -> Vec<u8> {
        parcel::to_bytes(self)
    }

    /// Decodes a rollback from exactly the bytes produced by [`RollbackInfo::to_bytes`].
    pub fn from_bytes(data: &[u8]) -> parcel::Result<Self> {
        parcel::from_bytes(data).map_err(|e| {
            debug!("Rejected rollback record of {} bytes: {e}", data.len());
            e
        })
    }
}

impl Parcelable for RollbackInfo {
    fn write_to_parcel(&self, out: &mut Parcel) {
        out.write_i32(self.rollback_id);
        out.write_typed_list(&self.packages);
        out.write_bool(self.is_staged);
        out.write_typed_list(&self.cause_packages);
        out.write_i32(self.committed_session_id);
    }

    fn read_from_parcel(input: &mut ParcelReader) -> parcel::Result<Self> {
        Ok(Self {
            rollback_id: input.read_i32()?,
            packages: input.read_typed_list()?,
            is_staged: input.read_bool()?,
            cause_packages: input.read_typed_list()?,
            committed_session_id: input.read_i32()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_uncommitted() {
        let info = RollbackInfo::new(7, vec![], true);
        assert_eq!(info.rollback_id(), 7);
        assert!(info.is_staged());
        assert!(info.cause_packages().is_empty());
        assert_eq!(info.committed_session_id(), INVALID_SESSION_ID);
    }

    #[test]
    fn field_order_on_the_wire() {
        let info = RollbackInfo::with_commit(0x11, vec![], true, vec![], 0x22);
        assert_eq!(
            info.to_bytes(),
            vec![
                0x11, 0, 0, 0, // rollback_id
                0, 0, 0, 0, // packages
                1, // is_staged
                0, 0, 0, 0, // cause_packages
                0x22, 0, 0, 0, // committed_session_id
            ]
        );
    }

    #[test]
    fn record_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RollbackInfo>();
    }
}

// Copyright 2025 dentsusoken
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

use crate::error::{PackagingError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of package formats the layout rules know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageFormat {
    Rpm,
    Deb,
    Dmg,
    Msi,
    Swix,
    Svr4,
    Ips,
}

impl PackageFormat {
    pub const ALL: [PackageFormat; 7] = [
        PackageFormat::Rpm,
        PackageFormat::Deb,
        PackageFormat::Dmg,
        PackageFormat::Msi,
        PackageFormat::Swix,
        PackageFormat::Svr4,
        PackageFormat::Ips,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageFormat::Rpm => "rpm",
            PackageFormat::Deb => "deb",
            PackageFormat::Dmg => "dmg",
            PackageFormat::Msi => "msi",
            PackageFormat::Swix => "swix",
            PackageFormat::Svr4 => "svr4",
            PackageFormat::Ips => "ips",
        }
    }

    /// File suffix of a built package in this format.
    pub fn file_extension(&self) -> &'static str {
        match self {
            PackageFormat::Rpm => ".rpm",
            PackageFormat::Deb => ".deb",
            PackageFormat::Dmg => ".dmg",
            PackageFormat::Msi => ".msi",
            PackageFormat::Swix => ".swix",
            PackageFormat::Svr4 => ".pkg.gz",
            PackageFormat::Ips => ".p5p",
        }
    }

    /// Returns the format whose package suffix terminates `path`, if any.
    pub fn from_file_name(path: &str) -> Option<PackageFormat> {
        Self::ALL
            .into_iter()
            .find(|format| path.ends_with(format.file_extension()))
    }
}

impl FromStr for PackageFormat {
    type Err = PackagingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rpm" => Ok(PackageFormat::Rpm),
            "deb" => Ok(PackageFormat::Deb),
            "dmg" => Ok(PackageFormat::Dmg),
            "msi" => Ok(PackageFormat::Msi),
            "swix" => Ok(PackageFormat::Swix),
            "svr4" => Ok(PackageFormat::Svr4),
            "ips" => Ok(PackageFormat::Ips),
            _ => Err(PackagingError::UnknownPackageFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// RPM signature scheme expected by the signing tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureFormat {
    V3,
    V4,
}

impl std::fmt::Display for SignatureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let format = match self {
            SignatureFormat::V3 => "v3",
            SignatureFormat::V4 => "v4",
        };
        write!(f, "{format}")
    }
}

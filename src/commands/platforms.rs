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

use crate::commands::print_json;
use crate::error::Result;
use crate::models::PackageFormat;
use crate::platforms::{PlatformCatalog, PlatformEntry};
use comfy_table::{Cell, CellAlignment, Table};
use std::str::FromStr;

pub struct PlatformsCommand<'a> {
    catalog: &'a PlatformCatalog,
}

impl<'a> PlatformsCommand<'a> {
    pub fn new(catalog: &'a PlatformCatalog) -> Result<Self> {
        Ok(Self { catalog })
    }

    pub fn execute(&self, format: Option<&str>, json: bool) -> Result<()> {
        let format = format.map(PackageFormat::from_str).transpose()?;
        let entries: Vec<&PlatformEntry> = self
            .catalog
            .entries()
            .iter()
            .filter(|entry| format.is_none_or(|format| entry.package_format == format))
            .collect();

        if json {
            return print_json(&entries);
        }

        if entries.is_empty() {
            println!("No platforms found.");
            return Ok(());
        }

        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
        table.set_header(vec![
            Cell::new("Platform"),
            Cell::new("Version"),
            Cell::new("Codename"),
            Cell::new("Architectures"),
            Cell::new("Format"),
            Cell::new("Signature"),
            Cell::new("Repo"),
        ]);

        for entry in &entries {
            table.add_row(vec![
                Cell::new(entry.platform),
                Cell::new(entry.version).set_alignment(CellAlignment::Right),
                Cell::new(entry.codename.unwrap_or("-")),
                Cell::new(entry.architectures.join(", ")),
                Cell::new(entry.package_format),
                Cell::new(
                    entry
                        .signature_format
                        .map(|signature| signature.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::new(if entry.repo { "yes" } else { "no" }),
            ]);
        }

        println!("{table}");
        println!("\nTotal: {} platform versions", table.row_count());
        Ok(())
    }
}

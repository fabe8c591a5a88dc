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

//! Artifact and repository layout.

pub mod debian;
pub mod repository;
pub mod resolver;
pub mod shared;

pub use debian::debian_component_from_path;
pub use repository::{LEGACY_REPO_NAMES, NEW_LAYOUT_REPO_NAMES, RepositoryNames};
pub use resolver::{ARTIFACTS_PREFIX, PathRequest, PathResolver, REPO_CONFIGS_PREFIX, REPOS_PREFIX};
pub use shared::join_segments;

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

/// Join path segments with `/`, independent of the host platform.
///
/// Layout paths are shared with remote hosts and URLs, so they are built as
/// strings rather than `PathBuf`s. Empty segments are skipped and duplicate
/// separators at segment boundaries collapse; a leading `/` on the first
/// segment is preserved.
pub fn join_segments<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut output = String::new();

    for segment in segments {
        let segment = segment.as_ref();
        if output.is_empty() && segment.starts_with('/') {
            output.push('/');
        }

        let trimmed = segment.trim_matches('/');
        if trimmed.is_empty() {
            continue;
        }
        if !output.is_empty() && !output.ends_with('/') {
            output.push('/');
        }
        output.push_str(trimmed);
    }

    output
}

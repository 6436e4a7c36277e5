// This file is part of the terraform-provider-meraki project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
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

/// Target of the `rel` relation of a `Link` header
///
/// `<https://api.meraki.com/api/v1/...?startingAfter=X>; rel=next, <...>; rel=first`
pub(crate) fn link_target<'a>(header: &'a str, rel: &str) -> Option<&'a str> {
    header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts
            .next()?
            .trim()
            .strip_prefix('<')?
            .strip_suffix('>')?;
        parts
            .filter_map(|param| param.trim().strip_prefix("rel="))
            .any(|value| value.trim_matches('"').eq_ignore_ascii_case(rel))
            .then_some(target)
    })
}

#[cfg(test)]
mod tests {
    use super::link_target;

    const HEADER: &str = "<https://n1.meraki.com/api/v1/organizations/1/networks?perPage=2>; rel=first, \
        <https://n1.meraki.com/api/v1/organizations/1/networks?perPage=2&startingAfter=N_2>; rel=next, \
        <https://n1.meraki.com/api/v1/organizations/1/networks?perPage=2&endingBefore=zzz>; rel=\"last\"";

    #[test]
    fn next_link_is_found() {
        assert_eq!(
            link_target(HEADER, "next"),
            Some("https://n1.meraki.com/api/v1/organizations/1/networks?perPage=2&startingAfter=N_2")
        );
        assert_eq!(
            link_target(HEADER, "last"),
            Some("https://n1.meraki.com/api/v1/organizations/1/networks?perPage=2&endingBefore=zzz")
        );
    }

    #[test]
    fn missing_or_malformed_links() {
        assert_eq!(link_target(HEADER, "prev"), None);
        assert_eq!(link_target("https://x; rel=next", "next"), None);
        assert_eq!(link_target("", "next"), None);
    }
}

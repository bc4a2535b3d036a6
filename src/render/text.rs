// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::Value;

/// Payload keys, in order, whose string value summarizes a block for text output.
const SUMMARY_KEYS: [&str; 5] = ["title", "text", "caption", "src", "url"];

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if text.chars().count() <= max_len {
        return text.to_owned();
    }
    let mut out = text.chars().take(max_len - 1).collect::<String>();
    out.push('…');
    out
}

/// A one-line summary of an opaque payload: a bare string, or the first known string field.
pub(crate) fn payload_summary(payload: &Value) -> Option<String> {
    let raw = match payload {
        Value::String(text) => text.as_str(),
        Value::Object(map) => SUMMARY_KEYS.iter().find_map(|key| map.get(*key)?.as_str())?,
        _ => return None,
    };
    let line = raw.lines().find(|line| !line.trim().is_empty())?.trim();
    Some(line.to_owned())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{payload_summary, truncate_with_ellipsis};

    #[test]
    fn truncate_with_ellipsis_handles_small_widths() {
        assert_eq!(truncate_with_ellipsis("hello", 0), "");
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
        assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
        assert_eq!(truncate_with_ellipsis("αβγ", 2), "α…");
    }

    #[test]
    fn payload_summary_picks_first_known_field() {
        assert_eq!(payload_summary(&json!("plain")), Some("plain".to_owned()));
        assert_eq!(
            payload_summary(&json!({ "src": "fn main() {}", "title": "Entry" })),
            Some("Entry".to_owned())
        );
        assert_eq!(payload_summary(&json!({ "text": "\n  second line\n" })), Some("second line".to_owned()));
        assert_eq!(payload_summary(&json!({ "width": 3 })), None);
        assert_eq!(payload_summary(&json!(null)), None);
    }
}

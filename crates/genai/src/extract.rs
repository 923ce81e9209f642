//! JSON extraction from free-form model replies.
//!
//! Models are asked to return "ONLY valid JSON" but routinely wrap the
//! payload in prose or Markdown code fences. Two strategies run in
//! order: a greedy first-`{`-to-last-`}` slice, then code-fence
//! splitting (preferring a ` ```json ` fence over a bare one).

/// Extract the JSON substring from a raw model reply.
///
/// Returns `None` when neither strategy finds anything; the caller
/// treats that the same as a parse failure.
pub fn extract_json(text: &str) -> Option<&str> {
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return Some(&text[start..=end]);
        }
    }
    extract_fenced(text)
}

/// Take the contents of the first Markdown code fence, preferring a
/// `json`-tagged fence.
fn extract_fenced(text: &str) -> Option<&str> {
    for marker in ["```json", "```"] {
        if let Some((_, rest)) = text.split_once(marker) {
            if let Some((inner, _)) = rest.split_once("```") {
                return Some(inner.trim());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_object_passes_through() {
        let text = r#"{"clarity": 72}"#;
        assert_eq!(extract_json(text), Some(r#"{"clarity": 72}"#));
    }

    #[test]
    fn prose_around_the_object_is_stripped() {
        let text = "Here is your analysis:\n{\"clarity\": 72}\nHope that helps!";
        assert_eq!(extract_json(text), Some("{\"clarity\": 72}"));
    }

    #[test]
    fn slice_is_greedy_across_nested_objects() {
        let text = r#"{"a": {"b": 1}} trailing {"c": 2}"#;
        // First `{` through last `}` -- the caller's parse decides validity.
        assert_eq!(extract_json(text), Some(r#"{"a": {"b": 1}} trailing {"c": 2}"#));
    }

    #[test]
    fn fenced_content_without_braces_uses_the_fence_strategy() {
        let text = "```json\n[1, 2, 3]\n```";
        assert_eq!(extract_json(text), Some("[1, 2, 3]"));

        let text = "```\n[4]\n```";
        assert_eq!(extract_json(text), Some("[4]"));
    }

    #[test]
    fn no_json_yields_none() {
        assert_eq!(extract_json("I cannot answer that."), None);
        assert_eq!(extract_json(""), None);
    }

    #[test]
    fn lone_brace_is_not_a_slice() {
        assert_eq!(extract_json("so {"), None);
        assert_eq!(extract_json("} so"), None);
    }
}

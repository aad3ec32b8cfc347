//! Locates a JSON object embedded in free-form model output.
//!
//! Models wrap their JSON in prose or code fences often enough that parsing the raw reply
//! directly is not an option. The scanner returns the first balanced `{ … }` span, tracking
//! string literals so braces inside strings do not move the depth counter.

use crate::headlines::NormalizeError;

/// Returns the first balanced top-level `{ … }` span in `text`, braces included.
///
/// Fails with `NormalizeError::NoJson` when the text has no `{`, or when the first object
/// never closes. The returned slice is not validated as JSON; that is the parser's job.
pub fn extract_json_object(text: &str) -> Result<&str, NormalizeError> {
    let start = text.find('{').ok_or(NormalizeError::NoJson)?;

    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Ok(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    Err(NormalizeError::NoJson)
}

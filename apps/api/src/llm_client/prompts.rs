// Shared prompt fragments.
// Each feature that needs completion calls defines its own prompts.rs alongside it.
// This file contains the cross-cutting pieces.

/// Persona line opening every headline prompt.
pub const MARKETING_EXPERT_PERSONA: &str = "You are an expert in marketing and content creation, \
    specializing in writing and analyzing headlines for effectiveness.";

/// Appended to prompts whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with the JSON object only. \
    Do NOT use markdown code fences. \
    Do NOT include explanations before or after the JSON.";

/// Appended to prompts whose reply is parsed line by line.
pub const LINES_ONLY_INSTRUCTION: &str = "Put each headline on its own line. \
    Do NOT add a title, introduction, explanations or closing remarks.";

/// Fills `{name}` placeholders in a prompt template in a single pass.
///
/// Substituted values are never rescanned, so user text containing `{category}` or a JSON
/// brace stays verbatim. Braces that do not name a known placeholder are copied through.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let placeholder = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match placeholder {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

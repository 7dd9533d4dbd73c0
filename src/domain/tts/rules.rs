/// A single literal find/replace pair parsed from a `key=value` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PronunciationRule {
    pub find: String,
    pub replace: String,
}

/// Parse a multi-line rules block into ordered rules.
///
/// Lines without `=` or with an empty key or value after trimming are skipped.
/// When a line holds more than one `=`, the value ends at the second one.
pub fn parse_rules(rules: &str) -> Vec<PronunciationRule> {
    rules
        .lines()
        .filter_map(|line| {
            let mut parts = line.split('=');
            let find = parts.next()?.trim();
            let replace = parts.next()?.trim();

            if find.is_empty() || replace.is_empty() {
                return None;
            }

            Some(PronunciationRule {
                find: find.to_string(),
                replace: replace.to_string(),
            })
        })
        .collect()
}

/// Apply pronunciation rules to the text in declaration order.
///
/// Each rule rewrites every non-overlapping occurrence of its key, so a later
/// rule sees the output of the earlier ones.
pub fn apply_rules(text: &str, rules: Option<&str>) -> String {
    let Some(rules) = rules else {
        return text.to_string();
    };

    parse_rules(rules)
        .iter()
        .fold(text.to_string(), |acc, rule| acc.replace(&rule.find, &rule.replace))
}

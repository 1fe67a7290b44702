//! The formatting pipeline applied to extracted text.

use crate::models::FormatRules;

impl FormatRules {
    /// Transform `text` in a fixed order:
    ///
    /// 1. every replacement, in list order, each on the previous output
    /// 2. every trim set, in list order, stripping matching chars from both ends
    /// 3. the suffix, when non-empty
    /// 4. the prefix, when non-empty
    ///
    /// Prefix and suffix go last so they are never trimmed or replaced.
    /// Replacements with an empty `from` are skipped.
    pub fn apply(&self, text: &str) -> String {
        let mut content = text.to_string();

        for replacement in &self.replacements {
            if replacement.from.is_empty() {
                continue;
            }
            content = content.replace(&replacement.from, &replacement.to);
        }

        for set in &self.trim {
            content = content
                .trim_matches(|c: char| set.contains(c))
                .to_string();
        }

        if !self.suffix.is_empty() {
            content.push_str(&self.suffix);
        }

        if !self.prefix.is_empty() {
            content.insert_str(0, &self.prefix);
        }

        content
    }

    /// True when applying the rules can never change the text.
    pub fn is_empty(&self) -> bool {
        self.replacements.iter().all(|r| r.from.is_empty())
            && self.trim.iter().all(String::is_empty)
            && self.prefix.is_empty()
            && self.suffix.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Replacement;

    fn replace(from: &str, to: &str) -> Replacement {
        Replacement {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn test_empty_rules_are_identity() {
        let rules = FormatRules::default();
        assert!(rules.is_empty());
        let once = rules.apply("  Hello world\n");
        assert_eq!(once, "  Hello world\n");
        assert_eq!(rules.apply(&once), once);
    }

    #[test]
    fn test_replacement_all_occurrences() {
        let rules = FormatRules {
            replacements: vec![replace(" ", "_")],
            ..Default::default()
        };
        assert_eq!(rules.apply("Hello big world"), "Hello_big_world");
    }

    #[test]
    fn test_replacements_chain_in_order() {
        let rules = FormatRules {
            replacements: vec![replace("a", "b"), replace("b", "c")],
            ..Default::default()
        };
        assert_eq!(rules.apply("ab"), "cc");

        let reversed = FormatRules {
            replacements: vec![replace("b", "c"), replace("a", "b")],
            ..Default::default()
        };
        assert_eq!(reversed.apply("ab"), "bc");
    }

    #[test]
    fn test_replacement_idempotent_once_exhausted() {
        let rules = FormatRules {
            replacements: vec![replace("\n", " ")],
            ..Default::default()
        };
        let once = rules.apply("a\nb\nc");
        assert_eq!(rules.apply(&once), once);
    }

    #[test]
    fn test_empty_from_is_skipped() {
        let rules = FormatRules {
            replacements: vec![replace("", "x")],
            ..Default::default()
        };
        assert!(rules.is_empty());
        assert_eq!(rules.apply("abc"), "abc");
    }

    #[test]
    fn test_trim_sets_apply_in_order() {
        let rules = FormatRules {
            trim: vec![" ".to_string(), "\"".to_string()],
            ..Default::default()
        };
        assert_eq!(rules.apply("  \"quoted\"  "), "quoted");

        let only_quotes = FormatRules {
            trim: vec!["\"".to_string()],
            ..Default::default()
        };
        assert_eq!(only_quotes.apply("  \"quoted\"  "), "  \"quoted\"  ");
    }

    #[test]
    fn test_trim_set_is_a_character_set() {
        let rules = FormatRules {
            trim: vec!["\n\t ".to_string()],
            ..Default::default()
        };
        assert_eq!(rules.apply("\n\t  text \t\n"), "text");
    }

    #[test]
    fn test_prefix_and_suffix_are_not_trimmed() {
        let rules = FormatRules {
            replacements: vec![replace("x", "y")],
            trim: vec![" ".to_string()],
            prefix: " x".to_string(),
            suffix: "x ".to_string(),
        };
        assert_eq!(rules.apply("  xax  "), " xyayx ");
    }

    #[test]
    fn test_replace_runs_before_trim() {
        let rules = FormatRules {
            replacements: vec![replace("-", " ")],
            trim: vec![" ".to_string()],
            ..Default::default()
        };
        assert_eq!(rules.apply("--title--"), "title");
    }
}

/// One keyword heuristic: a source type whose lower-cased name contains any of
/// `keywords` (and, if `qualifiers` is non-empty, any of those too) resolves to
/// the mapping registered under `mapping_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyRule {
    pub keywords: &'static [&'static str],
    pub qualifiers: &'static [&'static str],
    pub mapping_key: &'static str,
}

impl FuzzyRule {
    pub const fn new(keywords: &'static [&'static str], mapping_key: &'static str) -> Self {
        Self {
            keywords,
            qualifiers: &[],
            mapping_key,
        }
    }

    pub const fn qualified(
        keywords: &'static [&'static str],
        qualifiers: &'static [&'static str],
        mapping_key: &'static str,
    ) -> Self {
        Self {
            keywords,
            qualifiers,
            mapping_key,
        }
    }

    /// `lowered` must already be lower-case.
    pub fn matches(&self, lowered: &str) -> bool {
        let contains_any = |words: &[&str]| words.iter().any(|w| lowered.contains(w));
        contains_any(self.keywords) && (self.qualifiers.is_empty() || contains_any(self.qualifiers))
    }
}

/// Ordered; the first matching rule wins.
pub const DEFAULT_FUZZY_RULES: &[FuzzyRule] = &[
    FuzzyRule::new(&["webhook"], "n8n-nodes-base.webhook"),
    FuzzyRule::new(&["http", "request"], "n8n-nodes-base.httpRequest"),
    FuzzyRule::new(&["email", "smtp"], "n8n-nodes-base.emailSend"),
    FuzzyRule::new(&["schedule", "cron"], "n8n-nodes-base.scheduleTrigger"),
    FuzzyRule::new(&["code", "javascript", "function"], "n8n-nodes-base.code"),
    FuzzyRule::new(&["if", "condition"], "n8n-nodes-base.if"),
    FuzzyRule::new(&["set", "variable"], "n8n-nodes-base.set"),
    FuzzyRule::new(
        &["openai", "gpt", "chat", "llm", "anthropic", "langchain"],
        "n8n-nodes-base.openAi",
    ),
    FuzzyRule::new(
        &["database", "postgres", "mysql", "sql", "mongo"],
        "n8n-nodes-base.postgres",
    ),
    FuzzyRule::qualified(&["file"], &["write", "save"], "n8n-nodes-base.writeBinaryFile"),
    FuzzyRule::qualified(&["file"], &["read", "load"], "n8n-nodes-base.readBinaryFile"),
];

/// Keyword fallback for source types the registry has no exact entry for.
///
/// Deliberately lossy: `"n8n-nodes-base.spotify"` contains `"if"` and resolves
/// to the conditional mapping.
#[derive(Debug, Clone)]
pub struct FuzzyResolver {
    rules: Vec<FuzzyRule>,
}

impl Default for FuzzyResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_RULES.to_vec())
    }
}

impl FuzzyResolver {
    pub fn new(rules: Vec<FuzzyRule>) -> Self {
        Self { rules }
    }

    /// A resolver that never matches.
    pub fn disabled() -> Self {
        Self::new(Vec::new())
    }

    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }

    /// The first rule matching `source_type`, compared case-insensitively.
    pub fn rule_for(&self, source_type: &str) -> Option<&FuzzyRule> {
        let lowered = source_type.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }
}

//! Query construction for the two search variants
//!
//! Terms are kept as a list until rendering. The rendered string is always
//! bound as a statement parameter, never spliced into SQL.

/// Marker the engine reads as "match lexemes starting with this term"
pub const PREFIX_MARKER: &str = ":*";
/// Explicit AND operator of the operator query syntax
pub const AND_OPERATOR: &str = "&";

/// Natural-language query handed to `plainto_tsquery` as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainQuery {
    expression: String,
}

impl PlainQuery {
    pub fn new(expression: &str) -> Self {
        Self { expression: expression.to_string() }
    }

    pub fn as_str(&self) -> &str {
        &self.expression
    }
}

/// Where the prefix marker goes in a multi-term prefix query / 前缀标记位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixMode {
    /// Marker appended once after the joined terms; only the final term is
    /// prefix-matched, earlier terms match whole lexemes. The default.
    #[default]
    LastTerm,
    /// Marker appended to each term
    EveryTerm,
}

/// Explicit-operator query for `to_tsquery`: terms AND-ed, prefix marked / 显式运算符查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixQuery {
    terms: Vec<String>,
    mode: PrefixMode,
}

impl PrefixQuery {
    /// Split on whitespace; an expression with no words stays a single term / 按空白拆分
    pub fn new(expression: &str) -> Self {
        let mut terms: Vec<String> = expression.split_whitespace().map(str::to_string).collect();
        if terms.is_empty() {
            terms.push(expression.to_string());
        }
        Self { terms, mode: PrefixMode::default() }
    }

    pub fn with_mode(mut self, mode: PrefixMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn mode(&self) -> PrefixMode {
        self.mode
    }

    /// Render to the operator syntax. Reserved characters inside terms are
    /// left untouched; the engine rejects them.
    pub fn render(&self) -> String {
        match self.mode {
            PrefixMode::LastTerm => {
                let mut rendered = self.terms.join(AND_OPERATOR);
                rendered.push_str(PREFIX_MARKER);
                rendered
            }
            PrefixMode::EveryTerm => self
                .terms
                .iter()
                .map(|t| format!("{}{}", t, PREFIX_MARKER))
                .collect::<Vec<_>>()
                .join(AND_OPERATOR),
        }
    }
}

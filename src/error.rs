//! Error kinds surfaced by the post search adapter / 搜索适配器错误类型

use thiserror::Error;

/// Unknown text search configuration / 未知的文本搜索配置
pub const SQLSTATE_UNDEFINED_OBJECT: &str = "42704";
/// Malformed or over-qualified name, or unparsable tsquery / 语法错误
pub const SQLSTATE_SYNTAX_ERROR: &str = "42601";
/// Configuration name that is not a valid identifier / 名称语法无效
pub const SQLSTATE_INVALID_NAME: &str = "42602";
/// Schema part of a qualified configuration name does not exist / 模式不存在
pub const SQLSTATE_INVALID_SCHEMA: &str = "3F000";
/// Byte sequence the server encoding refuses (NUL) / 非法字节序列
pub const SQLSTATE_INVALID_BYTES: &str = "22021";

#[derive(Debug, Error)]
pub enum SearchError {
    /// Input violates a stated constraint
    #[error("validation failed: {0}")]
    Validation(String),

    /// The engine does not know the requested search configuration
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The constructed operator query was rejected by the engine
    #[error("query syntax error: {0}")]
    QuerySyntax(String),

    /// Connectivity or transaction failure
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Which statement failed; decides what a syntax error means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    /// Only the configuration name can be malformed (`to_tsvector`,
    /// `plainto_tsquery`, `$1::regconfig`)
    ConfigName,
    /// `to_tsquery`: a syntax error may come from the operator query
    OperatorQuery,
    /// Plain storage work: transactions, inserts, counts
    Storage,
}

/// Which kind a failed storage call maps to, keyed on SQLSTATE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StorageFailure {
    UnknownConfig,
    Syntax,
    BadInput,
    Unavailable,
}

pub(crate) fn classify_sqlstate(stage: Stage, code: Option<&str>) -> StorageFailure {
    match (stage, code) {
        (_, Some(SQLSTATE_UNDEFINED_OBJECT | SQLSTATE_INVALID_NAME | SQLSTATE_INVALID_SCHEMA)) => {
            StorageFailure::UnknownConfig
        }
        (Stage::ConfigName, Some(SQLSTATE_SYNTAX_ERROR)) => StorageFailure::UnknownConfig,
        (Stage::OperatorQuery, Some(SQLSTATE_SYNTAX_ERROR)) => StorageFailure::Syntax,
        (_, Some(SQLSTATE_INVALID_BYTES)) => StorageFailure::BadInput,
        _ => StorageFailure::Unavailable,
    }
}

impl SearchError {
    /// Classify a sqlx error raised by the given kind of statement
    pub(crate) fn at(stage: Stage, err: sqlx::Error) -> Self {
        let (kind, message) = match err.as_database_error() {
            Some(db_err) => (
                classify_sqlstate(stage, db_err.code().as_deref()),
                db_err.message().to_string(),
            ),
            None => (StorageFailure::Unavailable, String::new()),
        };

        match kind {
            StorageFailure::UnknownConfig => SearchError::UnsupportedLanguage(message),
            StorageFailure::Syntax => SearchError::QuerySyntax(message),
            StorageFailure::BadInput => SearchError::Validation(message),
            StorageFailure::Unavailable => SearchError::StorageUnavailable(err),
        }
    }

    /// Caller mistakes, as opposed to storage trouble
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SearchError::StorageUnavailable(_))
    }
}

impl From<sqlx::Error> for SearchError {
    fn from(err: sqlx::Error) -> Self {
        SearchError::at(Stage::Storage, err)
    }
}

//! Search module - thin adapter over PostgreSQL full-text search / 搜索模块
//!
//! Architecture principles / 架构原则：
//! - Tokenizing, stemming and ranking all happen in the database
//! - This module only builds the requests and maps rows back to posts
//! - The connection pool is injected; the module holds no global state
//!
//! Query forms / 查询形式：
//! - Plain: `plainto_tsquery`, implicit AND between words
//! - Prefix: `to_tsquery` with explicit `&` and a `:*` marker (autocomplete)

pub mod post_index;
pub mod query;

pub use post_index::{PostIndex, SearchVector};
pub use query::{PlainQuery, PrefixMode, PrefixQuery};

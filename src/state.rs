use postsearch::config::AppConfig;
use postsearch::PostIndex;

/// Shared handler state; the index owns the pool handle
pub struct AppState {
    pub index: PostIndex,
    pub config: AppConfig,
}

impl AppState {
    pub fn resolve_lang(&self, lang: Option<&str>) -> String {
        resolve_lang(lang, &self.config.search.default_lang)
    }
}

/// Requests may omit `lang`; fall back to the configured default
fn resolve_lang(requested: Option<&str>, default: &str) -> String {
    match requested.map(str::trim) {
        Some(l) if !l.is_empty() => l.to_string(),
        _ => default.to_string(),
    }
}

use serde::Deserialize;

/// 搜索请求
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub lang: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_is_optional() {
        let req: SearchRequest = serde_json::from_str(r#"{"query": "quick fox"}"#).unwrap();
        assert_eq!(req.query, "quick fox");
        assert!(req.lang.is_none());

        let req: SearchRequest =
            serde_json::from_str(r#"{"query": "кот", "lang": "russian"}"#).unwrap();
        assert_eq!(req.lang.as_deref(), Some("russian"));
    }
}

use crate::utils::error::{Result, SkillError};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

const BUILTIN_DICTIONARY: &str = include_str!("../../assets/prayers.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Found(&'a str),
    /// 有給主題，但字典裡沒有
    NotFound,
    /// 完全沒有給主題
    Empty,
}

/// Static topic -> content mapping. Keys are stored normalized (trimmed, lowercase).
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut normalized = HashMap::new();
        for (raw_key, content) in entries {
            let raw_key = raw_key.as_ref();
            let key = normalize(raw_key);
            if key.is_empty() {
                return Err(SkillError::DictionaryError {
                    message: "Dictionary keys cannot be empty".to_string(),
                });
            }
            if normalized.insert(key, content.into()).is_some() {
                return Err(SkillError::DictionaryError {
                    message: format!("Duplicate topic after normalization: '{}'", raw_key),
                });
            }
        }
        Ok(Self {
            entries: normalized,
        })
    }

    /// 從 JSON 物件 (topic -> text) 解析字典
    pub fn from_json_str(content: &str) -> Result<Self> {
        // 保留所有鍵值對，重複的鍵交給 from_entries 拒絕
        let RawTopics(raw) = serde_json::from_str::<RawTopics>(content)?;
        let mut pairs = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            match value {
                serde_json::Value::String(text) => pairs.push((key, text)),
                other => {
                    return Err(SkillError::DictionaryError {
                        message: format!("Topic '{}' must map to a string, got {}", key, other),
                    })
                }
            }
        }
        Self::from_entries(pairs)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let dictionary = Self::from_json_str(&content)?;
        tracing::info!(
            "📖 Loaded {} topics from {}",
            dictionary.len(),
            path.as_ref().display()
        );
        Ok(dictionary)
    }

    /// 打包進執行檔的預設禱詞
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_DICTIONARY)
    }

    pub fn resolve(&self, raw: Option<&str>) -> Resolution<'_> {
        let key = match raw.map(normalize) {
            Some(key) if !key.is_empty() => key,
            _ => return Resolution::Empty,
        };

        match self.entries.get(&key) {
            Some(content) => {
                tracing::debug!("Dictionary hit for '{}'", key);
                Resolution::Found(content.as_str())
            }
            None => {
                tracing::debug!("Dictionary miss for '{}'", key);
                Resolution::NotFound
            }
        }
    }

    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        topics.sort_unstable();
        topics
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// JSON object read in document order, duplicate keys included.
struct RawTopics(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for RawTopics {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawTopicsVisitor;

        impl<'de> Visitor<'de> for RawTopicsVisitor {
            type Value = RawTopics;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of topic -> text")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                    pairs.push((key, value));
                }
                Ok(RawTopics(pairs))
            }
        }

        deserializer.deserialize_map(RawTopicsVisitor)
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

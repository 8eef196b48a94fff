use serde::{Deserialize, Serialize};
use std::fmt;

/// Сегменты клиентов, рассчитываемые движком анализа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    Business,
    Leisure,
    Coppia,
    Famiglia,
    Premium,
}

impl Segment {
    /// Код сегмента, как он передаётся в API (`?segment=Business`)
    pub fn code(&self) -> &'static str {
        match self {
            Segment::Business => "Business",
            Segment::Leisure => "Leisure",
            Segment::Coppia => "Coppia",
            Segment::Famiglia => "Famiglia",
            Segment::Premium => "Premium",
        }
    }

    /// Ключ сегмента в словаре `scores` строки клиента
    pub fn score_key(&self) -> &'static str {
        match self {
            Segment::Business => "business",
            Segment::Leisure => "leisure",
            Segment::Coppia => "coppia",
            Segment::Famiglia => "famiglia",
            Segment::Premium => "premium",
        }
    }

    /// Все сегменты в каноническом порядке
    pub fn all() -> Vec<Segment> {
        vec![
            Segment::Business,
            Segment::Leisure,
            Segment::Coppia,
            Segment::Famiglia,
            Segment::Premium,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Business" => Some(Segment::Business),
            "Leisure" => Some(Segment::Leisure),
            "Coppia" => Some(Segment::Coppia),
            "Famiglia" => Some(Segment::Famiglia),
            "Premium" => Some(Segment::Premium),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

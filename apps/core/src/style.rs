use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleAttribute {
    Title,
    Comment,
    Background,
    Highlight,
    Match,
    Regular,
    Bold,
    SmallRegular,
    SmallBold,
    Large,
}

impl StyleAttribute {
    pub const ALL: [StyleAttribute; 10] = [
        Self::Title,
        Self::Comment,
        Self::Background,
        Self::Highlight,
        Self::Match,
        Self::Regular,
        Self::Bold,
        Self::SmallRegular,
        Self::SmallBold,
        Self::Large,
    ];

    /// Key used in the persisted store.
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Comment => "comment",
            Self::Background => "background",
            Self::Highlight => "highlight",
            Self::Match => "match",
            Self::Regular => "regular",
            Self::Bold => "bold",
            Self::SmallRegular => "smallregular",
            Self::SmallBold => "smallbold",
            Self::Large => "large",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attribute| attribute.name() == name)
    }

    pub fn default_value(self) -> &'static str {
        match self {
            Self::Title => "#111111",
            Self::Comment => "#999999",
            Self::Background => "#ffffff",
            Self::Highlight => "#f8c291",
            Self::Match => "#111111",
            Self::Regular => "Ubuntu,sans-11",
            Self::Bold => "Ubuntu,sans-11:bold",
            Self::SmallRegular => "Ubuntu,sans-10",
            Self::SmallBold => "Ubuntu,sans-10:bold",
            Self::Large => "Ubuntu,sans-20:light",
        }
    }

}

/// Style values keyed by attribute; every attribute always has a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMap {
    values: BTreeMap<StyleAttribute, String>,
}

impl Default for StyleMap {
    fn default() -> Self {
        Self {
            values: StyleAttribute::ALL
                .into_iter()
                .map(|attribute| (attribute, attribute.default_value().to_string()))
                .collect(),
        }
    }
}

impl StyleMap {
    pub fn get(&self, attribute: StyleAttribute) -> &str {
        self.values
            .get(&attribute)
            .map(String::as_str)
            .unwrap_or_else(|| attribute.default_value())
    }

    pub fn set(&mut self, attribute: StyleAttribute, value: &str) {
        self.values.insert(attribute, value.to_string());
    }

    pub fn is_overridden(&self, attribute: StyleAttribute) -> bool {
        self.get(attribute) != attribute.default_value()
    }

    /// Attributes whose value differs from the default, in declaration order.
    pub fn overrides(&self) -> Vec<(StyleAttribute, &str)> {
        StyleAttribute::ALL
            .into_iter()
            .filter(|attribute| self.is_overridden(*attribute))
            .map(|attribute| (attribute, self.get(attribute)))
            .collect()
    }
}

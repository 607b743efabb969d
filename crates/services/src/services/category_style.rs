//! Presentation metadata per category, shared by every page that renders one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct CategoryStyle {
    pub icon: String,
    /// Verb used in "Best Places to {verb}"; `None` falls back to the category name.
    pub verb: Option<String>,
    pub gradient: String,
    pub accent: String,
    pub text: String,
    pub border: String,
    pub background: String,
}

impl CategoryStyle {
    fn new(
        icon: &str,
        verb: Option<&str>,
        gradient: &str,
        accent: &str,
        text: &str,
        border: &str,
        background: &str,
    ) -> Self {
        Self {
            icon: icon.to_string(),
            verb: verb.map(str::to_string),
            gradient: gradient.to_string(),
            accent: accent.to_string(),
            text: text.to_string(),
            border: border.to_string(),
            background: background.to_string(),
        }
    }

    /// "Best Places to Eat in Sea to Sky".
    pub fn page_title(&self, category_name: &str) -> String {
        format!(
            "Best Places to {} in Sea to Sky",
            self.verb.as_deref().unwrap_or(category_name)
        )
    }
}

/// Category slug -> style, with a fallback so every lookup succeeds.
#[derive(Debug, Clone)]
pub struct CategoryStyles {
    order: Vec<String>,
    styles: HashMap<String, CategoryStyle>,
    fallback: CategoryStyle,
}

impl CategoryStyles {
    pub fn new(entries: Vec<(String, CategoryStyle)>, fallback: CategoryStyle) -> Self {
        let order = entries.iter().map(|(slug, _)| slug.clone()).collect();
        Self {
            order,
            styles: entries.into_iter().collect(),
            fallback,
        }
    }

    pub fn style_for(&self, category_slug: &str) -> &CategoryStyle {
        self.styles.get(category_slug).unwrap_or(&self.fallback)
    }

    /// Top-level category slugs, in navigation order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl Default for CategoryStyles {
    fn default() -> Self {
        let entries = [
            ("eat", CategoryStyle::new("🍽️", Some("Eat"), "from-orange-500 to-red-600", "bg-amber-700", "text-amber-700", "border-orange-200", "bg-orange-50")),
            ("stay", CategoryStyle::new("🏔️", Some("Stay"), "from-indigo-500 to-purple-600", "bg-indigo-700", "text-indigo-700", "border-indigo-200", "bg-indigo-50")),
            ("play", CategoryStyle::new("⛷️", Some("Play"), "from-emerald-500 to-green-600", "bg-emerald-700", "text-emerald-700", "border-emerald-200", "bg-emerald-50")),
            ("visit", CategoryStyle::new("🌲", Some("Visit"), "from-pink-500 to-rose-600", "bg-pink-700", "text-pink-700", "border-pink-200", "bg-pink-50")),
            ("shop", CategoryStyle::new("🛍️", Some("Shop"), "from-amber-500 to-red-500", "bg-orange-700", "text-orange-700", "border-orange-200", "bg-orange-50")),
            ("services", CategoryStyle::new("🧭", Some("Find Services"), "from-sky-500 to-indigo-600", "bg-sky-700", "text-sky-700", "border-sky-200", "bg-sky-50")),
        ];
        let fallback = CategoryStyle {
            icon: "📍".to_string(),
            verb: None,
            ..entries[0].1.clone()
        };
        Self::new(
            entries
                .into_iter()
                .map(|(slug, style)| (slug.to_string(), style))
                .collect(),
            fallback,
        )
    }
}

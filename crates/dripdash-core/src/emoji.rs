//! Custom emoji icons
//!
//! A fixed table mapping emoji tags to the icon units the dashboard draws in
//! place of the platform emoji font.

use serde::{Deserialize, Serialize};

/// Emoji that have a custom icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emoji {
    Check,
    Warning,
    Globe,
    Purse,
    Skull,
    MoneyBag,
    FlyingMoney,
    Lock,
    Web,
    MoneyEyes,
    Monocle,
    Pour,
    Jar,
    Bubbles,
}

/// Opaque renderable icon unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconComponent {
    pub name: &'static str,
    pub glyph: &'static str,
    /// RGB tint applied when the icon is drawn.
    pub tint: [u8; 3],
}

const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Emoji → icon table, in `Emoji` declaration order. Keys are unique.
pub const CUSTOM_EMOJI_COMPONENTS: &[(Emoji, IconComponent)] = &[
    (Emoji::Check, icon("check", "✅", [80, 200, 120])),
    (Emoji::Warning, icon("warning", "⚠️", [220, 180, 50])),
    (Emoji::Globe, icon("globe", "🌐", [90, 160, 230])),
    (Emoji::Purse, icon("purse", "👛", [210, 120, 190])),
    (Emoji::Skull, icon("skull", "💀", [200, 200, 200])),
    (Emoji::MoneyBag, icon("money-bag", "💰", [220, 170, 60])),
    (Emoji::FlyingMoney, icon("flying-money", "💸", [110, 190, 110])),
    (Emoji::Lock, icon("lock", "🔒", [220, 170, 60])),
    (Emoji::Web, icon("web", "🕸️", [170, 170, 170])),
    (Emoji::MoneyEyes, icon("money-eyes", "🤑", [110, 200, 90])),
    (Emoji::Monocle, icon("monocle", "🧐", [230, 190, 70])),
    (Emoji::Pour, icon("pour", "🫗", [120, 180, 230])),
    (Emoji::Jar, icon("jar", "🫙", [150, 200, 220])),
    (Emoji::Bubbles, icon("bubbles", "🫧", [150, 210, 240])),
];

const fn icon(name: &'static str, glyph: &'static str, tint: [u8; 3]) -> IconComponent {
    IconComponent { name, glyph, tint }
}

impl Emoji {
    pub const ALL: [Emoji; 14] = [
        Emoji::Check,
        Emoji::Warning,
        Emoji::Globe,
        Emoji::Purse,
        Emoji::Skull,
        Emoji::MoneyBag,
        Emoji::FlyingMoney,
        Emoji::Lock,
        Emoji::Web,
        Emoji::MoneyEyes,
        Emoji::Monocle,
        Emoji::Pour,
        Emoji::Jar,
        Emoji::Bubbles,
    ];

    /// Icon drawn for this emoji.
    pub fn icon(self) -> &'static IconComponent {
        &CUSTOM_EMOJI_COMPONENTS[self as usize].1
    }

    pub fn glyph(self) -> &'static str {
        self.icon().glyph
    }

    /// Parse an emoji glyph. The U+FE0F variation selector is optional.
    pub fn from_glyph(glyph: &str) -> Option<Emoji> {
        let wanted = strip_variation(glyph.trim());
        if wanted.is_empty() {
            return None;
        }
        CUSTOM_EMOJI_COMPONENTS
            .iter()
            .find(|(_, component)| strip_variation(component.glyph) == wanted)
            .map(|(emoji, _)| *emoji)
    }
}

fn strip_variation(s: &str) -> String {
    s.chars().filter(|c| *c != VARIATION_SELECTOR).collect()
}

/// Look up the custom icon for an emoji glyph. Unknown keys are `None`.
pub fn custom_emoji_component(key: &str) -> Option<&'static IconComponent> {
    Emoji::from_glyph(key).map(Emoji::icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_variant_once() {
        for emoji in Emoji::ALL {
            let rows = CUSTOM_EMOJI_COMPONENTS
                .iter()
                .filter(|(e, _)| *e == emoji)
                .count();
            assert_eq!(rows, 1, "{emoji:?}");
        }
        assert_eq!(CUSTOM_EMOJI_COMPONENTS.len(), Emoji::ALL.len());
    }

    #[test]
    fn table_follows_declaration_order() {
        for (index, (emoji, _)) in CUSTOM_EMOJI_COMPONENTS.iter().enumerate() {
            assert_eq!(*emoji as usize, index);
        }
    }

    #[test]
    fn icon_names_are_unique() {
        let mut names: Vec<_> = CUSTOM_EMOJI_COMPONENTS.iter().map(|(_, c)| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CUSTOM_EMOJI_COMPONENTS.len());
    }
}

use dripdash_core::{custom_emoji_component, Emoji, CUSTOM_EMOJI_COMPONENTS};

#[test]
fn every_registered_glyph_resolves_to_its_icon() {
    for (emoji, component) in CUSTOM_EMOJI_COMPONENTS {
        let found = custom_emoji_component(component.glyph).expect("registered glyph");
        assert_eq!(found, component);
        assert_eq!(Emoji::from_glyph(component.glyph), Some(*emoji));
    }
}

#[test]
fn unknown_keys_are_absent() {
    for key in ["", "🦀", "check", "✅✅", "   "] {
        assert!(custom_emoji_component(key).is_none(), "{key:?}");
    }
}

#[test]
fn variation_selector_is_optional() {
    assert_eq!(Emoji::from_glyph("⚠"), Some(Emoji::Warning));
    assert_eq!(Emoji::from_glyph("⚠\u{FE0F}"), Some(Emoji::Warning));
    assert_eq!(Emoji::from_glyph("🕸"), Some(Emoji::Web));
}

#[test]
fn enum_lookup_matches_glyph_lookup() {
    for emoji in Emoji::ALL {
        assert_eq!(custom_emoji_component(emoji.glyph()), Some(emoji.icon()));
    }
    assert_eq!(Emoji::MoneyBag.icon().name, "money-bag");
}

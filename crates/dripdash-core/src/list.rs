//! List item model and the list-select consumer
//!
//! `Items` describe the rows of a selection list or menu. `ListSelect` is the
//! consumer side: it owns the display order, the selection and the search
//! filter, and dispatches selection events on the item kind.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::emoji::IconComponent;

/// Callback attached to an action row.
pub type ActionHandler = Arc<dyn Fn() + Send + Sync>;

/// Image shown next to a row label.
#[derive(Debug, Clone, PartialEq)]
pub enum ListImage {
    /// URL or plain image identifier.
    Url(String),
    /// Icon drawn dynamically with the given props.
    Component {
        component: IconComponent,
        props: Map<String, Value>,
    },
}

impl ListImage {
    pub fn icon(component: IconComponent) -> Self {
        ListImage::Component {
            component,
            props: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectableItem {
    pub label: String,
    pub text: Option<String>,
    pub disabled: bool,
    pub image: Option<ListImage>,
}

impl SelectableItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: None,
            disabled: false,
            image: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_image(mut self, image: ListImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Clone)]
pub struct ActionItem {
    pub label: String,
    pub handler: ActionHandler,
    pub disabled: bool,
    pub image: Option<ListImage>,
}

impl ActionItem {
    pub fn new(label: impl Into<String>, handler: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            handler: Arc::new(handler),
            disabled: false,
            image: None,
        }
    }

    pub fn with_image(mut self, image: ListImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl fmt::Debug for ActionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionItem")
            .field("label", &self.label)
            .field("disabled", &self.disabled)
            .field("image", &self.image)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum ListItem {
    Selectable(SelectableItem),
    Action(ActionItem),
}

impl ListItem {
    pub fn label(&self) -> &str {
        match self {
            ListItem::Selectable(item) => &item.label,
            ListItem::Action(item) => &item.label,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ListItem::Selectable(item) => item.text.as_deref(),
            ListItem::Action(_) => None,
        }
    }

    pub fn image(&self) -> Option<&ListImage> {
        match self {
            ListItem::Selectable(item) => item.image.as_ref(),
            ListItem::Action(item) => item.image.as_ref(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            ListItem::Selectable(item) => item.disabled,
            ListItem::Action(item) => item.disabled,
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.label().to_lowercase().contains(needle)
            || self
                .text()
                .is_some_and(|text| text.to_lowercase().contains(needle))
    }
}

impl From<SelectableItem> for ListItem {
    fn from(item: SelectableItem) -> Self {
        ListItem::Selectable(item)
    }
}

impl From<ActionItem> for ListItem {
    fn from(item: ActionItem) -> Self {
        ListItem::Action(item)
    }
}

/// Slug → item mapping.
#[derive(Debug, Clone, Default)]
pub struct Items(BTreeMap<String, ListItem>);

impl Items {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item, returning the one previously stored under `slug`.
    pub fn insert(&mut self, slug: impl Into<String>, item: impl Into<ListItem>) -> Option<ListItem> {
        self.0.insert(slug.into(), item.into())
    }

    pub fn get(&self, slug: &str) -> Option<&ListItem> {
        self.0.get(slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.0.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ListItem)> {
        self.0.iter().map(|(slug, item)| (slug.as_str(), item))
    }
}

impl<S: Into<String>, I: Into<ListItem>> FromIterator<(S, I)> for Items {
    fn from_iter<T: IntoIterator<Item = (S, I)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(slug, item)| (slug.into(), item.into()))
                .collect(),
        )
    }
}

/// Result of dispatching a selection event on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected(String),
    Deselected(String),
    ActionInvoked(String),
    /// Unknown slug or disabled row.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct ListSelect {
    items: Items,
    order: Vec<String>,
    selected: Vec<String>,
    multiselect: bool,
    search: String,
}

impl ListSelect {
    /// `order` decides display order; slugs missing from `items` are dropped.
    pub fn new(items: Items, order: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut list = Self::default();
        list.set_items(items, order);
        list
    }

    pub fn with_multiselect(mut self, multiselect: bool) -> Self {
        self.multiselect = multiselect;
        self
    }

    /// Replace the rows. Selections that no longer point at an enabled
    /// selectable row are dropped.
    pub fn set_items(&mut self, items: Items, order: impl IntoIterator<Item = impl Into<String>>) {
        let mut seen = Vec::new();
        for slug in order.into_iter().map(Into::into) {
            if items.contains(&slug) && !seen.contains(&slug) {
                seen.push(slug);
            }
        }
        self.order = seen;
        self.selected.retain(|slug| {
            matches!(items.get(slug), Some(ListItem::Selectable(item)) if !item.disabled)
        });
        self.items = items;
    }

    pub fn items(&self) -> &Items {
        &self.items
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut String {
        &mut self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Slugs to render, in caller order, narrowed by the search text.
    pub fn visible_slugs(&self) -> Vec<&str> {
        let needle = self.search.trim().to_lowercase();
        self.order
            .iter()
            .filter(|slug| {
                needle.is_empty()
                    || self
                        .items
                        .get(slug)
                        .is_some_and(|item| item.matches(&needle))
            })
            .map(String::as_str)
            .collect()
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, slug: &str) -> bool {
        self.selected.iter().any(|s| s == slug)
    }

    /// Dispatch a selection event on `slug`.
    pub fn select(&mut self, slug: &str) -> SelectOutcome {
        let Some(item) = self.items.get(slug) else {
            return SelectOutcome::Ignored;
        };
        if item.is_disabled() {
            tracing::debug!(slug, "ignoring selection of disabled row");
            return SelectOutcome::Ignored;
        }
        match item {
            ListItem::Action(action) => {
                let handler = Arc::clone(&action.handler);
                handler();
                SelectOutcome::ActionInvoked(slug.to_owned())
            }
            ListItem::Selectable(_) if self.multiselect => {
                if let Some(pos) = self.selected.iter().position(|s| s == slug) {
                    self.selected.remove(pos);
                    SelectOutcome::Deselected(slug.to_owned())
                } else {
                    self.selected.push(slug.to_owned());
                    SelectOutcome::Selected(slug.to_owned())
                }
            }
            ListItem::Selectable(_) => {
                self.selected = vec![slug.to_owned()];
                SelectOutcome::Selected(slug.to_owned())
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }
}

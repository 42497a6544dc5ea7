//! Card catalog for template lookup.
//!
//! The `CardCatalog` stores every card template a game can reference. It is
//! built once, never mutated by the engine, and shared between engines as
//! `Arc<CardCatalog>`.

use rustc_hash::FxHashMap;

use super::instance::CardInstance;
use super::template::{CardId, CardTemplateBuilder, CardTemplate, CardType};
use crate::core::ManaError;

/// Catalog of card templates.
///
/// ## Example
///
/// ```
/// use manacore::cards::{CardCatalog, CardTemplate};
///
/// let mut catalog = CardCatalog::new();
/// let bolt = catalog
///     .register(CardTemplate::builder("Lightning Bolt").cost("{R}").type_line("Instant"))
///     .unwrap();
///
/// assert_eq!(catalog.get(bolt).unwrap().name, "Lightning Bolt");
/// assert_eq!(catalog.get_by_name("lightning bolt").unwrap().id, bolt);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    /// Templates in registration order. `CardId(n)` is `cards[n - 1]`.
    cards: Vec<CardTemplate>,
    by_name: FxHashMap<String, CardId>,
    by_scryfall_id: FxHashMap<String, CardId>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a template with the next free id and register it.
    ///
    /// Registering a name twice replaces the name index entry; the old
    /// template stays reachable by id.
    pub fn register(&mut self, builder: CardTemplateBuilder) -> Result<CardId, ManaError> {
        let id = CardId::new(self.cards.len() as u32 + 1);
        let template = builder.build(id)?;
        self.by_name.insert(template.name.to_lowercase(), id);
        self.by_scryfall_id.insert(template.scryfall_id.clone(), id);
        self.cards.push(template);
        Ok(id)
    }

    /// Get a template by id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardTemplate> {
        (id.raw() as usize)
            .checked_sub(1)
            .and_then(|index| self.cards.get(index))
    }

    /// Alias of [`get`](Self::get).
    #[must_use]
    pub fn get_by_id(&self, id: CardId) -> Option<&CardTemplate> {
        self.get(id)
    }

    /// Get a template by name, ignoring case.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&CardTemplate> {
        self.by_name
            .get(&name.to_lowercase())
            .and_then(|id| self.get(*id))
    }

    /// Get a template by its external catalog id.
    #[must_use]
    pub fn get_by_scryfall_id(&self, scryfall_id: &str) -> Option<&CardTemplate> {
        self.by_scryfall_id
            .get(scryfall_id)
            .and_then(|id| self.get(*id))
    }

    /// Templates with `card_type`, in id order.
    pub fn cards_by_type(&self, card_type: CardType) -> impl Iterator<Item = &CardTemplate> {
        self.cards.iter().filter(move |c| c.types.has(card_type))
    }

    /// Every template, in id order.
    pub fn all_cards(&self) -> impl Iterator<Item = &CardTemplate> {
        self.cards.iter()
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Display name of an instance, e.g. `"Grizzly Bears (#5)"`.
    #[must_use]
    pub fn label(&self, card: &CardInstance) -> String {
        let name = card
            .token_type
            .as_deref()
            .or_else(|| self.get(card.card_id).map(|t| t.name.as_str()))
            .unwrap_or("Unknown card");
        format!("{} ({})", name, card.instance_id)
    }
}

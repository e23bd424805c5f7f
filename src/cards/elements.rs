//! Elements and azoth costs.
//!
//! A [`Cost`] is a multiset of element-typed amounts plus a generic amount
//! that any element can pay. Element entries are kept sorted by element and
//! merged, so two costs with the same requirements compare equal.
//!
//! ```
//! use konivrer_engine::cards::{Cost, Element};
//!
//! let cost = Cost::generic(2).with(Element::Fire, 1).with(Element::Fire, 1);
//! assert_eq!(cost.total(), 4);
//! assert_eq!(cost.amount_of(Element::Fire), 2);
//! assert_eq!(cost.reduced_by(3), Cost::free().with(Element::Fire, 1));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Elemental affinity of a card.
///
/// `Generic` on a cost means "any element"; on a resource card it supplies
/// azoth that can only pay generic amounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    Light,
    Dark,
    Void,
    Generic,
}

impl Element {
    /// Every element, generic last.
    pub const ALL: [Element; 8] = [
        Element::Fire,
        Element::Water,
        Element::Earth,
        Element::Air,
        Element::Light,
        Element::Dark,
        Element::Void,
        Element::Generic,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Earth => "earth",
            Element::Air => "air",
            Element::Light => "light",
            Element::Dark => "dark",
            Element::Void => "void",
            Element::Generic => "generic",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Element tags on a card. Most cards carry one or two.
pub type ElementSet = SmallVec<[Element; 2]>;

/// Azoth needed to play a card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cost {
    /// Payable with any element.
    pub generic: u32,
    /// Element-typed amounts, sorted by element, never `Generic`, never zero.
    elements: SmallVec<[(Element, u32); 2]>,
}

impl Cost {
    /// A cost of nothing.
    #[must_use]
    pub fn free() -> Self {
        Self::default()
    }

    /// A purely generic cost.
    #[must_use]
    pub fn generic(amount: u32) -> Self {
        Self {
            generic: amount,
            elements: SmallVec::new(),
        }
    }

    /// Add `amount` of `element` (builder pattern).
    #[must_use]
    pub fn with(mut self, element: Element, amount: u32) -> Self {
        self.add(element, amount);
        self
    }

    fn add(&mut self, element: Element, amount: u32) {
        if amount == 0 {
            return;
        }
        if element == Element::Generic {
            self.generic += amount;
            return;
        }
        match self.elements.binary_search_by_key(&element, |(e, _)| *e) {
            Ok(i) => self.elements[i].1 += amount,
            Err(i) => self.elements.insert(i, (element, amount)),
        }
    }

    /// Total azoth units, the card's numeric base cost.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.generic + self.elements.iter().map(|(_, n)| n).sum::<u32>()
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.total() == 0
    }

    /// Amount required of one element. `Generic` returns the generic amount.
    #[must_use]
    pub fn amount_of(&self, element: Element) -> u32 {
        if element == Element::Generic {
            return self.generic;
        }
        self.elements
            .iter()
            .find(|(e, _)| *e == element)
            .map_or(0, |(_, n)| *n)
    }

    /// One entry per element-typed unit, in element order.
    pub fn element_units(&self) -> impl Iterator<Item = Element> + '_ {
        self.elements
            .iter()
            .flat_map(|&(e, n)| std::iter::repeat(e).take(n as usize))
    }

    /// The cost left after a discount. Generic is reduced first, then
    /// element amounts in element order.
    #[must_use]
    pub fn reduced_by(&self, discount: u32) -> Cost {
        let mut remaining = discount;
        let generic_cut = remaining.min(self.generic);
        remaining -= generic_cut;

        let mut reduced = Cost::generic(self.generic - generic_cut);
        for &(element, amount) in &self.elements {
            let cut = remaining.min(amount);
            remaining -= cut;
            reduced.add(element, amount - cut);
        }
        reduced
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_free() {
            return f.write_str("free");
        }
        let mut parts: Vec<String> = self
            .elements
            .iter()
            .map(|(e, n)| format!("{n} {e}"))
            .collect();
        if self.generic > 0 {
            parts.push(format!("{} generic", self.generic));
        }
        f.write_str(&parts.join(" + "))
    }
}

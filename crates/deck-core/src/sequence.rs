//! Unified sequence of document pages and insertions
//!
//! A sequence position is 1-based. Every insertion occupies one slot placed
//! directly after its anchor page, so an insertion anchored after page `a`
//! that has `k` insertions before it sits at position `a + k + 1`.

use crate::insertion::Insertion;

/// What a sequence position shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceSlot<'a> {
    /// An underlying document page
    Page(u32),
    /// External content
    Insertion(&'a Insertion),
    /// Out of range, or past the end of a short document
    Vacant,
}

impl SequenceSlot<'_> {
    pub fn page(&self) -> Option<u32> {
        match self {
            SequenceSlot::Page(page) => Some(*page),
            _ => None,
        }
    }
}

/// Translates between sequence positions and underlying pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceMapper {
    page_count: u32,
    insertions: Vec<Insertion>,
}

impl SequenceMapper {
    /// Create a mapper; insertions are sorted by anchor
    pub fn new(page_count: u32, mut insertions: Vec<Insertion>) -> Self {
        insertions.sort_by_key(|insertion| insertion.after_page);
        Self {
            page_count,
            insertions,
        }
    }

    /// Same insertions over a document with a different page count
    pub fn with_page_count(&self, page_count: u32) -> Self {
        Self {
            page_count,
            insertions: self.insertions.clone(),
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn insertions(&self) -> &[Insertion] {
        &self.insertions
    }

    /// Total number of addressable positions
    pub fn len(&self) -> u32 {
        self.page_count
            .saturating_add(u32::try_from(self.insertions.len()).unwrap_or(u32::MAX))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, position: u32) -> bool {
        position >= 1 && position <= self.len()
    }

    /// Sequence slots occupied by insertions, in order
    fn slots(&self) -> impl Iterator<Item = (u32, &Insertion)> + '_ {
        self.insertions
            .iter()
            .enumerate()
            .map(|(earlier, insertion)| {
                let slot = insertion
                    .after_page
                    .saturating_add(earlier as u32)
                    .saturating_add(1);
                (slot, insertion)
            })
    }

    /// Underlying page shown at `position`.
    ///
    /// Only meaningful when the position is not an insertion slot.
    pub fn to_underlying_page(&self, position: u32) -> u32 {
        let before = self.slots().take_while(|(slot, _)| *slot < position).count() as u32;
        position.saturating_sub(before)
    }

    /// The insertion occupying exactly `position`
    pub fn insertion_at(&self, position: u32) -> Option<&Insertion> {
        self.slots()
            .find(|(slot, _)| *slot == position)
            .map(|(_, insertion)| insertion)
    }

    /// Forward mapping: the position at which underlying `page` is shown
    pub fn sequence_position_for_underlying_page(&self, page: u32) -> u32 {
        let earlier = self
            .insertions
            .iter()
            .filter(|insertion| insertion.after_page < page)
            .count() as u32;
        page.saturating_add(earlier)
    }

    /// Nearest underlying pages before and after `position` in the walk,
    /// skipping insertion slots
    pub fn neighbour_pages(&self, position: u32) -> (Option<u32>, Option<u32>) {
        let page_at = |pos: u32| self.resolve(pos).page();
        let before = (1..position).rev().find_map(page_at);
        let after = position
            .checked_add(1)
            .and_then(|next| (next..=self.len()).find_map(page_at));
        (before, after)
    }

    /// Resolve a position into what it shows
    pub fn resolve(&self, position: u32) -> SequenceSlot<'_> {
        if !self.contains(position) {
            return SequenceSlot::Vacant;
        }

        if let Some(insertion) = self.insertion_at(position) {
            return SequenceSlot::Insertion(insertion);
        }

        match self.to_underlying_page(position) {
            page if page >= 1 && page <= self.page_count => SequenceSlot::Page(page),
            _ => SequenceSlot::Vacant,
        }
    }
}

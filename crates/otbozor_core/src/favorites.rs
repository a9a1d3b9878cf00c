//! Favorites page: client-side paging over the full favorites list.
use crate::model::{Listing, ListingId};
use crate::paging::{clamp_page, page_slice, total_pages};

pub const FAVORITES_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesMsg {
    Opened,
    Loaded(Vec<Listing>),
    LoadFailed { message: String },
    PageSelected(usize),
    RemoveClicked { listing_id: ListingId },
    RemoveFailed { listing_id: ListingId, message: String },
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesEffect {
    LoadFavorites,
    RemoveFavorite { listing_id: ListingId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesState {
    items: Vec<Listing>,
    current_page: usize,
    page_size: usize,
    loading: bool,
    error: Option<String>,
    dirty: bool,
}

impl Default for FavoritesState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            page_size: FAVORITES_PAGE_SIZE,
            loading: false,
            error: None,
            dirty: false,
        }
    }
}

impl FavoritesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.items.len(), self.page_size)
    }

    pub fn view(&self) -> FavoritesViewModel {
        FavoritesViewModel {
            current_page: self.current_page,
            total_pages: self.total_pages(),
            total_items: self.items.len(),
            items: page_slice(&self.items, self.current_page, self.page_size).to_vec(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesViewModel {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items: Vec<Listing>,
    pub loading: bool,
    pub error: Option<String>,
}

pub fn update(mut state: FavoritesState, msg: FavoritesMsg) -> (FavoritesState, Vec<FavoritesEffect>) {
    let effects = match msg {
        FavoritesMsg::Opened => {
            state.loading = true;
            state.error = None;
            state.dirty = true;
            vec![FavoritesEffect::LoadFavorites]
        }
        FavoritesMsg::Loaded(items) => {
            state.items = items;
            state.loading = false;
            state.current_page = clamp_page(state.current_page, state.total_pages());
            state.dirty = true;
            Vec::new()
        }
        FavoritesMsg::LoadFailed { message } => {
            state.loading = false;
            state.error = Some(message);
            state.dirty = true;
            Vec::new()
        }
        FavoritesMsg::PageSelected(page) => {
            let page = clamp_page(page, state.total_pages());
            if page != state.current_page {
                state.current_page = page;
                state.dirty = true;
            }
            Vec::new()
        }
        FavoritesMsg::RemoveClicked { listing_id } => {
            let before = state.items.len();
            state.items.retain(|item| item.id != listing_id);
            if state.items.len() == before {
                return (state, Vec::new());
            }
            state.current_page = clamp_page(state.current_page, state.total_pages());
            state.dirty = true;
            vec![FavoritesEffect::RemoveFavorite { listing_id }]
        }
        FavoritesMsg::RemoveFailed { listing_id: _, message } => {
            state.error = Some(message);
            state.loading = true;
            state.dirty = true;
            vec![FavoritesEffect::LoadFavorites]
        }
        FavoritesMsg::NoOp => Vec::new(),
    };

    (state, effects)
}

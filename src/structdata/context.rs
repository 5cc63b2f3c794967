//! Request and page context.
//!
//! Everything the core needs to know about "who is looking at what" comes
//! through [`PageContext`]. Missing values are empty, never errors.

use chrono::{Local, NaiveDate};
use std::ops::{Deref, DerefMut};

/// Filters, sort and offset of the listing currently being viewed.
///
/// These are already decoded from the request by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingState {
    /// Active filter lines, in request order
    pub filters: Vec<String>,
    pub sort: Option<String>,
    pub offset: Option<usize>,
}

pub trait PageContext {
    /// Login name of the current user, empty when anonymous.
    fn user(&self) -> String;

    /// Groups of the current user.
    fn groups(&self) -> Vec<String>;

    /// Id of the document currently being rendered.
    fn current_id(&self) -> String;

    /// Replace the id of the document currently being rendered.
    fn set_current_id(&mut self, id: String);

    /// Active site language.
    fn lang(&self) -> String;

    /// Language part of the current id under a translation scheme.
    ///
    /// `None` when no translation scheme is active, `Some("")` for documents
    /// in the default language.
    fn translation_variant(&self) -> Option<String> {
        None
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn listing(&self) -> ListingState {
        ListingState::default()
    }
}

/// Temporarily replaces the context's current id.
///
/// The previous id is restored when the guard is dropped, on every exit path.
pub struct ScopedId<'a, C: PageContext + ?Sized> {
    ctx: &'a mut C,
    previous: Option<String>,
}

impl<'a, C: PageContext + ?Sized> ScopedId<'a, C> {
    pub fn new(ctx: &'a mut C, id: String) -> Self {
        let previous = ctx.current_id();
        ctx.set_current_id(id);
        Self {
            ctx,
            previous: Some(previous),
        }
    }
}

impl<C: PageContext + ?Sized> Deref for ScopedId<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: PageContext + ?Sized> DerefMut for ScopedId<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx
    }
}

impl<C: PageContext + ?Sized> Drop for ScopedId<'_, C> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.ctx.set_current_id(previous);
        }
    }
}

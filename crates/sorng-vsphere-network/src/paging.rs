//! Paged object enumeration over the property collector.
//!
//! A retrieval that does not fit in one response hands back a continuation
//! token. The server keeps state for that token until the last page has been
//! read or the token is cancelled, so [`ObjectPager`] tracks the pending
//! token and cancels it whenever iteration stops early.

use crate::error::VmwareResult;
use crate::session::VimSession;
use crate::types::{ManagedObjectRef, RetrieveResult};

use tracing::{debug, warn};

/// Lazy page sequence of one object retrieval.
pub struct ObjectPager<'a, S: VimSession + ?Sized> {
    session: &'a S,
    first: Option<RetrieveResult>,
    pending: Option<String>,
}

impl<'a, S: VimSession + ?Sized> ObjectPager<'a, S> {
    /// Retrieve the first page of `type_name` objects with `properties`.
    pub async fn start(session: &'a S, type_name: &str, properties: &[&str]) -> VmwareResult<Self> {
        let first = session
            .retrieve_objects(type_name, properties.iter().map(|p| p.to_string()).collect())
            .await?;
        Ok(Self::from_result(session, first))
    }

    /// Wrap a first page that was already retrieved.
    pub fn from_result(session: &'a S, first: RetrieveResult) -> Self {
        Self {
            session,
            pending: first.token.clone(),
            first: Some(first),
        }
    }

    /// Whether the server still holds pages for this retrieval.
    pub fn has_pending_token(&self) -> bool {
        self.pending.is_some()
    }

    /// Next page, or `None` once the retrieval is exhausted.
    ///
    /// If fetching a continuation fails, its token is cancelled before the
    /// error is returned.
    pub async fn next_page(&mut self) -> VmwareResult<Option<RetrieveResult>> {
        if let Some(page) = self.first.take() {
            self.pending = page.token.clone();
            return Ok(Some(page));
        }

        let Some(token) = self.pending.take() else {
            return Ok(None);
        };

        match self.session.continue_retrieve(&token).await {
            Ok(page) => {
                self.pending = page.token.clone();
                Ok(Some(page))
            }
            Err(e) => {
                release(self.session, &token).await;
                Err(e)
            }
        }
    }

    /// Stop iterating, cancelling the pending token if there is one.
    pub async fn close(mut self) {
        self.first = None;
        if let Some(token) = self.pending.take() {
            release(self.session, &token).await;
        }
    }

    /// Walk pages until `f` returns `Some`, then release the retrieval.
    pub async fn find_map<T, F>(mut self, mut f: F) -> VmwareResult<Option<T>>
    where
        F: FnMut(&RetrieveResult) -> Option<T>,
    {
        while let Some(page) = self.next_page().await? {
            if let Some(found) = f(&page) {
                self.close().await;
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

impl<S: VimSession + ?Sized> Drop for ObjectPager<'_, S> {
    fn drop(&mut self) {
        if let Some(token) = &self.pending {
            warn!("Property retrieval {token} dropped without being cancelled");
        }
    }
}

async fn release<S: VimSession + ?Sized>(session: &S, token: &str) {
    debug!("Cancelling property retrieval {token}");
    if let Err(e) = session.cancel_retrieve(token).await {
        warn!("Failed to cancel property retrieval {token}: {e}");
    }
}

// ── Lookups by name ─────────────────────────────────────────────────

/// Object on `page` whose first retrieved property equals `value`.
pub fn object_for_value(page: &RetrieveResult, value: &str) -> Option<ManagedObjectRef> {
    page.objects
        .iter()
        .find(|o| o.prop_set.first().and_then(|p| p.val.as_str()) == Some(value))
        .map(|o| o.obj.clone())
}

/// Distributed switch on `page` whose `name` property equals `name`.
pub fn dvs_from_batch(page: &RetrieveResult, name: &str) -> Option<ManagedObjectRef> {
    page.objects
        .iter()
        .find(|o| o.property("name").and_then(|v| v.as_str()) == Some(name))
        .map(|o| o.obj.clone())
}

/// Find an object of `type_name` by name across every page.
pub async fn find_by_name<S: VimSession + ?Sized>(
    session: &S,
    type_name: &str,
    name: &str,
) -> VmwareResult<Option<ManagedObjectRef>> {
    ObjectPager::start(session, type_name, &["name"])
        .await?
        .find_map(|page| object_for_value(page, name))
        .await
}

use std::collections::HashSet;

use nl_core::{normalize_url_key, ArticleItem, Error, ItemView, Result};

/// Ordered, url-keyed collection of the session's articles.
///
/// Insertion order is the newsletter order. Keys are unique and normalized
/// with [`normalize_url_key`]; lookups normalize their argument the same way.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: Vec<ArticleItem>,
    pending_regeneration: Option<String>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// One key per distinct non-blank line, first occurrence wins.
    pub fn parse_intake(url_list: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        url_list
            .lines()
            .filter_map(normalize_url_key)
            .filter(|key| seen.insert(key.clone()))
            .collect()
    }

    /// Drops every item and starts over with `fetched`, in order. Duplicate
    /// keys after the first are ignored.
    pub fn replace(&mut self, fetched: Vec<(String, Option<String>)>) {
        let mut seen = HashSet::new();
        self.items = fetched
            .into_iter()
            .filter_map(|(url, content)| {
                let key = normalize_url_key(&url)?;
                seen.insert(key.clone()).then(|| ArticleItem::new(key, content))
            })
            .collect();
        self.pending_regeneration = None;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn urls(&self) -> Vec<String> {
        self.items.iter().map(|item| item.url().to_string()).collect()
    }

    pub fn get(&self, url: &str) -> Result<&ArticleItem> {
        let idx = self.position(url)?;
        Ok(&self.items[idx])
    }

    fn get_mut(&mut self, url: &str) -> Result<&mut ArticleItem> {
        let idx = self.position(url)?;
        Ok(&mut self.items[idx])
    }

    fn position(&self, url: &str) -> Result<usize> {
        let key = normalize_url_key(url).ok_or_else(|| Error::not_found(url))?;
        self.items
            .iter()
            .position(|item| item.url() == key)
            .ok_or_else(|| Error::not_found(url))
    }

    pub fn set_content(&mut self, url: &str, text: &str) -> Result<()> {
        self.get_mut(url)?.set_content(text);
        Ok(())
    }

    pub fn set_title(&mut self, url: &str, text: &str) -> Result<()> {
        self.get_mut(url)?.set_title(text);
        Ok(())
    }

    pub fn set_summary(&mut self, url: &str, text: &str) -> Result<()> {
        self.get_mut(url)?.set_summary(text);
        Ok(())
    }

    /// Accepts each selected item's content and returns what should be sent
    /// to the generator, or why the item cannot be generated.
    pub fn generation_inputs<F>(&mut self, mut select: F) -> Vec<(String, Result<String>)>
    where
        F: FnMut(&ArticleItem) -> bool,
    {
        self.items
            .iter_mut()
            .filter(|item| select(item))
            .map(|item| {
                item.accept_content();
                let content = item.content_for_generation().map(str::to_string);
                (item.url().to_string(), content)
            })
            .collect()
    }

    /// Stores a generated pair; on failure the item keeps its previous values.
    pub fn apply_generated(&mut self, url: &str, title: &str, summary: &str) -> Result<()> {
        let item = self.get_mut(url)?;
        let key = item.url().to_string();
        item.apply_generated(title, summary)
            .map_err(|e| Error::generation_failure(key, e))
    }

    /// Marks `url` as being regenerated and returns its key and content.
    pub fn begin_regeneration(&mut self, url: &str) -> Result<(String, String)> {
        let item = self.get_mut(url)?;
        item.accept_content();
        let content = item.content_for_generation()?.to_string();
        let key = item.url().to_string();
        self.pending_regeneration = Some(key.clone());
        Ok((key, content))
    }

    /// Clears the pending marker and applies `outcome` if it succeeded.
    pub fn finish_regeneration(&mut self, url: &str, outcome: Result<(String, String)>) -> Result<()> {
        if self.pending_regeneration.as_deref() == Some(url) {
            self.pending_regeneration = None;
        }
        let (title, summary) = outcome?;
        self.apply_generated(url, &title, &summary)
    }

    pub fn pending_regeneration(&self) -> Option<&str> {
        self.pending_regeneration.as_deref()
    }

    pub fn is_ready_for_assembly(&self) -> bool {
        self.items.iter().all(ArticleItem::is_complete)
    }

    /// Urls still missing a title or summary, in store order.
    pub fn missing_artifacts(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| !item.is_complete())
            .map(|item| item.url().to_string())
            .collect()
    }

    pub fn snapshot(&self) -> Vec<ItemView> {
        self.items.iter().map(ArticleItem::view).collect()
    }
}

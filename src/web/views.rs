//! Read-only page contexts built from the catalog store.
//!
//! Every page carries the shared [`SiteContext`], which includes the distinct survivor
//! classes used for navigation. A detail lookup for an unknown key produces
//! [`Page::NotFound`] rather than an error.

use log::debug;
use serde::Serialize;

use crate::catalog::{CatalogEntity, CatalogError, CatalogStore, EntityKind, Item, Monster, Survivor};
use crate::web::routes::Route;

/// Context shared by every page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SiteContext {
    pub site_name: String,
    pub survivor_classes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeContext {
    pub site: SiteContext,
    pub survivors: Vec<Survivor>,
    pub monsters: Vec<Monster>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListContext<E> {
    pub site: SiteContext,
    pub kind: EntityKind,
    pub records: Vec<E>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailContext<E> {
    pub site: SiteContext,
    pub kind: EntityKind,
    pub record: E,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundContext {
    pub site: SiteContext,
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "page", content = "context")]
pub enum Page {
    Home(HomeContext),
    SurvivorList(ListContext<Survivor>),
    SurvivorDetail(DetailContext<Survivor>),
    MonsterList(ListContext<Monster>),
    MonsterDetail(DetailContext<Monster>),
    ItemList(ListContext<Item>),
    ItemDetail(DetailContext<Item>),
    NotFound(NotFoundContext),
}

impl Page {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Page::NotFound(_))
    }
}

/// Builds pages against a store.
pub struct Views<'a> {
    store: &'a CatalogStore,
    site_name: String,
}

impl<'a> Views<'a> {
    pub fn new(store: &'a CatalogStore, site_name: impl Into<String>) -> Self {
        Self {
            store,
            site_name: site_name.into(),
        }
    }

    /// The context every page template receives.
    pub fn site(&self) -> Result<SiteContext, CatalogError> {
        Ok(SiteContext {
            site_name: self.site_name.clone(),
            survivor_classes: survivor_classes(self.store)?,
        })
    }

    pub fn home(&self) -> Result<HomeContext, CatalogError> {
        Ok(HomeContext {
            site: self.site()?,
            survivors: self.store.list()?,
            monsters: self.store.list()?,
            items: self.store.list()?,
        })
    }

    pub fn list<E: CatalogEntity>(&self) -> Result<ListContext<E>, CatalogError> {
        Ok(ListContext {
            site: self.site()?,
            kind: E::KIND,
            records: self.store.list()?,
        })
    }

    /// Detail context for `key`; a miss is [`CatalogError::NotFound`].
    pub fn detail<E: CatalogEntity>(&self, key: &str) -> Result<DetailContext<E>, CatalogError> {
        let record = self.store.get::<E>(key)?;
        Ok(DetailContext {
            site: self.site()?,
            kind: E::KIND,
            record,
        })
    }

    pub fn render_route(&self, route: &Route) -> Result<Page, CatalogError> {
        debug!("rendering {} ({})", route.name(), route.path());
        let page = match route {
            Route::Home => Ok(Page::Home(self.home()?)),
            Route::SurvivorList => Ok(Page::SurvivorList(self.list()?)),
            Route::MonsterList => Ok(Page::MonsterList(self.list()?)),
            Route::ItemList => Ok(Page::ItemList(self.list()?)),
            Route::SurvivorDetail(key) => self.detail(key).map(Page::SurvivorDetail),
            Route::MonsterDetail(key) => self.detail(key).map(Page::MonsterDetail),
            Route::ItemDetail(key) => self.detail(key).map(Page::ItemDetail),
        };
        match page {
            Err(e) if e.is_not_found() => self.not_found(&route.path(), e.to_string()),
            other => other,
        }
    }

    /// Resolve a site path and build its page.
    pub fn page(&self, path: &str) -> Result<Page, CatalogError> {
        match Route::resolve(path) {
            Some(route) => self.render_route(&route),
            None => self.not_found(path, format!("no page at {}", path)),
        }
    }

    fn not_found(&self, path: &str, message: String) -> Result<Page, CatalogError> {
        Ok(Page::NotFound(NotFoundContext {
            site: self.site()?,
            path: path.to_string(),
            message,
        }))
    }
}

/// Distinct survivor classes, available to every page.
pub fn survivor_classes(store: &CatalogStore) -> Result<Vec<String>, CatalogError> {
    store.survivor_classes()
}

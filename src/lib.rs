use std::path::Path;

use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

pub mod db;
pub mod extractor;
pub mod filters;
pub mod models;
pub mod page;
pub mod settings;

pub use extractor::Extractor;
pub use filters::Filters;
pub use models::{ExtractionResult, NotificationRecord, Viewer};
pub use settings::Settings;

pub type Pool = r2d2::Pool<SqliteConnectionManager>;

#[derive(Debug)]
pub struct Store {
    pub pool: Pool,
    pub settings: Settings,
    filters: Filters,
    extractor: Extractor,
}

impl Store {
    pub fn open(path: impl AsRef<Path>, settings: Settings) -> Result<Self> {
        let path = path.as_ref();
        // https://cj.rs/blog/sqlite-pragma-cheatsheet-for-performance-and-consistency/
        let manager = SqliteConnectionManager::file(path).with_init(|c| {
            c.execute_batch(
                r#"
            PRAGMA journal_mode = wal;
            PRAGMA foreign_keys = on;
            PRAGMA synchronous = normal;
            "#,
            )
        });
        tracing::info!("{:?}", path);

        let pool = r2d2::Pool::new(manager)?;
        Self::with_pool(pool, settings)
    }

    /// Single connection, each in-memory connection is its own database.
    pub fn memory(settings: Settings) -> Result<Self> {
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(SqliteConnectionManager::memory())?;
        Self::with_pool(pool, settings)
    }

    fn with_pool(pool: Pool, settings: Settings) -> Result<Self> {
        let mut conn = pool.get()?;
        db::migrations()
            .to_latest(&mut conn)
            .context("migrating usermeta")?;

        let filters = Filters::default();
        let extractor = Extractor::from_filters(&filters, settings.selector.as_deref());

        Ok(Self {
            pool,
            settings,
            filters,
            extractor,
        })
    }

    /// Replaces the hooks, the notice selection is rebuilt through the new filter.
    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.extractor = Extractor::from_filters(&filters, self.settings.selector.as_deref());
        self.filters = filters;
        self
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn notification_info(&self, user_id: u64) -> Result<ExtractionResult> {
        let conn = self.pool.get()?;
        let record = db::fetch_notification(&conn, user_id)?;

        Ok(record
            .map(|record| self.extractor.extract(&record.content))
            .unwrap_or_default())
    }

    pub fn push(&self, user_id: u64, record: &NotificationRecord) -> Result<()> {
        let conn = self.pool.get()?;
        db::save_notification(&conn, user_id, record)
    }

    /// `None` when the viewer may not manage options.
    pub fn admin_bar_menu(&self, viewer: &Viewer) -> Result<Option<page::AdminBarMenu>> {
        if !page::authorize(viewer) {
            return Ok(None);
        }

        // no count unless notices are shown nicely
        let info = if self.settings.nice_display {
            Some(self.notification_info(viewer.user_id)?)
        } else {
            None
        };

        Ok(Some(page::admin_bar_menu(info.as_ref())))
    }

    /// `None` unless `slug` is ours and the viewer passes the gate.
    pub fn notification_screen(&self, viewer: &Viewer, slug: Option<&str>) -> Result<Option<String>> {
        if slug != Some(page::PAGE_SLUG) || !page::authorize(viewer) {
            return Ok(None);
        }

        let info = if self.settings.nice_display {
            Some(self.notification_info(viewer.user_id)?)
        } else {
            None
        };
        let output = page::screen_output(
            self.settings.nice_display,
            &self.settings.fallback,
            info.as_ref(),
        );

        Ok(Some(page::notification_screen(&output, &self.filters)))
    }
}

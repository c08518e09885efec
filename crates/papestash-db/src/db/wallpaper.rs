use papestash_core::{
    models::{NewWallpaper, Wallpaper, WallpaperFilter, WallpaperPage},
    AppError,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const WALLPAPER_COLUMNS: &str = "id, name, path, thumbnail_path, most_frequent_color, height, width, \
     aspect_ratio, size_in_bytes, created_at";

/// Repository for wallpaper rows
#[derive(Clone)]
pub struct WallpaperRepository {
    pool: SqlitePool,
}

impl WallpaperRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert a wallpaper and return the stored row with its new id
    #[tracing::instrument(
        skip(self, wallpaper),
        fields(db.table = "wallpapers", db.operation = "insert", wallpaper.name = %wallpaper.name)
    )]
    pub async fn create(&self, wallpaper: NewWallpaper) -> Result<Wallpaper, AppError> {
        let id = sqlx::query_scalar::<Sqlite, i64>(
            r#"
            INSERT INTO wallpapers
                (name, path, thumbnail_path, most_frequent_color, height, width,
                 aspect_ratio, size_in_bytes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&wallpaper.name)
        .bind(&wallpaper.path)
        .bind(&wallpaper.thumbnail_path)
        .bind(&wallpaper.most_frequent_color)
        .bind(wallpaper.height)
        .bind(wallpaper.width)
        .bind(&wallpaper.aspect_ratio)
        .bind(wallpaper.size_in_bytes)
        .bind(wallpaper.created_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id, "Wallpaper row inserted");

        Ok(wallpaper.into_wallpaper(id))
    }

    /// Get wallpaper by ID
    #[tracing::instrument(skip(self), fields(db.table = "wallpapers", db.operation = "select", db.record_id = %id))]
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Wallpaper>, AppError> {
        let wallpaper = sqlx::query_as::<Sqlite, Wallpaper>(&format!(
            "SELECT {} FROM wallpapers WHERE id = ?",
            WALLPAPER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(wallpaper)
    }

    /// One page of wallpapers, newest first.
    ///
    /// Filters are AND-ed. `page` is 1-based; values below 1 are treated as 1.
    #[tracing::instrument(skip(self), fields(db.table = "wallpapers", db.operation = "select"))]
    pub async fn list(
        &self,
        page: i64,
        per_page: i64,
        filters: &[WallpaperFilter],
    ) -> Result<WallpaperPage, AppError> {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let offset = (page - 1).saturating_mul(per_page);

        let mut count_query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM wallpapers");
        push_filters(&mut count_query, filters);
        let total_count = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut rows_query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM wallpapers", WALLPAPER_COLUMNS));
        push_filters(&mut rows_query, filters);
        rows_query.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        rows_query.push_bind(per_page);
        rows_query.push(" OFFSET ");
        rows_query.push_bind(offset);

        let wallpapers = rows_query
            .build_query_as::<Wallpaper>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            total_count,
            returned = wallpapers.len(),
            filter_count = filters.len(),
            "Wallpaper page loaded"
        );

        Ok(WallpaperPage {
            wallpapers,
            page,
            per_page,
            total_pages: WallpaperPage::page_count(total_count, per_page),
            total_count,
        })
    }

    /// Delete wallpaper row. Returns false when no row had this id.
    #[tracing::instrument(skip(self), fields(db.table = "wallpapers", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM wallpapers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Round-trip a trivial query, used by the health check
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filters: &[WallpaperFilter]) {
    let mut first = true;
    for filter in filters {
        query.push(if first { " WHERE " } else { " AND " });
        first = false;

        match filter {
            WallpaperFilter::AspectRatio(label) => {
                query.push("aspect_ratio = ");
                query.push_bind(label.clone());
            }
            WallpaperFilter::SizeRange { min, max } => {
                query.push("size_in_bytes BETWEEN ");
                query.push_bind(*min);
                query.push(" AND ");
                query.push_bind(*max);
            }
        }
    }
}

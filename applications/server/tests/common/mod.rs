/// Common test utilities and fixtures
use axum::{body::Body, http::Request, Router};
use noor_server::{create_router, state::AppState};
use noor_storage::QuranStore;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Test application backed by a real SQLite file in a temp directory
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestApp {
    /// Empty database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("quran.db").display());

        let pool = noor_storage::create_pool(&db_url).await.unwrap();
        noor_storage::run_migrations(&pool).await.unwrap();

        let router = create_router(AppState::new(QuranStore::new(pool.clone())));

        Self {
            router,
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Database holding the fixture content
    pub async fn seeded() -> Self {
        let app = Self::new().await;
        fixtures::seed(&app.pool).await;
        app
    }

    /// Send a GET and return status plus parsed JSON body
    pub async fn get(&self, uri: &str) -> (axum::http::StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }
}

/// Content fixtures
pub mod fixtures {
    use sqlx::SqlitePool;

    pub const BISMILLAH: &str = "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ";

    async fn surah(pool: &SqlitePool, number: i64, name: &str, arabic: &str, total: i64) {
        sqlx::query(
            "INSERT INTO surahs (surah_id, surah_number, name_english, name_arabic, total_ayahs)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(number)
        .bind(number)
        .bind(name)
        .bind(arabic)
        .bind(total)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn ayah(pool: &SqlitePool, surah: i64, ayah: i64, text: &str, ruku: i64, sajda: Option<&str>) {
        sqlx::query(
            "INSERT INTO ayahs (ayah_id, surah_id, ayah_number, arabic_text, sajda_word, parah_number, ruku_number)
             VALUES (?, ?, ?, ?, ?, 1, ?)",
        )
        .bind(format!("{}:{}", surah, ayah))
        .bind(surah)
        .bind(ayah)
        .bind(text)
        .bind(sajda)
        .bind(ruku)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn translation(pool: &SqlitePool, ayah_id: &str, english: &str) {
        sqlx::query("INSERT INTO translations (ayah_id, translation_english) VALUES (?, ?)")
            .bind(ayah_id)
            .bind(english)
            .execute(pool)
            .await
            .unwrap();
    }

    /// - surah 1 with 1:1 and 1:2 in ruku 1, translated
    /// - surah 2 with 2:1..=2:3 in ruku 1 and 2:8..=2:9 in ruku 2
    /// - surah 96 with a sajda on 96:19
    /// - page 1 with a header, a basmallah and one verse line
    pub async fn seed(pool: &SqlitePool) {
        surah(pool, 1, "Al-Fatihah", "الفاتحة", 7).await;
        surah(pool, 2, "Al-Baqarah", "البقرة", 286).await;
        surah(pool, 96, "Al-Alaq", "العلق", 19).await;

        ayah(pool, 1, 1, BISMILLAH, 1, None).await;
        ayah(pool, 1, 2, "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ", 1, None).await;
        translation(
            pool,
            "1:1",
            "In the name of Allah, the Entirely Merciful, the Especially Merciful.",
        )
        .await;
        translation(pool, "1:2", "All praise is due to Allah, Lord of the worlds.").await;

        for number in 1..=3 {
            ayah(pool, 2, number, "الم", 1, None).await;
        }
        for number in 8..=9 {
            ayah(pool, 2, number, "وَمِنَ النَّاسِ", 2, None).await;
        }

        ayah(pool, 96, 19, "كَلَّا لَا تُطِعْهُ وَاسْجُدْ وَاقْتَرِبْ", 1, Some("وَاسْجُدْ")).await;

        for (index, word) in ["بِسْمِ", "اللَّهِ", "الرَّحْمَٰنِ", "الرَّحِيمِ"].iter().enumerate() {
            sqlx::query("INSERT INTO words (word_index, text) VALUES (?, ?)")
                .bind(index as i64 + 1)
                .bind(*word)
                .execute(pool)
                .await
                .unwrap();
        }
        sqlx::query(
            "INSERT INTO pages (page_number, line_number, line_type, is_centered, surah_number, first_word_id, last_word_id)
             VALUES (1, 1, 'surah_name', 1, 1, NULL, NULL),
                    (1, 2, 'basmallah', 1, 1, NULL, NULL),
                    (1, 3, 'ayah', 1, 1, 1, 4)",
        )
        .execute(pool)
        .await
        .unwrap();
    }
}

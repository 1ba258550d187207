use chrono::Utc;
use dotenvy::dotenv;
use pharmacy_desk::{
    AppState, Result,
    config::{self, database},
    core::{Storage, catalog::EXPIRY_WARNING_DAYS, report::format_amount},
    insights::{GeminiClient, GeminiConfig, InsightGateway},
};
use secrecy::SecretString;
use std::{env, time::Duration};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load seed data and policies
    let app_config = config::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    let insights_config = app_config.insights.clone();

    // 4. Initialize database
    let database_url = database::get_database_url();
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Load state, then write it back so seeded collections are stored
    let state = AppState::load(Storage::new(db), app_config).await;
    state.persist_all().await;

    // 6. Dashboard summary
    let today = Utc::now().date_naive();
    let metrics = state.dashboard(today);
    info!(
        revenue = %format_amount(metrics.total_revenue),
        profit = %format_amount(metrics.total_profit),
        low_stock = metrics.low_stock_count,
        out_of_stock = metrics.out_of_stock_count,
        appointments_today = metrics.today_appointments,
        "dashboard"
    );
    for day in state.daily_trend(today, 7) {
        info!(date = %day.date, revenue = %format_amount(day.revenue), profit = %format_amount(day.profit), "daily figures");
    }
    for category in state.top_categories(5) {
        info!(category = %category.category, revenue = %format_amount(category.revenue), "top category");
    }
    for medicine in state.catalog().low_stock() {
        warn!(id = %medicine.id, name = %medicine.name, stock = medicine.stock, threshold = medicine.threshold, "low stock");
    }
    for medicine in state.catalog().expiring_within(today, EXPIRY_WARNING_DAYS) {
        warn!(id = %medicine.id, name = %medicine.name, expiry = %medicine.expiry_date, "expiring soon");
    }

    // 7. Insights, only when a provider key is configured
    let Ok(api_key) = env::var("GEMINI_API_KEY") else {
        info!("GEMINI_API_KEY not set, skipping insights");
        return Ok(());
    };
    let client = match GeminiClient::new(GeminiConfig {
        api_key: SecretString::from(api_key),
        model: insights_config.model,
    }) {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to build insight client: {}", e);
            return Ok(());
        }
    };
    let gateway =
        InsightGateway::new(client).with_timeout(Duration::from_secs(insights_config.timeout_secs));
    for insight in state.insights(&gateway).await {
        info!(
            kind = ?insight.kind,
            confidence = insight.confidence,
            title = %insight.title,
            "{}",
            insight.description
        );
    }

    Ok(())
}

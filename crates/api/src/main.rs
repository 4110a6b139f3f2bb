use std::sync::Arc;

use afterschool_api::app::services::AppServices;
use afterschool_api::config::Config;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    afterschool_observability::init();

    let config = Config::from_env();

    let services = match &config.database_url {
        Some(url) => {
            let pool = sqlx::PgPool::connect(url)
                .await
                .expect("failed to connect to Postgres");
            AppServices::postgres(pool)
                .await
                .expect("failed to prepare Postgres stores")
        }
        None => {
            let services = AppServices::in_memory();
            if config.seed_demo_data {
                afterschool_infra::seed::seed_demo_lessons(services.catalog().as_ref())
                    .await
                    .expect("failed to seed demo lessons");
            }
            services
        }
    };

    let app = afterschool_api::app::build_app(Arc::new(services), &config.public_dir);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap_or_else(|e| panic!("failed to bind 0.0.0.0:{}: {e}", config.port));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

use actix_web::{web, App, HttpServer};

use quizdesk_server::{
    app_state::AppState,
    auth::JwtService,
    config::Config,
    handlers,
    middleware::{cors_headers, RequestLogger},
    models::domain::{Email, StoreGeneration, StudentKey, Uid},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if cfg!(not(debug_assertions)) {
        config.validate_for_production();
    }

    match config.store_generation {
        StoreGeneration::Uid => serve::<Uid>(config).await,
        StoreGeneration::Email => serve::<Email>(config).await,
    }
}

async fn serve<K: StudentKey>(config: Config) -> std::io::Result<()> {
    let bind = (config.web_server_host.clone(), config.web_server_port);
    let jwt = web::Data::new(JwtService::new(&config.jwt_secret, config.jwt_expiration_hours));

    let state = AppState::<K>::new(config).await.map_err(|e| {
        log::error!("Failed to initialise application state: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let state = web::Data::new(state);

    log::info!(
        "Serving {} routes on http://{}:{}",
        K::GENERATION.route_prefix(),
        bind.0,
        bind.1
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(jwt.clone())
            .wrap(cors_headers())
            .wrap(RequestLogger)
            .configure(handlers::configure::<K>)
    })
    .bind(bind)?
    .run()
    .await
}

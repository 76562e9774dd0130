#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::{web, App, HttpServer};
    use leptos::get_configuration;
    use leptos::logging::log;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use star_reviews::api;
    use star_reviews::app::App as ReviewsApp;
    use star_reviews::config::ServerConfig;
    use star_reviews::db::Database;

    let config = ServerConfig::from_env();

    // Initialize the database
    let db = Database::new(&config.db_path).map_err(std::io::Error::other)?;
    db.create_schema().await.map_err(std::io::Error::other)?; // Ensure the schema is created
    log!("[SERVER] Schema ready in {}", config.db_path);

    // Load configuration
    let conf = get_configuration(None)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in the Leptos app
    let routes = generate_route_list(ReviewsApp);
    log!("[SERVER] listening on http://{}", &addr);

    // Start the Actix Web server
    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        App::new()
            // Shared state for the API handlers
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(config.clone()))
            // Register the JSON API BEFORE the Leptos routes
            .service(web::scope("/api").configure(api::configure))
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Serve other assets from the `assets` directory
            .service(Files::new("/assets", site_root))
            // Serve the favicon from /favicon.ico
            .service(favicon)
            // Register Leptos routes
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), ReviewsApp)
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
#[actix_web::get("favicon.ico")]
async fn favicon(
    leptos_options: actix_web::web::Data<leptos::LeptosOptions>,
) -> actix_web::Result<actix_files::NamedFile> {
    let leptos_options = leptos_options.into_inner();
    let site_root = &leptos_options.site_root;
    Ok(actix_files::NamedFile::open(format!(
        "{site_root}/favicon.ico"
    ))?)
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // to run: `trunk serve --open --features csr`
    use star_reviews::app::App;

    star_reviews::utils::panic_hook::init();

    leptos::mount_to_body(App);
}

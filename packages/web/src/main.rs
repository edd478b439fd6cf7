use dioxus::prelude::*;

use ui::NoticeProvider;
use views::{
    AdminLayout, AdminSettings, BlogList, BlogPost, Contact, Dashboard, EditEntry, Home,
    Introduction, NewEntry, Resume, SiteLayout, WorkDetail, WorksList,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(SiteLayout)]
        #[route("/")]
        Home {},
        #[route("/works")]
        WorksList {},
        #[route("/works/:slug")]
        WorkDetail { slug: String },
        #[route("/blog")]
        BlogList {},
        #[route("/blog/:slug")]
        BlogPost { slug: String },
        #[route("/resume")]
        Resume {},
        #[route("/contact")]
        Contact {},
        #[route("/introduction")]
        Introduction {},
    #[end_layout]
    #[nest("/admin")]
        #[layout(AdminLayout)]
            #[route("/")]
            Dashboard {},
            #[route("/settings")]
            AdminSettings {},
            #[route("/:kind/new")]
            NewEntry { kind: String },
            #[route("/:kind/:id")]
            EditEntry { kind: String, id: String },
        #[end_layout]
    #[end_nest]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        match tokio::runtime::Runtime::new() {
            Ok(runtime) => {
                if let Err(e) = runtime.block_on(launch_server()) {
                    eprintln!("server error: {e}");
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("failed to start tokio runtime: {e}");
                std::process::exit(1);
            }
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() -> std::io::Result<()> {
    use std::sync::Arc;

    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower::ServiceBuilder;
    use tower_http::{services::ServeDir, trace::TraceLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(api::ServerConfig::from_env());
    tokio::fs::create_dir_all(&config.data_dir).await?;
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        upload_dir = %config.upload_dir.display(),
        ai = config.ai.is_some(),
        max_upload_bytes = api::MAX_UPLOAD_BYTES,
        "portfolio server starting"
    );

    // Files arrive as multipart form data on their own route, with a raised body limit
    let mut router = axum::Router::new().merge(api::assets::upload_router());
    // Uploaded assets are plain files on disk unless an external host serves them
    if config.public_upload_base.starts_with('/') {
        router = router.nest_service(&config.public_upload_base, ServeDir::new(&config.upload_dir));
    }
    let router = router
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::Extension(config.clone())),
        );

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: ui::BASE_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        NoticeProvider {
            Router::<Route> {}
        }
    }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "page",
            h1 { "Page not found" }
            p { class: "muted", "Nothing lives at /{path}." }
            Link { to: Route::Home {}, "Back to the home page" }
        }
    }
}

pub mod state;

use std::path::Path;

use actix_files::Files;
use actix_web::{guard, web};

use crate::api::api_config;

pub use state::AppState;

fn static_ui(static_dir: &Path) -> Files {
    Files::new("/", static_dir).index_file("index.html")
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

/// Whether a request path belongs to the prefixed mount rather than the root one
///
/// A prefix such as `/api` overlaps the root routes. The prefixed scope only
/// takes a request when the remainder is itself an API path or the UI index,
/// or when the full path is not a root API path.
pub fn prefix_owns(prefix: &str, path: &str) -> bool {
    let Some(rest) = path.strip_prefix(prefix) else {
        return false;
    };
    if !(rest.is_empty() || rest.starts_with('/')) {
        return false;
    }

    is_api_path(rest) || rest.is_empty() || rest == "/" || !is_api_path(path)
}

/// Mount the API and the static UI at the root and, when given, under `mount_prefix`
///
/// The prefixed scope is registered first because the root file service
/// matches every path; its guard lets overlapping root API paths fall through.
pub fn routes(config: &mut web::ServiceConfig, mount_prefix: Option<&str>, static_dir: &Path) {
    if let Some(prefix) = mount_prefix {
        let owner = prefix.to_string();
        config.service(
            web::scope(prefix)
                .guard(guard::fn_guard(move |ctx| {
                    prefix_owns(&owner, ctx.head().uri.path())
                }))
                .configure(api_config)
                .service(static_ui(static_dir)),
        );
    }

    config.configure(api_config).service(static_ui(static_dir));
}

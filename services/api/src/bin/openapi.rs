//! services/api/src/bin/openapi.rs
//!
//! Dumps the OpenAPI 3 document of the meal planner REST API.
//!
//! Usage: `openapi [OUTPUT]`, writing to `openapi.json` when no path is given.

use api_lib::web::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());
    let spec_json = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&path, spec_json)?;
    println!("OpenAPI specification written to {}", path);
    Ok(())
}

use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use catsite_content::error::LatestPostsError;
use catsite_content::model::{CollectionRecord, ContentKind, NormalizedSummary, StaticPath};
use catsite_content::pages::{DetailProps, HomeProps, SiteContent};

#[derive(Clone)]
pub struct CatSiteServer {
    site: Arc<SiteContent>,
    tool_router: ToolRouter<CatSiteServer>,
}

impl CatSiteServer {
    pub fn new(site: Arc<SiteContent>) -> Self {
        Self {
            site,
            tool_router: Self::tool_router(),
        }
    }
}

fn require_id(id: &str) -> Result<String, String> {
    let id = id.trim();
    if id.is_empty() {
        return Err("id must not be empty".to_string());
    }
    Ok(id.to_string())
}

#[derive(Debug, Deserialize, JsonSchema)]
struct KindParams {
    /// One of "cats", "cat_food", "cat_toys".
    kind: ContentKind,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RecordParams {
    /// One of "cats", "cat_food", "cat_toys".
    kind: ContentKind,
    /// Record id as it appears in static paths, e.g. "42".
    id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct LatestPostsParams {
    /// Numeric WordPress category id.
    category_id: u64,
}

#[derive(Debug, Serialize, JsonSchema)]
struct CollectionResponse {
    kind: ContentKind,
    items: Vec<NormalizedSummary>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct RecordResponse {
    found: bool,
    record: Option<CollectionRecord>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct StaticPathsResponse {
    kind: ContentKind,
    paths: Vec<StaticPath>,
    fallback: bool,
}

#[derive(Debug, Serialize, JsonSchema)]
struct LatestPostsResponse {
    category_id: u64,
    posts: Vec<serde_json::Value>,
}

#[tool_router]
impl CatSiteServer {
    #[tool(description = "List every record of a content type as {id, title, date}, sorted by title. An unreachable gateway yields an empty list.")]
    async fn list_collection(
        &self,
        Parameters(params): Parameters<KindParams>,
    ) -> Result<Json<CollectionResponse>, String> {
        let items = self.site.collection(params.kind).sorted_summaries().await;
        Ok(Json(CollectionResponse {
            kind: params.kind,
            items,
        }))
    }

    #[tool(description = "Look up one raw record by id. Returns found=false when no record has that id.")]
    async fn get_record(
        &self,
        Parameters(params): Parameters<RecordParams>,
    ) -> Result<Json<RecordResponse>, String> {
        let id = require_id(&params.id)?;
        let record = self.site.collection(params.kind).record(&id).await;
        Ok(Json(RecordResponse {
            found: record.is_some(),
            record,
        }))
    }

    #[tool(description = "List the ids to pre-generate detail pages for, in gateway order.")]
    async fn list_static_paths(
        &self,
        Parameters(params): Parameters<KindParams>,
    ) -> Result<Json<StaticPathsResponse>, String> {
        let paths = self.site.static_paths(params.kind).await;
        Ok(Json(StaticPathsResponse {
            kind: params.kind,
            paths: paths.paths,
            fallback: paths.fallback,
        }))
    }

    #[tool(description = "Build detail page props: the raw record plus its resolved image URL, if any.")]
    async fn get_detail_page(
        &self,
        Parameters(params): Parameters<RecordParams>,
    ) -> Result<Json<DetailProps>, String> {
        let id = require_id(&params.id)?;
        Ok(Json(self.site.detail_props(params.kind, &id).await))
    }

    #[tool(description = "Build home page props: cats, cat food and cat toys, each sorted by title.")]
    async fn get_home_page(&self) -> Result<Json<HomeProps>, String> {
        Ok(Json(self.site.home_props().await))
    }

    #[tool(description = "Fetch the latest posts in a WordPress category. An empty category is reported as an error.")]
    async fn latest_posts(
        &self,
        Parameters(params): Parameters<LatestPostsParams>,
    ) -> Result<Json<LatestPostsResponse>, String> {
        match self.site.client().latest_posts(params.category_id).await {
            Ok(posts) => Ok(Json(LatestPostsResponse {
                category_id: params.category_id,
                posts,
            })),
            Err(LatestPostsError::EmptyCategory { message }) => {
                info!(category_id = params.category_id, "category is empty");
                Err(format!("category {} is empty: {message}", params.category_id))
            }
            Err(e) => Err(format!("latest_posts failed: {e}")),
        }
    }
}

#[tool_handler]
impl ServerHandler for CatSiteServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "catsite-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Content adapter for the cat site. Use list_collection for sorted summaries of \
cats, cat_food or cat_toys, list_static_paths to enumerate ids, and get_record or \
get_detail_page for a single item. get_home_page builds all three lists at once. \
latest_posts reads a WordPress category."
                    .to_string(),
            ),
        }
    }
}

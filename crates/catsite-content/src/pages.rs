/// Props for the static site's pages.
///
/// The home page lists all three collections; each content type has a detail
/// page per id and a path list driving pre-generation. Builders never fail:
/// gateway trouble shows up as empty lists, `None` records and `None` images.
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::collection::Collection;
use crate::gateway::GatewayClient;
use crate::images::resolve_image;
use crate::model::{CollectionRecord, ContentKind, NormalizedSummary, StaticPath};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HomeProps {
    pub all_posts_data: Vec<NormalizedSummary>,
    pub all_cat_food_data: Vec<NormalizedSummary>,
    pub all_cat_toys_data: Vec<NormalizedSummary>,
    pub revalidate: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetailProps {
    pub kind: ContentKind,
    /// `None` when no record has the requested id.
    pub post_data: Option<CollectionRecord>,
    pub image_url: Option<String>,
    pub revalidate: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StaticPaths {
    pub paths: Vec<StaticPath>,
    /// Always false: ids missing at build time are not generated on demand.
    pub fallback: bool,
}

/// Entry point for page builders: one gateway client, shared by every page.
#[derive(Clone)]
pub struct SiteContent {
    client: GatewayClient,
}

impl SiteContent {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GatewayClient {
        &self.client
    }

    pub fn collection(&self, kind: ContentKind) -> Collection<'_> {
        Collection::new(&self.client, kind)
    }

    fn revalidate(&self) -> u64 {
        self.client.config().revalidate_secs
    }

    /// The three collections fetch concurrently; none depends on another.
    pub async fn home_props(&self) -> HomeProps {
        let cats = self.collection(ContentKind::Cats);
        let food = self.collection(ContentKind::CatFood);
        let toys = self.collection(ContentKind::CatToys);
        let (all_posts_data, all_cat_food_data, all_cat_toys_data) = futures::join!(
            cats.sorted_summaries(),
            food.sorted_summaries(),
            toys.sorted_summaries()
        );
        info!(
            cats = all_posts_data.len(),
            food = all_cat_food_data.len(),
            toys = all_cat_toys_data.len(),
            "home page props built"
        );
        HomeProps {
            all_posts_data,
            all_cat_food_data,
            all_cat_toys_data,
            revalidate: self.revalidate(),
        }
    }

    pub async fn detail_props(&self, kind: ContentKind, id: &str) -> DetailProps {
        let post_data = self.collection(kind).record(id).await;
        let image_url = match &post_data {
            Some(record) => resolve_image(&self.client, kind, record).await,
            None => None,
        };
        DetailProps {
            kind,
            post_data,
            image_url,
            revalidate: self.revalidate(),
        }
    }

    pub async fn static_paths(&self, kind: ContentKind) -> StaticPaths {
        StaticPaths {
            paths: self.collection(kind).static_paths().await,
            fallback: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::config::GatewayConfig;

    fn site_for(server: &MockServer) -> SiteContent {
        SiteContent::new(GatewayClient::new(GatewayConfig::new(server.url("/wp-json"))).unwrap())
    }

    fn titles(summaries: &[NormalizedSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.title.as_str()).collect()
    }

    #[tokio::test]
    async fn home_props_sorts_each_collection() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/wp-json/wp/v2/catid");
            then.status(200).json_body(json!([
                {"id": 1, "date": "2025-01-01", "acf": {"cat_name": "Oscar"}},
                {"id": 2, "date": "2025-01-02", "acf": {"cat_name": "Bella"}}
            ]));
        });
        server.mock(|when, then| {
            when.path("/wp-json/wp/v2/catfood");
            then.status(200).json_body(json!([
                {"id": 5, "date": "2025-10-05", "acf": {"food_name": "Zebra Mix"}},
                {"id": 2, "date": "2025-10-02", "acf": {"food_name": "Apple Treat"}}
            ]));
        });
        server.mock(|when, then| {
            when.path("/wp-json/wp/v2/cattoy");
            then.status(500);
        });

        let props = site_for(&server).home_props().await;
        assert_eq!(titles(&props.all_posts_data), vec!["Bella", "Oscar"]);
        assert_eq!(titles(&props.all_cat_food_data), vec!["Apple Treat", "Zebra Mix"]);
        let food_ids: Vec<&str> = props.all_cat_food_data.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(food_ids, vec!["2", "5"]);
        assert!(props.all_cat_toys_data.is_empty());
        assert_eq!(props.revalidate, 60);
    }

    #[tokio::test]
    async fn detail_props_resolve_cat_picture() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/wp-json/wp/v2/catid");
            then.status(200).json_body(json!([
                {"id": 12, "date": "2025-03-03", "acf": {"cat_name": "Helen", "cat_pic": 87}}
            ]));
        });
        server.mock(|when, then| {
            when.path("/wp-json/twentytwentyfive-child/v1/cat-images");
            then.status(200)
                .json_body(json!([{"ID": "87", "guid": "https://cms.test/uploads/helen.jpg"}]));
        });

        let props = site_for(&server).detail_props(ContentKind::Cats, "12").await;
        assert_eq!(props.post_data.as_ref().map(|r| r.id_key()).as_deref(), Some("12"));
        assert_eq!(props.image_url.as_deref(), Some("https://cms.test/uploads/helen.jpg"));
    }

    #[tokio::test]
    async fn detail_props_for_unknown_id_skip_image_lookup() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/wp-json/wp/v2/cattoy");
            then.status(200).json_body(json!([{"id": 8, "acf": {"toy_name": "Wand", "toy_pic": 88}}]));
        });
        let images = server.mock(|when, then| {
            when.path("/wp-json/twentytwentyfive-child/v1/cat-images");
            then.status(200).json_body(json!([]));
        });

        let props = site_for(&server).detail_props(ContentKind::CatToys, "9").await;
        assert_eq!(props.post_data, None);
        assert_eq!(props.image_url, None);
        images.assert_hits(0);
    }

    #[tokio::test]
    async fn static_paths_never_fall_back() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/wp-json/wp/v2/catfood");
            then.status(200).json_body(json!([
                {"id": 5, "acf": {"food_name": "Zebra Mix"}},
                {"id": 2, "acf": {"food_name": "Apple Treat"}}
            ]));
        });

        let paths = site_for(&server).static_paths(ContentKind::CatFood).await;
        assert!(!paths.fallback);
        assert_eq!(
            serde_json::to_value(&paths.paths).unwrap(),
            json!([{"params": {"id": "5"}}, {"params": {"id": "2"}}])
        );
    }
}

use tracing::{debug, warn};

use crate::gateway::{Fetched, GatewayClient};
use crate::model::{CollectionRecord, ContentKind, ImageRecord};

/// Resolve a detail record's image reference to its URL.
///
/// Returns `None` when the kind has no image field, the record has no
/// reference, the `cat-images` fetch fails, or nothing matches. The image
/// collection is only fetched when there is a reference to look up.
pub async fn resolve_image(
    client: &GatewayClient,
    kind: ContentKind,
    record: &CollectionRecord,
) -> Option<String> {
    let field = kind.image_field()?;
    let reference = record.image_ref(field)?;

    match client.fetch_images().await {
        Fetched::Records(images) => {
            let url = match_image(&images, &reference);
            if url.is_none() {
                debug!(kind = %kind, reference = %reference, "no image matches reference");
            }
            url
        }
        Fetched::Unavailable(reason) => {
            warn!(kind = %kind, reference = %reference, reason = %reason, "image lookup skipped");
            None
        }
    }
}

/// Linear scan for the image whose stringified `ID` equals `reference`.
pub fn match_image(images: &[ImageRecord], reference: &str) -> Option<String> {
    images
        .iter()
        .find(|image| image.id.to_string() == reference)
        .map(|image| image.guid.clone())
        .filter(|guid| !guid.is_empty())
}

//! Adapter layer: Convert iTunes DTOs to domain models, and pick the album
//! whose artwork we trust.

use super::dto;
use crate::artwork::domain::CatalogAlbum;

/// Size token the API embeds in its artwork URLs
const THUMBNAIL_TOKEN: &str = "100x100";

/// Convert a search response into catalog albums, in API order
pub fn to_albums(response: dto::SearchResponse) -> Vec<CatalogAlbum> {
    if response.result_count == 0 {
        return Vec::new();
    }

    response
        .results
        .into_iter()
        .map(|r| CatalogAlbum {
            artist: r.artist_name,
            collection: r.collection_name,
            artwork_url: r.artwork_url100,
        })
        .collect()
}

/// Pick the album whose artwork we are willing to embed.
///
/// With an expected artist, the first album (in API order) whose artist
/// contains it case-insensitively, so "Cosmonkey" accepts "Cosmonkey Band"
/// and "Queen feat. X". Never falls back to another artist.
///
/// Without an expected artist there is nothing to verify and the first album
/// is taken as-is. Albums without an artwork URL are passed over.
pub fn select_album<'a>(
    albums: &'a [CatalogAlbum],
    expected_artist: Option<&str>,
) -> Option<&'a CatalogAlbum> {
    let mut with_artwork = albums.iter().filter(|a| a.artwork_url.is_some());

    match expected_artist {
        Some(expected) => {
            let expected = expected.to_lowercase();
            with_artwork.find(|a| a.artist.to_lowercase().contains(&expected))
        }
        None => with_artwork.next(),
    }
}

/// Swap the thumbnail size token for a larger one.
///
/// `.../100x100bb.jpg` becomes `.../600x600bb.jpg` for `size = "600x600"`.
pub fn upscale_artwork_url(url: &str, size: &str) -> String {
    url.replace(THUMBNAIL_TOKEN, size)
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn artist_name() -> impl Strategy<Value = String> {
        prop::string::string_regex("[A-Za-z ]{1,12}").unwrap()
    }

    proptest! {
        /// Whatever the result set, a selected album always belongs to the expected artist
        #[test]
        fn selection_respects_expected_artist(
            artists in prop::collection::vec(artist_name(), 0..10),
            expected in "[A-Za-z]{1,6}",
        ) {
            let albums: Vec<CatalogAlbum> = artists
                .iter()
                .map(|artist| CatalogAlbum {
                    artist: artist.clone(),
                    collection: "Album".to_string(),
                    artwork_url: Some("https://example.com/100x100bb.jpg".to_string()),
                })
                .collect();

            if let Some(picked) = select_album(&albums, Some(&expected)) {
                prop_assert!(picked.artist.to_lowercase().contains(&expected.to_lowercase()));
            } else {
                prop_assert!(albums
                    .iter()
                    .all(|a| !a.artist.to_lowercase().contains(&expected.to_lowercase())));
            }
        }
    }
}

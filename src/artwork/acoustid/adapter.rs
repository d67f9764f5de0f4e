//! Adapter layer: Convert AcoustID DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use super::dto;
use crate::artwork::domain::{FingerprintMatch, LookupError};

/// Convert a lookup response to matches, in service order.
///
/// Every recording of every result becomes one match carrying the score of
/// the result it came from.
pub fn to_matches(response: dto::LookupResponse) -> Result<Vec<FingerprintMatch>, LookupError> {
    if response.status != "ok" {
        let message = response
            .error
            .map(|e| e.message)
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(LookupError::ApiError(message));
    }

    Ok(response
        .results
        .into_iter()
        .flat_map(|result| {
            let score = result.score;
            result
                .recordings
                .into_iter()
                .map(move |recording| FingerprintMatch {
                    score,
                    artist: join_artists(&recording.artists),
                    recording_id: recording.id,
                    title: recording.title,
                })
        })
        .collect())
}

fn join_artists(artists: &[dto::Artist]) -> Option<String> {
    let mut joined = String::new();
    for artist in artists {
        joined.push_str(&artist.name);
        if let Some(ref join) = artist.joinphrase {
            joined.push_str(join);
        }
    }

    let joined = joined.trim();
    (!joined.is_empty()).then(|| joined.to_string())
}

//! Adapter layer: Convert MusicBrainz DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use super::dto;
use crate::artwork::domain::CandidateRelease;

/// Convert a release search response to candidates, keeping server order
pub fn to_candidates(response: dto::ReleaseSearchResponse) -> Vec<CandidateRelease> {
    response
        .releases
        .into_iter()
        .map(|release| CandidateRelease {
            artist: build_artist_string(&release.artist_credit),
            id: release.id,
            title: release.title,
            date: release.date,
        })
        .collect()
}

/// Build a combined artist string from artist credits
fn build_artist_string(credits: &[dto::ArtistCredit]) -> Option<String> {
    let mut result = String::new();
    for credit in credits {
        // Use credited name if available, otherwise official name
        let name = credit
            .name
            .as_deref()
            .or(credit.artist.as_ref().map(|a| a.name.as_str()));
        let Some(name) = name else {
            continue;
        };
        result.push_str(name);

        // Add join phrase if present (e.g., " & ", " feat. ")
        if let Some(ref join) = credit.joinphrase {
            result.push_str(join);
        }
    }

    let result = result.trim();
    (!result.is_empty()).then(|| result.to_string())
}

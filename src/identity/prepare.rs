//! Turns a recognizer answer into the identity the cascade starts from.

use crate::core::types::{RecognizedTrack, SongIdentity};
use crate::identity::aliases::lookup_alias;
use crate::identity::script;
use crate::identity::translate::{first_variant, Translator};
use crate::identity::translit::{convert_to_russian, reapply_case};

/// ISRC registrant countries whose catalogs are predominantly English.
/// Songs from these are searched as recognized, never translated.
const ENGLISH_MARKET_REGIONS: &[&str] = &[
    "GB", "US", "AU", "NZ", "CA", "IE", "SE", "NO", "DK", "NL", "DE", "FR", "IT", "ES", "JP",
];

pub fn is_english_market(identity: &SongIdentity) -> bool {
    identity
        .region_code
        .as_deref()
        .is_some_and(|code| ENGLISH_MARKET_REGIONS.contains(&code))
}

/// True when the cascade must stick to the recognizer's pair: an
/// English-market ISRC and no alias substitution.
pub fn locked_to_recognized_pair(identity: &SongIdentity) -> bool {
    !identity.artist_overwritten() && is_english_market(identity)
}

/// Builds the starting identity.
///
/// The alias table wins over everything. Without an alias hit an
/// English-market ISRC keeps the recognized pair. Otherwise a romanized
/// artist is replaced by its first translation, or by its transliteration
/// when the translator has nothing, so the cascade only varies the title.
pub async fn prepare_identity(track: &RecognizedTrack, translator: &dyn Translator) -> SongIdentity {
    let mut identity = SongIdentity::from_track(track);

    if let Some(alias) = lookup_alias(&track.artist) {
        log::info!("Resolve: alias '{}' → '{}'", track.artist, alias);
        identity.artist = alias.to_string();
        return identity;
    }

    if is_english_market(&identity) {
        log::info!(
            "Resolve: ISRC region {} is English-market, keeping '{}' as recognized",
            identity.region_code.as_deref().unwrap_or_default(),
            identity
        );
        return identity;
    }

    if !script::classify(&track.artist).is_translit {
        return identity;
    }

    if let Some(artist) = cyrillic_artist(translator, &track.artist).await {
        log::info!("Resolve: translit artist '{}' → '{}'", track.artist, artist);
        identity.artist = artist;
    }
    identity
}

/// First translation variant; transliteration only when there is none.
/// A translation that echoes the input leaves the artist as recognized.
async fn cyrillic_artist(translator: &dyn Translator, artist: &str) -> Option<String> {
    if let Some(translated) = first_variant(translator, artist).await {
        return (translated != artist).then_some(translated);
    }

    let converted = convert_to_russian(artist);
    (converted != artist.to_lowercase()).then(|| reapply_case(artist, &converted))
}

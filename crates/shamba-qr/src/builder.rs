//! Product and farmer-profile payload builders
use chrono::{DateTime, Datelike, Utc};
use shamba_core::{FarmerRecord, ProductRecord, Result, TraceConfig, TraceabilityId};
use tracing::debug;

use crate::summary::{
    ConsumerSummary, FarmFacts, FarmerProfile, FarmerProfilePayload, ProductFacts,
    ProductPayload, ProductRenderHints, QualityFacts, SustainabilityFacts,
};
use crate::{
    CURRENT_HARVEST, MAX_CERTIFICATIONS, MAX_FLAVOR_NOTES, MAX_PRACTICES, MAX_STORY_CHARS,
    STORY_ELLIPSIS,
};

/// Build both QR tiers for a product, stamping the identifier with the current time.
pub fn build_product_payload(
    product: &ProductRecord,
    farmer: &FarmerRecord,
    config: &TraceConfig,
) -> Result<ProductPayload> {
    build_product_payload_at(product, farmer, config, Utc::now())
}

pub fn build_product_payload_at(
    product: &ProductRecord,
    farmer: &FarmerRecord,
    config: &TraceConfig,
    now: DateTime<Utc>,
) -> Result<ProductPayload> {
    let product_id = product.require_id()?;
    let farmer_id = farmer.require_id()?;

    let issued_at_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let traceability_id = TraceabilityId::compose(product_id, farmer_id, issued_at_ms);
    let verification_url = config.trace_url(product_id);

    let consumer_summary = ConsumerSummary {
        product: ProductFacts {
            name: product.name.clone(),
            variety: product.variety.clone(),
            roast: product.roast_level.clone(),
            processing: product.processing_method.clone(),
            flavor_notes: first_n(&product.flavor_notes, MAX_FLAVOR_NOTES),
            organic: product.organic,
            fair_trade: product.fair_trade,
        },
        farm: FarmFacts {
            farmer: farmer.name.clone(),
            county: farmer.county.clone(),
            altitude: altitude_label(farmer, Some(product)),
            size: farm_size_label(farmer),
            rating: farmer.average_rating,
        },
        quality: QualityFacts {
            score: product.quality_score.or(farmer.quality_score),
            harvest_year: harvest_year(product.harvest_date),
            certifications: first_n(&farmer.certifications, MAX_CERTIFICATIONS),
        },
        sustainability: SustainabilityFacts {
            practices: first_n(&farmer.sustainability_practices, MAX_PRACTICES),
            verified: farmer.verified,
        },
        story: truncate_story(farmer.brand_story.as_deref().unwrap_or_default()),
        traceability_id: traceability_id.clone(),
        url: verification_url.clone(),
        generated_at: now,
    };

    let payload_digest = digest_summary(&consumer_summary)?;

    debug!(
        traceability_id = %traceability_id,
        product_id,
        farmer_id,
        "built product QR payload"
    );

    Ok(ProductPayload {
        traceability_id,
        verification_url,
        consumer_summary,
        payload_digest,
        render_hints: ProductRenderHints {
            verification: config.render.verification,
            consumer_summary: config.render.consumer_summary,
        },
    })
}

pub fn build_farmer_profile_payload(
    farmer: &FarmerRecord,
    config: &TraceConfig,
) -> Result<FarmerProfilePayload> {
    build_farmer_profile_payload_at(farmer, config, Utc::now())
}

pub fn build_farmer_profile_payload_at(
    farmer: &FarmerRecord,
    config: &TraceConfig,
    now: DateTime<Utc>,
) -> Result<FarmerProfilePayload> {
    let farmer_id = farmer.require_id()?;

    let profile = FarmerProfile {
        farmer_id: farmer_id.to_string(),
        name: farmer.name.clone(),
        county: farmer.county.clone(),
        altitude: altitude_label(farmer, None),
        size: farm_size_label(farmer),
        certifications: farmer.certifications.clone(),
        practices: first_n(&farmer.sustainability_practices, MAX_PRACTICES),
        rating: farmer.average_rating,
        quality_score: farmer.quality_score,
        verified: farmer.verified,
        story: truncate_story(farmer.brand_story.as_deref().unwrap_or_default()),
        cover_image: farmer.farm_images.first().cloned(),
        social_media: farmer.social_media.clone(),
    };

    debug!(farmer_id, "built farmer profile QR payload");

    Ok(FarmerProfilePayload {
        profile_url: config.farmer_url(farmer_id),
        profile,
        generated_at: now,
        render_hints: config.render.farmer_profile,
    })
}

/// Cap at `MAX_STORY_CHARS` characters, appending `...` when cut.
pub fn truncate_story(story: &str) -> String {
    match story.char_indices().nth(MAX_STORY_CHARS) {
        Some((cut, _)) => format!("{}{}", &story[..cut], STORY_ELLIPSIS),
        None => story.to_string(),
    }
}

pub fn harvest_year(harvest_date: Option<DateTime<Utc>>) -> String {
    harvest_date
        .map(|d| d.year().to_string())
        .unwrap_or_else(|| CURRENT_HARVEST.to_string())
}

/// Farmer altitude range wins over the product's single altitude.
fn altitude_label(farmer: &FarmerRecord, product: Option<&ProductRecord>) -> String {
    if let Some(range) = farmer.altitude_range {
        return format!("{}-{}m", range.min, range.max);
    }
    product
        .and_then(|p| p.altitude)
        .map(|a| format!("{a}m"))
        .unwrap_or_default()
}

fn farm_size_label(farmer: &FarmerRecord) -> String {
    farmer
        .farm_size
        .map(|size| format!("{size} acres"))
        .unwrap_or_default()
}

fn first_n(items: &[String], n: usize) -> Vec<String> {
    items.iter().take(n).cloned().collect()
}

fn digest_summary(summary: &ConsumerSummary) -> Result<String> {
    let bytes = serde_json::to_vec(summary)?;
    Ok(format!("blake3:{}", blake3::hash(&bytes)))
}

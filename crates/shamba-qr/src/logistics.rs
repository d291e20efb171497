//! Logistics payloads and tracking numbers
use chrono::{DateTime, Utc};
use rand::Rng;
use shamba_core::traceability::to_base36;
use shamba_core::{OrderRecord, Result, TraceConfig, ID_PREFIX};
use tracing::debug;

use crate::summary::{LogisticsPayload, ShipmentSummary};

const TRACKING_SUFFIX_LEN: usize = 4;
const BASE36_UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `S2S` + upper base-36 of `now_ms` + four random base-36 characters.
///
/// Collisions are unlikely but possible; callers that need uniqueness must
/// check against their own store.
pub fn generate_tracking_number<R: Rng>(now_ms: u64, rng: &mut R) -> String {
    let mut tracking = format!("{ID_PREFIX}{}", to_base36(now_ms).to_uppercase());
    for _ in 0..TRACKING_SUFFIX_LEN {
        tracking.push(BASE36_UPPER[rng.gen_range(0..BASE36_UPPER.len())] as char);
    }
    tracking
}

pub fn build_logistics_payload(order: &OrderRecord, config: &TraceConfig) -> Result<LogisticsPayload> {
    build_logistics_payload_with_rng(order, config, Utc::now(), &mut rand::thread_rng())
}

pub fn build_logistics_payload_with_rng<R: Rng>(
    order: &OrderRecord,
    config: &TraceConfig,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<LogisticsPayload> {
    let order_id = order.require_id()?;

    let (tracking_number, tracking_number_generated) = match order.existing_tracking_number() {
        Some(existing) => (existing.to_string(), false),
        None => {
            let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
            (generate_tracking_number(now_ms, rng), true)
        }
    };

    debug!(
        order_id,
        tracking_number = %tracking_number,
        generated = tracking_number_generated,
        "built logistics QR payload"
    );

    Ok(LogisticsPayload {
        tracking_url: config.tracking_url(order_id),
        tracking_number,
        tracking_number_generated,
        shipment: ShipmentSummary {
            order_id: order_id.to_string(),
            status: order.status.clone(),
            product: order.product_name.clone(),
            quantity: quantity_label(order),
            buyer: order.buyer_name.clone(),
            origin: order.origin_county.clone(),
            destination: order.destination.clone(),
            estimated_delivery: order.estimated_delivery,
        },
        generated_at: now,
        render_hints: config.render.logistics,
    })
}

fn quantity_label(order: &OrderRecord) -> String {
    match (order.quantity, order.unit.as_deref()) {
        (Some(q), Some(unit)) if !unit.trim().is_empty() => format!("{q} {}", unit.trim()),
        (Some(q), _) => q.to_string(),
        (None, _) => String::new(),
    }
}

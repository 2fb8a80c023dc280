//! Per-model usage aggregation.
//!
//! Turns the raw premium-usage line items into ranked model rows plus
//! totals. The billing endpoint already aggregates per model, so each
//! surviving item becomes exactly one row.

use serde::Serialize;

use crate::api::types::PremiumUsageItem;
use crate::models::{model_multiplier, PlanType};

/// One model's usage for the period
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelRow {
    pub model: String,
    /// Raw request count (gross quantity)
    pub requests: f64,
    /// Premium requests consumed (discounted plus billed)
    pub premium_requests: f64,
    /// Effective multiplier, derived from the data when possible
    pub multiplier: f64,
    pub is_included: bool,
    /// Billed overage amount for this model
    pub cost: f64,
}

/// Pre-computed sums over a set of model rows
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UsageTotals {
    pub total_requests: f64,
    pub total_premium_requests: f64,
    pub total_cost: f64,
    /// Requests that hit included models and consumed no quota
    pub included_requests: f64,
}

/// Build ranked model rows from raw usage items.
///
/// Items survive when `product == "Copilot"` or they carry measurable
/// gross usage; this deliberately admits non-Copilot paid rows while
/// dropping zero-volume noise from other products.
///
/// The premium-request count is `discountQuantity + netQuantity`, the
/// figure GitHub's billing page shows. Included status and the displayed
/// multiplier are derived from the data itself (an item with gross usage
/// but zero premium requests and zero billed amount must be included on
/// this plan); the static catalog is consulted only when there is no
/// gross quantity to divide by.
pub fn build_model_rows(items: &[PremiumUsageItem], plan: PlanType) -> Vec<ModelRow> {
    let mut rows: Vec<ModelRow> = items
        .iter()
        .filter(|item| item.product == "Copilot" || item.gross_quantity > 0.0)
        .map(|item| {
            let premium_requests = item.discount_quantity + item.net_quantity;
            let is_included =
                item.gross_quantity > 0.0 && premium_requests == 0.0 && item.net_amount == 0.0;

            let multiplier = if is_included {
                0.0
            } else if item.gross_quantity > 0.0 {
                premium_requests / item.gross_quantity
            } else {
                model_multiplier(&item.model, plan)
            };

            ModelRow {
                model: item.model.clone(),
                requests: item.gross_quantity,
                premium_requests,
                multiplier,
                is_included,
                cost: item.net_amount,
            }
        })
        .collect();

    // Rank by premium consumption, then raw volume; stable beyond that
    rows.sort_by(|a, b| {
        b.premium_requests
            .total_cmp(&a.premium_requests)
            .then(b.requests.total_cmp(&a.requests))
    });
    rows
}

/// Sum the aggregate figures over a set of rows
pub fn totals(rows: &[ModelRow]) -> UsageTotals {
    let mut out = UsageTotals::default();
    for row in rows {
        out.total_requests += row.requests;
        out.total_premium_requests += row.premium_requests;
        out.total_cost += row.cost;
        if row.is_included {
            out.included_requests += row.requests;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(model: &str, gross: f64, discount: f64, net: f64, net_amount: f64) -> PremiumUsageItem {
        PremiumUsageItem {
            product: "Copilot".to_string(),
            sku: "copilot_premium_requests".to_string(),
            model: model.to_string(),
            unit_type: "requests".to_string(),
            price_per_unit: 0.04,
            gross_quantity: gross,
            discount_quantity: discount,
            net_quantity: net,
            net_amount,
            ..Default::default()
        }
    }

    /// Mixed mid-month usage on Pro: included, standard, high, and low models
    fn mixed_items() -> Vec<PremiumUsageItem> {
        vec![
            item("GPT-4o", 150.0, 0.0, 0.0, 0.0),
            item("Claude Sonnet 4", 100.0, 100.0, 0.0, 0.0),
            item("Claude Opus 4.5", 50.0, 100.0, 50.0, 2.0),
            item("Claude Haiku 4.5", 30.0, 10.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_rows_ranked_by_premium_requests() {
        let rows = build_model_rows(&mixed_items(), PlanType::Pro);
        let order: Vec<&str> = rows.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "Claude Opus 4.5",
                "Claude Sonnet 4",
                "Claude Haiku 4.5",
                "GPT-4o"
            ]
        );
        assert_eq!(rows[0].premium_requests, 150.0);
        assert_eq!(rows[1].premium_requests, 100.0);
        assert_eq!(rows[2].premium_requests, 10.0);
        assert_eq!(rows[3].premium_requests, 0.0);
    }

    #[test]
    fn test_mixed_usage_totals() {
        let rows = build_model_rows(&mixed_items(), PlanType::Pro);
        let sums = totals(&rows);
        assert_eq!(sums.total_premium_requests, 260.0);
        assert_eq!(sums.total_requests, 330.0);
        assert_eq!(sums.total_cost, 2.0);
        assert_eq!(sums.included_requests, 150.0);
    }

    #[test]
    fn test_included_row_shape() {
        let rows = build_model_rows(&mixed_items(), PlanType::Pro);
        let gpt4o = rows.iter().find(|r| r.model == "GPT-4o").unwrap();
        assert!(gpt4o.is_included);
        assert_eq!(gpt4o.multiplier, 0.0);
        assert_eq!(gpt4o.premium_requests, 0.0);
        assert_eq!(gpt4o.cost, 0.0);
        assert_eq!(gpt4o.requests, 150.0);
    }

    #[test]
    fn test_multiplier_derived_from_data() {
        let rows = build_model_rows(&mixed_items(), PlanType::Pro);
        let opus = rows.iter().find(|r| r.model == "Claude Opus 4.5").unwrap();
        assert_eq!(opus.multiplier, 3.0);
        let haiku = rows.iter().find(|r| r.model == "Claude Haiku 4.5").unwrap();
        assert!((haiku.multiplier - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_gross_falls_back_to_catalog_multiplier() {
        let items = vec![item("Claude Opus 4.5", 0.0, 0.0, 0.0, 0.0)];
        let rows = build_model_rows(&items, PlanType::Pro);
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_included);
        assert_eq!(rows[0].multiplier, 3.0);
    }

    #[test]
    fn test_unknown_model_emits_row_with_default_multiplier() {
        let items = vec![item("Brand New Model", 0.0, 0.0, 0.0, 0.0)];
        let rows = build_model_rows(&items, PlanType::Pro);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].multiplier, 1.0);
    }

    #[test]
    fn test_filter_keeps_non_copilot_rows_with_usage() {
        let mut other = item("Mystery Model", 5.0, 5.0, 0.0, 0.0);
        other.product = "Other AI".to_string();
        let mut noise = item("Silent Model", 0.0, 0.0, 0.0, 0.0);
        noise.product = "Other AI".to_string();

        let rows = build_model_rows(&[other, noise], PlanType::Pro);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].model, "Mystery Model");
    }

    #[test]
    fn test_zero_gross_copilot_item_survives_filter() {
        let items = vec![item("Claude Sonnet 4", 0.0, 0.0, 0.0, 0.0)];
        assert_eq!(build_model_rows(&items, PlanType::Pro).len(), 1);
    }

    #[test]
    fn test_billed_item_with_zero_cost_is_not_included() {
        // Premium requests consumed, so not an included model even though
        // nothing was billed
        let items = vec![item("Claude Sonnet 4", 10.0, 10.0, 0.0, 0.0)];
        let rows = build_model_rows(&items, PlanType::Pro);
        assert!(!rows[0].is_included);
        assert_eq!(rows[0].premium_requests, 10.0);
    }

    #[test]
    fn test_premium_requests_never_negative_and_monotone() {
        let base = vec![item("Claude Sonnet 4", 100.0, 60.0, 40.0, 1.6)];
        let rows = build_model_rows(&base, PlanType::Pro);
        assert!(rows[0].premium_requests >= 0.0);
        let before = totals(&rows).total_premium_requests;

        // Raising discount or net quantity never lowers the total
        let mut bumped = base.clone();
        bumped[0].discount_quantity += 25.0;
        assert!(totals(&build_model_rows(&bumped, PlanType::Pro)).total_premium_requests >= before);
        let mut bumped = base;
        bumped[0].net_quantity += 25.0;
        assert!(totals(&build_model_rows(&bumped, PlanType::Pro)).total_premium_requests >= before);
    }

    #[test]
    fn test_ties_broken_by_raw_requests() {
        let items = vec![
            item("A", 10.0, 5.0, 0.0, 0.0),
            item("B", 20.0, 5.0, 0.0, 0.0),
        ];
        let rows = build_model_rows(&items, PlanType::Pro);
        assert_eq!(rows[0].model, "B");
        assert_eq!(rows[1].model, "A");
    }

    #[test]
    fn test_empty_input_produces_no_rows() {
        let rows = build_model_rows(&[], PlanType::Pro);
        assert!(rows.is_empty());
        assert_eq!(totals(&rows), UsageTotals::default());
    }
}

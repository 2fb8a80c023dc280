//! Static Copilot plan and model catalog.
//!
//! The plan table mirrors GitHub's published Copilot tiers; the model table
//! carries the premium-request multiplier for each model the picker offers.
//! Multipliers drift as GitHub adjusts pricing, so callers should prefer
//! API-derived figures and treat these as display fallbacks.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Copilot plan tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PlanType {
    Free,
    Pro,
    ProPlus,
    Business,
    Enterprise,
}

impl PlanType {
    /// All plan types, in catalog order
    pub const ALL: [PlanType; 5] = [
        PlanType::Free,
        PlanType::Pro,
        PlanType::ProPlus,
        PlanType::Business,
        PlanType::Enterprise,
    ];

    /// Stable kebab-case identifier (matches the CLI and JSON form)
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Free => "free",
            PlanType::Pro => "pro",
            PlanType::ProPlus => "pro-plus",
            PlanType::Business => "business",
            PlanType::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one plan tier
#[derive(Debug, Clone, Copy)]
pub struct PlanInfo {
    pub display_name: &'static str,
    /// Premium requests included per month
    pub monthly_premium_requests: u32,
    pub price_per_month: &'static str,
    /// Models that never consume premium quota on this plan
    pub included_models: &'static [&'static str],
}

/// Models included at 0x on every paid plan
const PAID_INCLUDED_MODELS: &[&str] = &["GPT-4o", "GPT-4.1", "GPT-5 mini", "Raptor mini"];

/// Plan catalog. Lookup is total: every `PlanType` has an entry.
pub fn plan_info(plan: PlanType) -> &'static PlanInfo {
    match plan {
        PlanType::Free => &PlanInfo {
            display_name: "Copilot Free",
            monthly_premium_requests: 50,
            price_per_month: "$0",
            included_models: &[],
        },
        PlanType::Pro => &PlanInfo {
            display_name: "Copilot Pro",
            monthly_premium_requests: 300,
            price_per_month: "$10",
            included_models: PAID_INCLUDED_MODELS,
        },
        PlanType::ProPlus => &PlanInfo {
            display_name: "Copilot Pro+",
            monthly_premium_requests: 1500,
            price_per_month: "$39",
            included_models: PAID_INCLUDED_MODELS,
        },
        PlanType::Business => &PlanInfo {
            display_name: "Copilot Business",
            monthly_premium_requests: 300,
            price_per_month: "$19/seat",
            included_models: PAID_INCLUDED_MODELS,
        },
        PlanType::Enterprise => &PlanInfo {
            display_name: "Copilot Enterprise",
            monthly_premium_requests: 1000,
            price_per_month: "$39/seat",
            included_models: PAID_INCLUDED_MODELS,
        },
    }
}

/// Cost band of a model relative to one premium request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelCategory {
    Included,
    Low,
    Standard,
    High,
    Ultra,
}

/// Static description of one model
#[derive(Debug, Clone, Copy)]
pub struct ModelInfo {
    pub name: &'static str,
    pub display_name: &'static str,
    /// Multiplier on paid plans; 0 means always included
    pub paid_multiplier: f64,
    /// Multiplier on the free plan; `None` means the model is not offered
    /// to free users and the resolver falls back to 1
    pub free_multiplier: Option<f64>,
    pub category: ModelCategory,
}

macro_rules! model {
    ($name:literal, $paid:expr, $free:expr, $category:ident) => {
        ModelInfo {
            name: $name,
            display_name: $name,
            paid_multiplier: $paid,
            free_multiplier: $free,
            category: ModelCategory::$category,
        }
    };
}

/// Model multiplier catalog
pub const MODEL_MULTIPLIERS: &[ModelInfo] = &[
    // Included models (0x on paid plans)
    model!("GPT-5 mini", 0.0, Some(1.0), Included),
    model!("GPT-4.1", 0.0, Some(1.0), Included),
    model!("GPT-4o", 0.0, Some(1.0), Included),
    model!("Raptor mini", 0.0, Some(1.0), Included),
    // Low-cost models (0.25x - 0.33x)
    model!("Claude Haiku 4.5", 0.33, None, Low),
    model!("Gemini 3 Flash", 0.33, None, Low),
    model!("GPT-5.1-Codex-Mini", 0.33, None, Low),
    model!("Grok Code Fast 1", 0.25, None, Low),
    // Standard models (1x)
    model!("Claude Sonnet 4", 1.0, None, Standard),
    model!("Claude Sonnet 4.5", 1.0, None, Standard),
    model!("Gemini 2.5 Pro", 1.0, None, Standard),
    model!("Gemini 3 Pro", 1.0, None, Standard),
    model!("GPT-5", 1.0, None, Standard),
    model!("GPT-5-Codex", 1.0, None, Standard),
    model!("GPT-5.1", 1.0, None, Standard),
    model!("GPT-5.1-Codex", 1.0, None, Standard),
    model!("GPT-5.1-Codex-Max", 1.0, None, Standard),
    model!("GPT-5.2", 1.0, None, Standard),
    model!("GPT-5.2-Codex", 1.0, None, Standard),
    model!("GPT-5.3-Codex", 1.0, None, Standard),
    // High-cost models (3x)
    model!("Claude Opus 4.5", 3.0, None, High),
    model!("Claude Opus 4.6", 3.0, None, High),
    // Ultra-cost models (9x+)
    model!("Claude Opus 4.6 (fast)", 9.0, None, Ultra),
    model!("Claude Opus 4.1", 10.0, None, Ultra),
];

/// Look up a model by name, case-insensitively
pub fn find_model(name: &str) -> Option<&'static ModelInfo> {
    MODEL_MULTIPLIERS
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(name))
}

/// Effective premium-request multiplier for a model on a plan.
///
/// Unknown models default to 1x. On the free plan, models without a free
/// multiplier also resolve to 1 rather than failing, because this lookup
/// doubles as the aggregator's fallback path.
pub fn model_multiplier(name: &str, plan: PlanType) -> f64 {
    let Some(model) = find_model(name) else {
        return 1.0;
    };
    match plan {
        PlanType::Free => model.free_multiplier.unwrap_or(1.0),
        _ => model.paid_multiplier,
    }
}

/// Whether a model is included (0x) on the given plan
pub fn is_included_model(name: &str, plan: PlanType) -> bool {
    if plan == PlanType::Free {
        return false;
    }
    plan_info(plan)
        .included_models
        .iter()
        .any(|m| m.eq_ignore_ascii_case(name))
}

//! Static plan/model catalog and the quota reset clock.

mod catalog;
mod reset;

pub use catalog::{
    find_model, is_included_model, model_multiplier, plan_info, ModelCategory, ModelInfo,
    PlanInfo, PlanType, MODEL_MULTIPLIERS,
};
pub use reset::{days_until_reset, reset_date};

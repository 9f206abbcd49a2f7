//! Module 3: in-hospital titration of an existing basal-bolus regimen.
//!
//! Each observed glucose-pattern flag maps to a percentage change on one
//! regimen component via a rule table, with one exception: any
//! hypoglycemia overrides the whole table and reduces every component.

use crate::config::AdjustmentConfig;
use crate::{primitives, Outcome};
use serde::{Deserialize, Serialize};

/// A component of the current basal-bolus regimen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegimenComponent {
    Basal,
    Breakfast,
    Lunch,
    Dinner,
}

impl RegimenComponent {
    fn label(&self) -> &'static str {
        match self {
            RegimenComponent::Basal => "basal insulin",
            RegimenComponent::Breakfast => "breakfast bolus",
            RegimenComponent::Lunch => "lunch bolus",
            RegimenComponent::Dinner => "dinner bolus",
        }
    }
}

/// Current regimen plus the observed glucose-pattern flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjustmentInputs {
    pub basal: f64,
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
    pub fasting_high: bool,
    pub pre_lunch_high: bool,
    pub pre_dinner_high: bool,
    pub post_meal_high: bool,
    /// Overrides every other flag when set
    pub any_hypoglycemia: bool,
}

impl AdjustmentInputs {
    pub fn current_tdd(&self) -> f64 {
        self.basal + self.breakfast + self.lunch + self.dinner
    }
}

/// One entry in the pattern rule table: a trigger, the component it
/// adjusts, the policy percentage, and the recommendation wording.
struct PatternRule {
    component: RegimenComponent,
    triggered: fn(&AdjustmentInputs) -> bool,
    percent: fn(&AdjustmentConfig) -> f64,
    pattern: &'static str,
}

const PATTERN_RULES: &[PatternRule] = &[
    PatternRule {
        component: RegimenComponent::Basal,
        triggered: |i| i.fasting_high,
        percent: |p| p.fasting_high_basal_pct,
        pattern: "Fasting glucose high",
    },
    PatternRule {
        component: RegimenComponent::Breakfast,
        triggered: |i| i.pre_lunch_high,
        percent: |p| p.pre_lunch_breakfast_pct,
        pattern: "Pre-lunch glucose high",
    },
    PatternRule {
        component: RegimenComponent::Lunch,
        triggered: |i| i.pre_dinner_high,
        percent: |p| p.pre_dinner_lunch_pct,
        pattern: "Pre-dinner glucose high",
    },
    PatternRule {
        component: RegimenComponent::Dinner,
        triggered: |i| i.post_meal_high,
        percent: |p| p.post_meal_dinner_pct,
        pattern: "Post-meal glucose high",
    },
];

/// Retitrated regimen with human-readable recommendations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdjustedRegimen {
    pub basal: f64,
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
    pub new_tdd: f64,
    pub recommendations: Vec<String>,
    pub has_adjustment: bool,
}

/// Retitrate the current regimen from the observed glucose patterns.
///
/// Requires a positive current TDD. Hypoglycemia dominates: when present,
/// every component is reduced and the recommendation list carries the
/// single reduce-all message instead of per-pattern entries.
pub fn calculate(inputs: &AdjustmentInputs, policy: &AdjustmentConfig) -> Outcome<AdjustedRegimen> {
    if inputs.current_tdd() <= 0.0 {
        return Outcome::Unavailable;
    }

    if inputs.any_hypoglycemia {
        let pct = policy.hypoglycemia_all_pct;
        let basal = primitives::apply_percent(inputs.basal, pct);
        let breakfast = primitives::apply_percent(inputs.breakfast, pct);
        let lunch = primitives::apply_percent(inputs.lunch, pct);
        let dinner = primitives::apply_percent(inputs.dinner, pct);

        tracing::info!("Hypoglycemia flagged: reducing all components by {}%", -pct);

        return Outcome::Computed(AdjustedRegimen {
            basal,
            breakfast,
            lunch,
            dinner,
            new_tdd: basal + breakfast + lunch + dinner,
            recommendations: vec![format!(
                "Hypoglycemia detected: reduce all insulin components by {}%",
                -pct
            )],
            has_adjustment: true,
        });
    }

    let mut basal = inputs.basal;
    let mut breakfast = inputs.breakfast;
    let mut lunch = inputs.lunch;
    let mut dinner = inputs.dinner;
    let mut recommendations = Vec::new();

    for rule in PATTERN_RULES {
        if !(rule.triggered)(inputs) {
            continue;
        }
        let pct = (rule.percent)(policy);
        let target = match rule.component {
            RegimenComponent::Basal => &mut basal,
            RegimenComponent::Breakfast => &mut breakfast,
            RegimenComponent::Lunch => &mut lunch,
            RegimenComponent::Dinner => &mut dinner,
        };
        *target = primitives::apply_percent(*target, pct);
        recommendations.push(format!(
            "{}: increase {} by {}%",
            rule.pattern,
            rule.component.label(),
            pct
        ));
    }

    let has_adjustment = !recommendations.is_empty();

    Outcome::Computed(AdjustedRegimen {
        basal,
        breakfast,
        lunch,
        dinner,
        new_tdd: basal + breakfast + lunch + dinner,
        recommendations,
        has_adjustment,
    })
}

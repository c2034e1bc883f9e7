pub mod eligibility;
pub mod players;
pub mod rules;

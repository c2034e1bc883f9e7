pub mod consent;
pub mod document;
pub mod eligibility_rule;
pub mod player;

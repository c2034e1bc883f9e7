mod consent;
mod document;
mod eligibility_rule;
mod player;

pub use consent::{ConsentType, PlayerConsent};
pub use document::{DocumentType, PlayerDocument, VerificationStatus};
pub use eligibility_rule::{
    AgeRangeConfig, ConsentRequirementConfig, DocumentRequirementConfig, EligibilityRule,
    GenderRestrictionConfig, GeographicConfig, GeographicScope, MedicalRequirementConfig,
    PlayerStatusConfig, RuleConfig, RuleType,
};
pub use player::{
    Gender, MedicalClearanceStatus, Player, PlayerStatus, PlayerWithGeography, RegistrationStatus,
};

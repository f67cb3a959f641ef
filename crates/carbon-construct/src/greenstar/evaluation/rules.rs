use super::super::catalog::InitiativeCatalog;
use super::super::credits::CreditDefinition;
use super::super::domain::{Certification, Initiative, Product};
use chrono::NaiveDate;

/// Why a certification did or did not back a product for one credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CertificationStanding {
    Qualifies,
    NotVerified,
    Expired,
    UnknownInitiative,
    InactiveInitiative,
    BelowRpvFloor,
    OutsideCategories,
}

pub(crate) fn certification_standing(
    certification: &Certification,
    definition: &CreditDefinition,
    initiatives: &InitiativeCatalog,
    evaluated_on: NaiveDate,
) -> CertificationStanding {
    if !certification.is_verified() {
        return CertificationStanding::NotVerified;
    }

    if !certification.is_current_on(evaluated_on) {
        return CertificationStanding::Expired;
    }

    let Some(initiative) = initiatives.get(&certification.initiative_id) else {
        return CertificationStanding::UnknownInitiative;
    };

    initiative_standing(initiative, definition, evaluated_on)
}

fn initiative_standing(
    initiative: &Initiative,
    definition: &CreditDefinition,
    evaluated_on: NaiveDate,
) -> CertificationStanding {
    if !initiative.is_active_on(evaluated_on) {
        return CertificationStanding::InactiveInitiative;
    }

    if !definition.rpv_satisfied(initiative.rpv_score) {
        return CertificationStanding::BelowRpvFloor;
    }

    if !initiative.covers_any(&definition.accepted_categories) {
        return CertificationStanding::OutsideCategories;
    }

    CertificationStanding::Qualifies
}

/// A product counts in full when any one of its certifications qualifies.
pub(crate) fn product_qualifies(
    product: &Product,
    definition: &CreditDefinition,
    initiatives: &InitiativeCatalog,
    evaluated_on: NaiveDate,
) -> bool {
    product.certifications.iter().any(|certification| {
        certification_standing(certification, definition, initiatives, evaluated_on)
            == CertificationStanding::Qualifies
    })
}

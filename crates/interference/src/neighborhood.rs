//! Neighborhood and frequency-overlap filters
//!
//! A grant takes part in the IAP for a protection point only when it sits
//! inside the point's neighborhood (distance by entity type and CBSD
//! category) and its frequency range overlaps the protected channel.

use crate::collaborators::Geodesic;
use crate::constants::ESC_CAT_A_HIGH_FREQ_HZ;
use crate::types::{CbsdCategory, GrantInformation, ProtectedEntityType, ProtectionConstraint};
use tracing::debug;

/// Grants within the neighborhood distance of `protection_point`
/// (latitude, longitude). A grant exactly on the boundary is inside.
pub fn find_grants_inside_neighborhood<'a>(
    grants: &'a [GrantInformation],
    protection_point: (f64, f64),
    entity_type: ProtectedEntityType,
    geodesic: &dyn Geodesic,
) -> Vec<&'a GrantInformation> {
    let inside: Vec<&GrantInformation> = grants
        .iter()
        .filter(|grant| is_inside_neighborhood(grant, protection_point, entity_type, geodesic))
        .collect();

    debug!(
        "{:?} neighborhood of ({:.6}, {:.6}): {} of {} grants inside",
        entity_type,
        protection_point.0,
        protection_point.1,
        inside.len(),
        grants.len()
    );

    inside
}

fn is_inside_neighborhood(
    grant: &GrantInformation,
    protection_point: (f64, f64),
    entity_type: ProtectedEntityType,
    geodesic: &dyn Geodesic,
) -> bool {
    let (dist_km, _, _) = geodesic.distance_bearing(
        grant.latitude,
        grant.longitude,
        protection_point.0,
        protection_point.1,
    );
    dist_km <= entity_type.neighborhood_distance_km(grant.cbsd_category)
}

/// Grants whose frequency range overlaps the constraint by a positive amount.
///
/// ESC passband is 3550-3680 MHz, but category A CBSDs only count toward an
/// ESC constraint that lies within 3550-3660 MHz.
pub fn find_overlapping_grants<'a>(
    grants: &'a [GrantInformation],
    constraint: &ProtectionConstraint,
) -> Vec<&'a GrantInformation> {
    let overlapping: Vec<&GrantInformation> = grants
        .iter()
        .filter(|grant| is_overlapping(grant, constraint))
        .collect();

    debug!(
        "{:?} constraint {:.1}-{:.1} MHz: {} of {} grants overlap",
        constraint.entity_type,
        constraint.low_frequency() / 1e6,
        constraint.high_frequency() / 1e6,
        overlapping.len(),
        grants.len()
    );

    overlapping
}

/// Whether one grant passes the frequency-overlap filter for `constraint`.
pub fn is_overlapping(grant: &GrantInformation, constraint: &ProtectionConstraint) -> bool {
    if grant.frequency.overlap(&constraint.frequency) <= 0.0 {
        return false;
    }

    match (constraint.entity_type, grant.cbsd_category) {
        (ProtectedEntityType::Esc, CbsdCategory::A) => {
            constraint.high_frequency() <= ESC_CAT_A_HIGH_FREQ_HZ
        }
        _ => true,
    }
}

/// Both filters in one pass, preserving input order.
pub fn find_overlapping_grants_inside_neighborhood<'a>(
    grants: &'a [GrantInformation],
    constraint: &ProtectionConstraint,
    geodesic: &dyn Geodesic,
) -> Vec<&'a GrantInformation> {
    let point = (constraint.latitude, constraint.longitude);
    let selected: Vec<&GrantInformation> = grants
        .iter()
        .filter(|grant| {
            is_overlapping(grant, constraint)
                && is_inside_neighborhood(grant, point, constraint.entity_type, geodesic)
        })
        .collect();

    debug!(
        "{:?} constraint at ({:.6}, {:.6}): {} of {} grants selected",
        constraint.entity_type,
        constraint.latitude,
        constraint.longitude,
        selected.len(),
        grants.len()
    );

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{constraint, grant, FixedDistance};
    use crate::types::CbsdCategory::{A, B};
    use crate::types::ProtectedEntityType::*;

    #[test]
    fn test_boundary_is_inclusive() {
        let grants = vec![grant(A, 3550.0, 3560.0)];
        let inside = find_grants_inside_neighborhood(&grants, (37.1, -122.1), GwpzArea, &FixedDistance(40.0));
        assert_eq!(inside.len(), 1);

        let outside = find_grants_inside_neighborhood(
            &grants,
            (37.1, -122.1),
            GwpzArea,
            &FixedDistance(40.000001),
        );
        assert!(outside.is_empty());
    }

    #[test]
    fn test_esc_radius_depends_on_category() {
        let grants = vec![grant(A, 3550.0, 3560.0), grant(B, 3550.0, 3560.0)];

        let at_60km = find_grants_inside_neighborhood(&grants, (37.1, -122.1), Esc, &FixedDistance(60.0));
        assert_eq!(at_60km.len(), 1);
        assert_eq!(at_60km[0].cbsd_category, B);

        let at_40km = find_grants_inside_neighborhood(&grants, (37.1, -122.1), Esc, &FixedDistance(40.0));
        assert_eq!(at_40km.len(), 2);

        let at_80km = find_grants_inside_neighborhood(&grants, (37.1, -122.1), Esc, &FixedDistance(80.0));
        assert_eq!(at_80km.len(), 1);
    }

    #[test]
    fn test_fss_cochannel_radius() {
        let grants = vec![grant(A, 3600.0, 3610.0)];
        let inside =
            find_grants_inside_neighborhood(&grants, (37.1, -122.1), FssCoChannel, &FixedDistance(150.0));
        assert_eq!(inside.len(), 1);
        let inside =
            find_grants_inside_neighborhood(&grants, (37.1, -122.1), FssBlocking, &FixedDistance(150.0));
        assert!(inside.is_empty());
    }

    #[test]
    fn test_overlap_requires_positive_bandwidth() {
        let grants = vec![
            grant(B, 3550.0, 3560.0), // touches at 3560, no overlap
            grant(B, 3555.0, 3565.0),
            grant(B, 3570.0, 3580.0),
        ];
        let c = constraint(PpaArea, 3560.0, 3570.0);
        let overlapping = find_overlapping_grants(&grants, &c);
        assert_eq!(overlapping.len(), 1);
        assert_eq!(overlapping[0].low_frequency(), 3555e6);
    }

    #[test]
    fn test_esc_excludes_category_a_above_3660() {
        let grants = vec![grant(A, 3650.0, 3670.0), grant(B, 3650.0, 3670.0)];

        let high = constraint(Esc, 3660.0, 3665.0);
        let overlapping = find_overlapping_grants(&grants, &high);
        assert_eq!(overlapping.len(), 1);
        assert_eq!(overlapping[0].cbsd_category, B);

        let low = constraint(Esc, 3655.0, 3660.0);
        assert_eq!(find_overlapping_grants(&grants, &low).len(), 2);
    }

    #[test]
    fn test_category_a_kept_for_non_esc_above_3660() {
        let grants = vec![grant(A, 3650.0, 3670.0)];
        let c = constraint(GwpzArea, 3660.0, 3665.0);
        assert_eq!(find_overlapping_grants(&grants, &c).len(), 1);
    }

    #[test]
    fn test_combined_filter_preserves_order() {
        let grants = vec![
            grant(B, 3555.0, 3565.0),
            grant(A, 3600.0, 3610.0),
            grant(B, 3550.0, 3560.0),
        ];
        let c = constraint(Esc, 3555.0, 3560.0);
        let selected = find_overlapping_grants_inside_neighborhood(&grants, &c, &FixedDistance(70.0));
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].low_frequency(), 3555e6);
        assert_eq!(selected[1].low_frequency(), 3550e6);
    }
}

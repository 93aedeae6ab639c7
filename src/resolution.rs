//! Response submission and resolution verification.
//!
//! This is where the geofence matcher gates writes: a response claiming an
//! issue is resolved must carry responder coordinates, and the issue only
//! transitions to `resolved` when those coordinates fall within the accepted
//! tolerance of the reported location. A failed check still records the
//! response row (distance and tier included) as evidence, but the status
//! change is refused and the measured distance is returned to the caller.

use sqlx::SqlitePool;

use crate::config::MAX_MESSAGE_LENGTH;
use crate::error_handling::ResolutionError;
use crate::geo::{self, AccuracyTier, Location};
use crate::storage::models::{Issue, IssueResponse, IssueStatus, Profile, ResponseType};
use crate::storage::issues::update_issue_status;
use crate::storage::responses::{insert_response, NewResponseRecord};
use crate::utils::sanitize::sanitize_and_truncate;

/// Input for a new official response.
#[derive(Debug, Clone)]
pub struct NewResponse {
    /// Message to the citizen.
    pub message: String,
    /// Status the issue should move to.
    pub new_status: IssueStatus,
    /// Optional photo evidence.
    pub photo_url: Option<String>,
    /// Stored filename of the photo, when present.
    pub photo_filename: Option<String>,
    /// Responder's current location. Required when `new_status` is resolved.
    pub location: Option<Location>,
}

/// Details of a geofence check performed for a resolution response.
///
/// Carries the tier's presentation metadata alongside the numbers so
/// clients can render the result without knowing the thresholds.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Verification {
    /// Measured distance from the reported issue location, in meters.
    pub distance_meters: f64,
    /// Display form of the distance ("27m", "1.2km").
    pub formatted_distance: String,
    /// Tier the distance classified into.
    pub tier: AccuracyTier,
    /// Human-readable description of the match quality.
    pub description: &'static str,
    /// Display color hint for the tier.
    pub color: &'static str,
    /// Whether the check passed.
    pub verified: bool,
}

impl Verification {
    fn passed(distance: f64, tier: AccuracyTier) -> Self {
        Self {
            distance_meters: distance,
            formatted_distance: geo::format_distance(distance),
            tier,
            description: tier.description(),
            color: tier.color(),
            verified: true,
        }
    }
}

/// Result of a successful response submission.
#[derive(Debug, Clone)]
pub struct ResponseOutcome {
    /// The stored response row.
    pub response: IssueResponse,
    /// The issue after any status change.
    pub issue: Issue,
    /// Geofence details, present for resolution responses.
    pub verification: Option<Verification>,
}

/// Records a response against an issue, applying the geofence gate for
/// resolution claims.
///
/// For `new_status = resolved`: responder coordinates are required and
/// validated, the distance to the reported location is measured and
/// classified, and the response row stores all three. If the check fails the
/// row is still inserted (unverified, as evidence) and
/// [`ResolutionError::OutsideGeofence`] is returned; the issue keeps its
/// previous status.
///
/// For other statuses: coordinates are optional; when supplied they are
/// validated and stored, but no distance is computed.
pub async fn submit_response(
    pool: &SqlitePool,
    issue: &Issue,
    responder: &Profile,
    input: NewResponse,
) -> Result<ResponseOutcome, ResolutionError> {
    let message = sanitize_and_truncate(&input.message, MAX_MESSAGE_LENGTH);
    let issue_location = Location::new(issue.latitude, issue.longitude);

    if input.new_status == IssueStatus::Resolved {
        let Some(location) = input.location else {
            return Err(ResolutionError::MissingLocation);
        };
        if !geo::is_valid(location) {
            return Err(ResolutionError::InvalidLocation);
        }

        let distance = geo::distance_meters(issue_location, location);
        let tier = geo::classify(distance);
        let verified = geo::is_match(issue_location, location);

        let response = insert_response(
            pool,
            NewResponseRecord {
                issue_id: issue.id.clone(),
                responder_id: responder.id.clone(),
                response_type: ResponseType::Resolution,
                message,
                photo_url: input.photo_url,
                photo_filename: input.photo_filename,
                latitude: Some(location.latitude),
                longitude: Some(location.longitude),
                distance_meters: Some(distance),
                accuracy_tier: Some(tier),
                location_verified: verified,
            },
        )
        .await?;

        if !verified {
            log::warn!(
                "Resolution for issue {} rejected: responder was {} away (tier: {})",
                issue.id,
                geo::format_distance(distance),
                tier.as_str()
            );
            return Err(ResolutionError::OutsideGeofence {
                distance_meters: distance,
                formatted_distance: geo::format_distance(distance),
                tier,
                threshold_meters: geo::DEFAULT_MATCH_THRESHOLD_METERS,
            });
        }

        let updated = update_issue_status(pool, &issue.id, IssueStatus::Resolved, &responder.id)
            .await?
            .unwrap_or_else(|| issue.clone());

        log::info!(
            "Issue {} resolved; location verified at {} ({})",
            issue.id,
            geo::format_distance(distance),
            tier.as_str()
        );

        Ok(ResponseOutcome {
            response,
            issue: updated,
            verification: Some(Verification::passed(distance, tier)),
        })
    } else {
        // Non-resolution updates may carry a location; validate it when
        // present but don't measure anything against it.
        let location = match input.location {
            Some(loc) if !geo::is_valid(loc) => return Err(ResolutionError::InvalidLocation),
            other => other,
        };

        let response = insert_response(
            pool,
            NewResponseRecord {
                issue_id: issue.id.clone(),
                responder_id: responder.id.clone(),
                response_type: ResponseType::StatusUpdate,
                message,
                photo_url: input.photo_url,
                photo_filename: input.photo_filename,
                latitude: location.map(|l| l.latitude),
                longitude: location.map(|l| l.longitude),
                distance_meters: None,
                accuracy_tier: None,
                location_verified: false,
            },
        )
        .await?;

        let updated = update_issue_status(pool, &issue.id, input.new_status, &responder.id)
            .await?
            .unwrap_or_else(|| issue.clone());

        Ok(ResponseOutcome {
            response,
            issue: updated,
            verification: None,
        })
    }
}

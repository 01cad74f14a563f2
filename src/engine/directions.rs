use crate::{
    entities::{AddressEntry, RouteLeg, RouteRequest, RouteResult, RouteStep},
    error::{no_route_error, unexpected_error, upstream_rejected_error, Error},
    external::google_maps::{DirectionsProvider, DirectionsResponse, Leg, Step},
};

/// Validates the entries, asks the provider once and flattens the answer.
#[tracing::instrument(skip_all, fields(entries = entries.len()))]
pub async fn compute_route(
    provider: &(dyn DirectionsProvider + Send + Sync),
    entries: &[AddressEntry],
) -> Result<RouteResult, Error> {
    let request = RouteRequest::from_entries(entries)?;

    tracing::info!(
        waypoints = request.waypoints.len(),
        optimize = request.optimize,
        "requesting directions"
    );

    let response = provider.directions(&request).await?;

    summarize(&request, response)
}

pub fn summarize(request: &RouteRequest, response: DirectionsResponse) -> Result<RouteResult, Error> {
    if response.status != "OK" {
        return Err(status_error(response.status, response.error_message));
    }

    // Alternate candidates are never considered.
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| no_route_error("no routes returned"))?;

    if route.legs.len() != request.expected_legs() {
        return Err(unexpected_error(format!(
            "expected {} legs, got {}",
            request.expected_legs(),
            route.legs.len()
        )));
    }

    if !is_permutation(&route.waypoint_order, request.waypoints.len()) {
        return Err(unexpected_error(format!(
            "waypoint order {:?} does not cover {} waypoints",
            route.waypoint_order,
            request.waypoints.len()
        )));
    }

    let distance: u64 = route.legs.iter().map(|leg| leg.distance.value).sum();
    let duration: u64 = route.legs.iter().map(|leg| leg.duration.value).sum();

    Ok(RouteResult {
        distance,
        duration,
        waypoint_order: route.waypoint_order,
        legs: route.legs.into_iter().map(flatten_leg).collect(),
    })
}

/// `NOT_FOUND` and `ZERO_RESULTS` mean the provider understood the request
/// but found nothing; every other non-OK status is a rejection.
fn status_error(status: String, error_message: Option<String>) -> Error {
    if status == "NOT_FOUND" || status == "ZERO_RESULTS" {
        return no_route_error(status);
    }

    upstream_rejected_error(error_message.unwrap_or(status))
}

fn flatten_leg(leg: Leg) -> RouteLeg {
    RouteLeg {
        distance: leg.distance,
        duration: leg.duration,
        start_address: leg.start_address,
        end_address: leg.end_address,
        steps: leg.steps.into_iter().map(flatten_step).collect(),
    }
}

fn flatten_step(step: Step) -> RouteStep {
    RouteStep {
        instruction: step.html_instructions,
        distance: step.distance,
        duration: step.duration,
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }

    let mut seen = vec![false; len];
    for &index in order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }

    true
}

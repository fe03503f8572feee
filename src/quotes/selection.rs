/// Route selection strategies
///
/// The quote API may return several candidate routes. A [`RouteSelector`]
/// picks the one to execute; [`FirstRoute`] takes the first candidate and is
/// the default.
use super::types::Route;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub trait RouteSelector: Send + Sync {
    /// Short identifier used in logs and errors
    fn name(&self) -> &'static str;

    /// Pick one route, or `None` if no candidate is acceptable
    fn select<'a>(&self, routes: &'a [Route]) -> Option<&'a Route>;
}

/// First route returned by the API
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstRoute;

impl RouteSelector for FirstRoute {
    fn name(&self) -> &'static str {
        "first"
    }

    fn select<'a>(&self, routes: &'a [Route]) -> Option<&'a Route> {
        routes.first()
    }
}

/// Route with the fewest on-chain steps; earlier routes win ties
#[derive(Debug, Clone, Copy, Default)]
pub struct FewestSteps;

impl RouteSelector for FewestSteps {
    fn name(&self) -> &'static str {
        "fewest_steps"
    }

    fn select<'a>(&self, routes: &'a [Route]) -> Option<&'a Route> {
        routes
            .iter()
            .filter(|route| !route.steps.is_empty())
            .min_by_key(|route| route.steps.len())
            .or_else(|| routes.first())
    }
}

/// Route quoting the largest `dstAmount`; routes without one rank last
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestDstAmount;

impl RouteSelector for HighestDstAmount {
    fn name(&self) -> &'static str {
        "highest_dst_amount"
    }

    fn select<'a>(&self, routes: &'a [Route]) -> Option<&'a Route> {
        // max_by returns the last maximum; iterate in reverse so ties keep API order
        routes
            .iter()
            .rev()
            .max_by(|a, b| match (a.dst_amount(), b.dst_amount()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            })
    }
}

/// Configurable selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSelectionPolicy {
    #[default]
    First,
    FewestSteps,
    HighestDstAmount,
}

impl RouteSelectionPolicy {
    pub fn selector(&self) -> Box<dyn RouteSelector> {
        match self {
            RouteSelectionPolicy::First => Box::new(FirstRoute),
            RouteSelectionPolicy::FewestSteps => Box::new(FewestSteps),
            RouteSelectionPolicy::HighestDstAmount => Box::new(HighestDstAmount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::types::{Step, TransactionDescriptor};
    use serde_json::json;

    fn route(label: &str, steps: usize, dst_amount: Option<&str>) -> Route {
        let mut route = Route::new(
            (0..steps)
                .map(|_| Step::new(TransactionDescriptor::new("0x01", "0x", "0")))
                .collect(),
        );
        route.details.insert("route".to_string(), json!(label));
        if let Some(amount) = dst_amount {
            route.details.insert("dstAmount".to_string(), json!(amount));
        }
        route
    }

    #[test]
    fn test_first_route() {
        let routes = vec![route("a", 2, None), route("b", 1, None)];
        assert_eq!(FirstRoute.select(&routes).and_then(Route::name), Some("a"));
        assert!(FirstRoute.select(&[]).is_none());
    }

    #[test]
    fn test_fewest_steps_prefers_earlier_on_tie() {
        let routes = vec![
            route("a", 3, None),
            route("b", 1, None),
            route("c", 1, None),
            route("empty", 0, None),
        ];
        assert_eq!(FewestSteps.select(&routes).and_then(Route::name), Some("b"));
    }

    #[test]
    fn test_highest_dst_amount() {
        let routes = vec![
            route("a", 2, Some("940000")),
            route("b", 1, None),
            route("c", 1, Some("951000")),
            route("d", 1, Some("951000")),
        ];
        assert_eq!(
            HighestDstAmount.select(&routes).and_then(Route::name),
            Some("c")
        );

        let unpriced = vec![route("x", 1, None), route("y", 1, None)];
        assert_eq!(
            HighestDstAmount.select(&unpriced).and_then(Route::name),
            Some("x")
        );
    }

    #[test]
    fn test_policy_deserializes_snake_case() {
        let policy: RouteSelectionPolicy = serde_json::from_value(json!("highest_dst_amount")).unwrap();
        assert_eq!(policy, RouteSelectionPolicy::HighestDstAmount);
        assert_eq!(policy.selector().name(), "highest_dst_amount");
    }
}
